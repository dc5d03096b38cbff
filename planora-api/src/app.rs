/// Application state and router builder
///
/// The state carries the storage backend as a trait object, so the
/// same router serves PostgreSQL and flat-file deployments.
///
/// # Router Layout
///
/// ```text
/// /
/// ├── /health                         # public
/// └── /v1/                            # versioned API
///     ├── /auth/{register,login,refresh}   # public
///     └── everything else                  # behind JWT middleware
/// ```
///
/// # Middleware Stack
///
/// Applied in order: request tracing (tower-http TraceLayer), CORS
/// (tower-http CorsLayer), JWT authentication on resource routes.

use crate::config::Config;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use planora_shared::auth::middleware::create_jwt_middleware;
use planora_shared::store::Store;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned per request via Axum's `State` extractor; both fields are
/// cheap Arc clones.
#[derive(Clone)]
pub struct AppState {
    /// Active storage backend
    pub store: Arc<dyn Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn Store>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Gets the JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/refresh", post(routes::auth::refresh));

    // Resource routes (require a valid access token)
    let api_routes = Router::new()
        .route("/users", get(routes::users::list_users))
        .route("/users/me", get(routes::users::me))
        .route(
            "/projects",
            get(routes::projects::list_projects).post(routes::projects::create_project),
        )
        .route(
            "/projects/:project_id",
            get(routes::projects::get_project).put(routes::projects::update_project),
        )
        .route(
            "/projects/:project_id/join",
            post(routes::projects::join_project).delete(routes::projects::leave_project),
        )
        .route(
            "/projects/:project_id/areas",
            get(routes::areas::list_project_areas),
        )
        .route(
            "/projects/:project_id/tasks",
            get(routes::tasks::list_project_tasks),
        )
        .route(
            "/projects/:project_id/meetings",
            get(routes::meetings::list_project_meetings),
        )
        .route(
            "/areas",
            post(routes::areas::create_area).patch(routes::areas::reorder_areas),
        )
        .route(
            "/areas/:area_id",
            get(routes::areas::get_area)
                .put(routes::areas::update_area)
                .delete(routes::areas::delete_area),
        )
        .route(
            "/areas/:area_id/responsibilities",
            get(routes::areas::list_responsibilities),
        )
        .route("/tasks", post(routes::tasks::create_task))
        .route(
            "/tasks/:task_id",
            get(routes::tasks::get_task)
                .put(routes::tasks::update_task)
                .delete(routes::tasks::delete_task),
        )
        .route("/meetings", post(routes::meetings::create_meeting))
        .route(
            "/meetings/:meeting_id",
            get(routes::meetings::get_meeting)
                .put(routes::meetings::update_meeting)
                .delete(routes::meetings::delete_meeting),
        )
        .route(
            "/meetings/:meeting_id/note",
            get(routes::meetings::get_meeting_note),
        )
        .route(
            "/meeting-notes",
            post(routes::meeting_notes::create_note),
        )
        .route(
            "/meeting-notes/:note_id",
            get(routes::meeting_notes::get_note).put(routes::meeting_notes::update_note),
        )
        .route("/templates", get(routes::templates::list_templates))
        .route(
            "/templates/:template_id",
            get(routes::templates::get_template),
        )
        .route(
            "/templates/:template_id/instantiate",
            post(routes::templates::instantiate),
        )
        .layer(middleware::from_fn(create_jwt_middleware(
            state.jwt_secret().to_string(),
        )));

    let v1_routes = Router::new().nest("/auth", auth_routes).merge(api_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}
