/// API route handlers
///
/// Organized by resource:
///
/// - `health`: liveness + store connectivity
/// - `auth`: register, login, token refresh
/// - `users`: user listing and the acting user
/// - `projects`: project CRUD, join/leave
/// - `areas`: area CRUD, bulk reorder, responsibilities
/// - `tasks`: task CRUD
/// - `meetings`: meeting CRUD
/// - `meeting_notes`: note create/update (one per meeting)
/// - `templates`: template listing and instantiation

pub mod areas;
pub mod auth;
pub mod health;
pub mod meeting_notes;
pub mod meetings;
pub mod projects;
pub mod tasks;
pub mod templates;
pub mod users;
