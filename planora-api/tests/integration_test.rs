/// Integration tests for the Planora API
///
/// Drive the full router end-to-end over the flat-file backend:
/// authentication, project/area/task/meeting CRUD, reordering,
/// meeting notes, and template instantiation.

mod common;

use axum::http::StatusCode;
use common::TestContext;
use planora_shared::store::ProjectStore;
use serde_json::json;

#[tokio::test]
async fn test_health_is_public() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.request_unauthed("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["storage"], "flatfile");
    assert_eq!(body["storage_status"], "connected");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_resource_routes_require_auth() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.request_unauthed("GET", "/v1/projects", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_register_login_refresh_flow() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .request_unauthed(
            "POST",
            "/v1/auth/register",
            Some(json!({
                "email": "maya@example.com",
                "password": "Planning4ever",
                "name": "Maya Chen"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    assert!(body["access_token"].is_string());
    let refresh_token = body["refresh_token"].as_str().unwrap().to_string();

    // duplicate registration conflicts
    let (status, _) = ctx
        .request_unauthed(
            "POST",
            "/v1/auth/register",
            Some(json!({
                "email": "maya@example.com",
                "password": "Planning4ever"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = ctx
        .request_unauthed(
            "POST",
            "/v1/auth/login",
            Some(json!({
                "email": "maya@example.com",
                "password": "Planning4ever"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());

    let (status, _) = ctx
        .request_unauthed(
            "POST",
            "/v1/auth/login",
            Some(json!({
                "email": "maya@example.com",
                "password": "wrong-password1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = ctx
        .request_unauthed(
            "POST",
            "/v1/auth/refresh",
            Some(json!({ "refresh_token": refresh_token })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_weak_password_rejected() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .request_unauthed(
            "POST",
            "/v1/auth/register",
            Some(json!({
                "email": "weak@example.com",
                "password": "lettersonly"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("digit"));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_project_slug_collision_appends_suffix() {
    let ctx = TestContext::new().await.unwrap();

    let first = ctx.create_project("Launch Event").await;
    let second = ctx.create_project("Launch Event").await;

    assert_eq!(first["slug"], "launch-event");
    assert_eq!(second["slug"], "launch-event-1");

    // the API writes through to the store
    let stored = ctx
        .store
        .get_project_by_slug("launch-event-1")
        .await
        .unwrap()
        .expect("second project should be stored");
    assert_eq!(stored.id.to_string(), second["id"].as_str().unwrap());

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_create_project_requires_name() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .request("POST", "/v1/projects", Some(json!({ "name": "   " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Project name is required");

    let (status, body) = ctx
        .request(
            "POST",
            "/v1/projects",
            Some(json!({ "name": "Gala", "type": "party" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid project type 'party'");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_create_task_defaults_to_pending() {
    let ctx = TestContext::new().await.unwrap();
    let project = ctx.create_project("Reports").await;

    let (status, task) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({
                "project_id": project["id"],
                "title": "Write report"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], "pending");
    assert!(task["assignee_id"].is_null());
    assert!(task["completed_at"].is_null());
    assert_eq!(task["depends_on"], json!([]));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_create_task_validation() {
    let ctx = TestContext::new().await.unwrap();
    let project = ctx.create_project("Validation").await;

    // missing title
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({ "project_id": project["id"] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Task title is required");

    // malformed project id
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({ "project_id": "not-a-uuid", "title": "X" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "project_id must be a valid UUID");

    // unknown project
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({
                "project_id": uuid::Uuid::new_v4(),
                "title": "X"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Project not found");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_support_resources_accept_string_or_list() {
    let ctx = TestContext::new().await.unwrap();
    let project = ctx.create_project("Resources").await;

    let (status, task) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({
                "project_id": project["id"],
                "title": "With resources",
                "support_resources": "a\n\nb\n"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["support_resources"], json!(["a", "b"]));

    let (status, task) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({
                "project_id": project["id"],
                "title": "With list resources",
                "support_resources": [" a ", "", "b"]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["support_resources"], json!(["a", "b"]));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_completing_task_sets_and_clears_timestamp() {
    let ctx = TestContext::new().await.unwrap();
    let project = ctx.create_project("Completion").await;

    let (_, task) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({ "project_id": project["id"], "title": "Finish me" })),
        )
        .await;
    let task_uri = format!("/v1/tasks/{}", task["id"].as_str().unwrap());

    let (status, task) = ctx
        .request("PUT", &task_uri, Some(json!({ "status": "completed" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["status"], "completed");
    assert!(task["completed_at"].is_string());

    let (status, task) = ctx
        .request("PUT", &task_uri, Some(json!({ "status": "blocked" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(task["status"], "blocked");
    assert!(task["completed_at"].is_null());

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_delete_missing_area_is_404() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .request(
            "DELETE",
            &format!("/v1/areas/{}", uuid::Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Area not found");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_area_create_reorder_delete_flow() {
    let ctx = TestContext::new().await.unwrap();
    let project = ctx.create_project("Areas").await;

    let mut area_ids = Vec::new();
    for name in ["Logistics", "Program", "Budget"] {
        let (status, area) = ctx
            .request(
                "POST",
                "/v1/areas",
                Some(json!({ "project_id": project["id"], "name": name })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        area_ids.push(area["id"].as_str().unwrap().to_string());
    }

    // reverse the display order
    let (status, areas) = ctx
        .request(
            "PATCH",
            "/v1/areas",
            Some(json!([
                { "id": area_ids[0], "order": 3 },
                { "id": area_ids[1], "order": 2 },
                { "id": area_ids[2], "order": 1 }
            ])),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    for (area, expected) in areas.as_array().unwrap().iter().zip([3, 2, 1]) {
        assert_eq!(area["display_order"], expected);
    }

    let (status, listed) = ctx
        .request(
            "GET",
            &format!("/v1/projects/{}/areas", project["id"].as_str().unwrap()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Budget", "Program", "Logistics"]);

    // delete one, it disappears from the listing
    let (status, body) = ctx
        .request("DELETE", &format!("/v1/areas/{}", area_ids[1]), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], true);

    let (_, listed) = ctx
        .request(
            "GET",
            &format!("/v1/projects/{}/areas", project["id"].as_str().unwrap()),
            None,
        )
        .await;
    assert_eq!(listed.as_array().unwrap().len(), 2);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_join_and_leave_project() {
    let ctx = TestContext::new().await.unwrap();
    let project = ctx.create_project("Joinable").await;
    let project_id = project["id"].as_str().unwrap();
    let user_id = ctx.user.id.to_string();

    let (status, project) = ctx
        .request("POST", &format!("/v1/projects/{project_id}/join"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(project["participant_ids"]
        .as_array()
        .unwrap()
        .iter()
        .any(|id| id == user_id.as_str()));

    let (status, project) = ctx
        .request("DELETE", &format!("/v1/projects/{project_id}/join"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!project["participant_ids"]
        .as_array()
        .unwrap()
        .iter()
        .any(|id| id == user_id.as_str()));

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_meeting_and_note_flow() {
    let ctx = TestContext::new().await.unwrap();
    let project = ctx.create_project("Meetings").await;

    let (status, meeting) = ctx
        .request(
            "POST",
            "/v1/meetings",
            Some(json!({
                "project_id": project["id"],
                "title": "Kickoff",
                "date": "2026-09-01",
                "time": "14:30:00"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "create meeting failed: {meeting}");
    let meeting_id = meeting["id"].as_str().unwrap().to_string();

    let (status, note) = ctx
        .request(
            "POST",
            "/v1/meeting-notes",
            Some(json!({
                "meeting_id": meeting_id,
                "content": "Discussed the venue",
                "action_items": "book hall\nemail caterer"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(note["created_by"], ctx.user.id.to_string());
    assert_eq!(note["action_items"], json!(["book hall", "email caterer"]));

    // one note per meeting
    let (status, body) = ctx
        .request(
            "POST",
            "/v1/meeting-notes",
            Some(json!({ "meeting_id": meeting_id, "content": "Again" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Meeting already has a note");

    let (status, updated) = ctx
        .request(
            "PUT",
            &format!("/v1/meeting-notes/{}", note["id"].as_str().unwrap()),
            Some(json!({ "decisions": "Hall B it is" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["decisions"], "Hall B it is");
    assert_eq!(updated["content"], "Discussed the venue");

    let (status, fetched) = ctx
        .request("GET", &format!("/v1/meetings/{meeting_id}/note"), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], note["id"]);

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_seeded_template_instantiates() {
    let ctx = TestContext::new().await.unwrap();

    let (status, templates) = ctx.request("GET", "/v1/templates", None).await;
    assert_eq!(status, StatusCode::OK);
    let templates = templates.as_array().unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0]["name"], "Property Project Starter");
    let template_id = templates[0]["id"].as_str().unwrap().to_string();

    let (status, project) = ctx
        .request(
            "POST",
            &format!("/v1/templates/{template_id}/instantiate"),
            Some(json!({ "name": "Old Farmhouse" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "instantiate failed: {project}");
    assert_eq!(project["name"], "Old Farmhouse");
    assert_eq!(project["project_type"], "property");
    let project_id = project["id"].as_str().unwrap().to_string();

    let (_, areas) = ctx
        .request("GET", &format!("/v1/projects/{project_id}/areas"), None)
        .await;
    assert_eq!(areas.as_array().unwrap().len(), 2);

    let (_, tasks) = ctx
        .request("GET", &format!("/v1/projects/{project_id}/tasks"), None)
        .await;
    let tasks = tasks.as_array().unwrap();
    assert_eq!(tasks.len(), 7);
    assert!(tasks.iter().all(|t| t["status"] == "pending"));

    // unknown template is a 404
    let (status, body) = ctx
        .request(
            "POST",
            &format!("/v1/templates/{}/instantiate", uuid::Uuid::new_v4()),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Template not found");

    ctx.cleanup().await;
}

#[tokio::test]
async fn test_task_rejects_area_from_other_project() {
    let ctx = TestContext::new().await.unwrap();
    let project_a = ctx.create_project("Alpha").await;
    let project_b = ctx.create_project("Beta").await;

    let (_, area_b) = ctx
        .request(
            "POST",
            "/v1/areas",
            Some(json!({ "project_id": project_b["id"], "name": "Beta area" })),
        )
        .await;

    let (status, body) = ctx
        .request(
            "POST",
            "/v1/tasks",
            Some(json!({
                "project_id": project_a["id"],
                "title": "Misfiled",
                "area_id": area_b["id"]
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Area belongs to a different project");

    ctx.cleanup().await;
}
