/// Store-level tests against the flat-file backend
///
/// These exercise the storage contract that both backends implement:
/// slug uniquification, completed_at transitions, junction
/// replacement, bulk reorder, detach-on-area-delete, the one-note-
/// per-meeting rule, and template expansion. The flat-file backend
/// runs in a unique temp directory, so no external services are
/// needed.

use planora_shared::models::area::{AreaOrder, CreateArea, UpdateArea};
use planora_shared::models::meeting::CreateMeeting;
use planora_shared::models::meeting_note::CreateMeetingNote;
use planora_shared::models::project::{CreateProject, ProjectStatus, ProjectType};
use planora_shared::models::task::{CreateTask, TaskStatus, UpdateTask};
use planora_shared::models::template::{
    CreateTemplate, TemplateArea, TemplateBody, TemplateMember, TemplateResponsibility,
    TemplateTask,
};
use planora_shared::models::user::CreateUser;
use planora_shared::store::flatfile::FileStore;
use planora_shared::store::{
    AreaStore, MeetingStore, ProjectStore, StoreError, TaskStore, TemplateStore, UserStore,
};
use planora_shared::template::instantiate_template;
use uuid::Uuid;

/// Opens a store in a fresh temp directory
async fn temp_store() -> FileStore {
    let dir = std::env::temp_dir().join(format!("planora-test-{}", Uuid::new_v4()));
    FileStore::open(dir).await.expect("store should open")
}

async fn cleanup(store: FileStore) {
    let _ = tokio::fs::remove_dir_all(store.root()).await;
}

fn create_project_input(name: &str) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        project_type: ProjectType::Custom,
        status: ProjectStatus::InPlanning,
        description: None,
        start_date: None,
        end_date: None,
        participant_ids: vec![],
    }
}

fn create_task_input(project_id: Uuid, title: &str) -> CreateTask {
    CreateTask {
        project_id,
        area_id: None,
        title: title.to_string(),
        description: None,
        assignee_id: None,
        deadline: None,
        status: TaskStatus::Pending,
        support_resources: None,
        depends_on: vec![],
        recurrence_frequency: None,
        recurrence_interval: None,
        recurrence_until: None,
    }
}

#[tokio::test]
async fn test_duplicate_project_names_get_suffixed_slugs() {
    let store = temp_store().await;

    let first = store
        .create_project(create_project_input("Garden Party"))
        .await
        .unwrap();
    let second = store
        .create_project(create_project_input("Garden Party"))
        .await
        .unwrap();
    let third = store
        .create_project(create_project_input("Garden Party"))
        .await
        .unwrap();

    assert_eq!(first.slug, "garden-party");
    assert_eq!(second.slug, "garden-party-1");
    assert_eq!(third.slug, "garden-party-2");

    let found = store.get_project_by_slug("garden-party-1").await.unwrap();
    assert_eq!(found.unwrap().id, second.id);

    cleanup(store).await;
}

#[tokio::test]
async fn test_completed_status_manages_completed_at() {
    let store = temp_store().await;
    let project = store
        .create_project(create_project_input("Timestamps"))
        .await
        .unwrap();

    let task = store
        .create_task(create_task_input(project.id, "Write report"))
        .await
        .unwrap();
    assert_eq!(task.status, TaskStatus::Pending);
    assert!(task.completed_at.is_none());

    let task = store
        .update_task(
            task.id,
            UpdateTask {
                status: Some(TaskStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.completed_at.is_some());

    let task = store
        .update_task(
            task.id,
            UpdateTask {
                status: Some(TaskStatus::InProgress),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    assert!(task.completed_at.is_none());

    cleanup(store).await;
}

#[tokio::test]
async fn test_task_created_completed_gets_timestamp() {
    let store = temp_store().await;
    let project = store
        .create_project(create_project_input("Prefilled"))
        .await
        .unwrap();

    let mut input = create_task_input(project.id, "Already done");
    input.status = TaskStatus::Completed;
    let task = store.create_task(input).await.unwrap();

    assert!(task.completed_at.is_some());

    cleanup(store).await;
}

#[tokio::test]
async fn test_task_area_must_belong_to_same_project() {
    let store = temp_store().await;
    let project_a = store
        .create_project(create_project_input("Project A"))
        .await
        .unwrap();
    let project_b = store
        .create_project(create_project_input("Project B"))
        .await
        .unwrap();

    let area_b = store
        .create_area(CreateArea {
            project_id: project_b.id,
            name: "Logistics".to_string(),
            description: None,
            lead_id: None,
            participant_ids: vec![],
        })
        .await
        .unwrap();

    let mut input = create_task_input(project_a.id, "Cross-project task");
    input.area_id = Some(area_b.id);
    let result = store.create_task(input).await;

    assert!(matches!(result, Err(StoreError::Invalid(_))));

    cleanup(store).await;
}

#[tokio::test]
async fn test_area_reorder_applies_submitted_orders() {
    let store = temp_store().await;
    let project = store
        .create_project(create_project_input("Reorder"))
        .await
        .unwrap();

    let mut areas = Vec::new();
    for name in ["First", "Second", "Third"] {
        areas.push(
            store
                .create_area(CreateArea {
                    project_id: project.id,
                    name: name.to_string(),
                    description: None,
                    lead_id: None,
                    participant_ids: vec![],
                })
                .await
                .unwrap(),
        );
    }
    assert_eq!(
        areas.iter().map(|a| a.display_order).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    // reverse the order
    let orders = vec![
        AreaOrder {
            id: areas[0].id,
            order: 3,
        },
        AreaOrder {
            id: areas[1].id,
            order: 2,
        },
        AreaOrder {
            id: areas[2].id,
            order: 1,
        },
    ];
    let updated = store.reorder_areas(&orders).await.unwrap();
    assert_eq!(updated.len(), 3);
    for (entry, area) in orders.iter().zip(&updated) {
        assert_eq!(area.id, entry.id);
        assert_eq!(area.display_order, entry.order);
    }

    let listed = store.list_areas(project.id).await.unwrap();
    assert_eq!(
        listed.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        vec!["Third", "Second", "First"]
    );

    cleanup(store).await;
}

#[tokio::test]
async fn test_deleting_area_detaches_tasks() {
    let store = temp_store().await;
    let project = store
        .create_project(create_project_input("Detach"))
        .await
        .unwrap();
    let area = store
        .create_area(CreateArea {
            project_id: project.id,
            name: "Doomed".to_string(),
            description: None,
            lead_id: None,
            participant_ids: vec![],
        })
        .await
        .unwrap();

    let mut input = create_task_input(project.id, "Survivor");
    input.area_id = Some(area.id);
    let task = store.create_task(input).await.unwrap();
    assert_eq!(task.area_id, Some(area.id));

    assert!(store.delete_area(area.id).await.unwrap());
    assert!(!store.delete_area(area.id).await.unwrap());

    let task = store.get_task(task.id).await.unwrap().unwrap();
    assert_eq!(task.area_id, None);

    cleanup(store).await;
}

#[tokio::test]
async fn test_update_replaces_participant_set() {
    let store = temp_store().await;

    let mut user_ids = Vec::new();
    for (name, email) in [
        ("Ana Ruiz", "ana@example.com"),
        ("Ben Okafor", "ben@example.com"),
        ("Cleo Fan", "cleo@example.com"),
    ] {
        let user = store
            .create_user(CreateUser {
                email: email.to_string(),
                name: name.to_string(),
                initials: "XX".to_string(),
                password_hash: None,
                avatar_url: None,
                handle: None,
                wallet_address: None,
            })
            .await
            .unwrap();
        user_ids.push(user.id);
    }

    let mut input = create_project_input("Participants");
    input.participant_ids = vec![user_ids[0], user_ids[1]];
    let project = store.create_project(input).await.unwrap();
    assert_eq!(project.participant_ids, vec![user_ids[0], user_ids[1]]);

    // a provided set replaces, not merges
    let project = store
        .update_project(
            project.id,
            planora_shared::models::project::UpdateProject {
                participant_ids: Some(vec![user_ids[2]]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(project.participant_ids, vec![user_ids[2]]);

    cleanup(store).await;
}

#[tokio::test]
async fn test_join_and_leave_project() {
    let store = temp_store().await;
    let project = store
        .create_project(create_project_input("Join"))
        .await
        .unwrap();
    let user = store
        .create_user(CreateUser {
            email: "joiner@example.com".to_string(),
            name: "Joiner".to_string(),
            initials: "J".to_string(),
            password_hash: None,
            avatar_url: None,
            handle: None,
            wallet_address: None,
        })
        .await
        .unwrap();

    let project = store
        .add_project_participant(project.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(project.participant_ids.contains(&user.id));

    // joining twice is idempotent
    let project = store
        .add_project_participant(project.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        project
            .participant_ids
            .iter()
            .filter(|&&id| id == user.id)
            .count(),
        1
    );

    let project = store
        .remove_project_participant(project.id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!project.participant_ids.contains(&user.id));

    // unknown project id is None, not an error
    assert!(store
        .add_project_participant(Uuid::new_v4(), user.id)
        .await
        .unwrap()
        .is_none());

    cleanup(store).await;
}

#[tokio::test]
async fn test_one_note_per_meeting() {
    let store = temp_store().await;
    let project = store
        .create_project(create_project_input("Notes"))
        .await
        .unwrap();
    let author = store
        .create_user(CreateUser {
            email: "author@example.com".to_string(),
            name: "Author".to_string(),
            initials: "A".to_string(),
            password_hash: None,
            avatar_url: None,
            handle: None,
            wallet_address: None,
        })
        .await
        .unwrap();

    let meeting = store
        .create_meeting(CreateMeeting {
            project_id: project.id,
            title: "Kickoff".to_string(),
            date: "2026-09-01".parse().unwrap(),
            time: "14:30:00".parse().unwrap(),
            attendee_ids: vec![author.id],
        })
        .await
        .unwrap();

    let note = store
        .create_meeting_note(CreateMeetingNote {
            meeting_id: meeting.id,
            content: "Went well".to_string(),
            agenda: None,
            decisions: None,
            action_items: Some(vec!["book venue".to_string()]),
            created_by: author.id,
        })
        .await
        .unwrap();

    let second = store
        .create_meeting_note(CreateMeetingNote {
            meeting_id: meeting.id,
            content: "Duplicate".to_string(),
            agenda: None,
            decisions: None,
            action_items: None,
            created_by: author.id,
        })
        .await;
    assert!(matches!(second, Err(StoreError::Conflict(_))));

    let found = store.get_note_for_meeting(meeting.id).await.unwrap();
    assert_eq!(found.unwrap().id, note.id);

    // note goes away with the meeting
    assert!(store.delete_meeting(meeting.id).await.unwrap());
    assert!(store
        .get_note_for_meeting(meeting.id)
        .await
        .unwrap()
        .is_none());

    cleanup(store).await;
}

#[tokio::test]
async fn test_template_expansion_scenario() {
    let store = temp_store().await;

    let template = store
        .create_template(CreateTemplate {
            name: "Community Meetup".to_string(),
            project_type: ProjectType::Meetup,
            body: TemplateBody {
                areas: vec![TemplateArea {
                    name: "Program".to_string(),
                    description: Some("Talks and schedule".to_string()),
                    team_members: vec![
                        TemplateMember {
                            name: "Ana Ruiz".to_string(),
                            email: Some("ana@example.com".to_string()),
                        },
                        TemplateMember {
                            name: "Ben Okafor".to_string(),
                            email: None,
                        },
                    ],
                    responsibilities: vec![TemplateResponsibility {
                        name: "Speakers".to_string(),
                        description: None,
                        tasks: vec![
                            TemplateTask {
                                title: "Confirm keynote".to_string(),
                                state: Some("Done".to_string()),
                                ..Default::default()
                            },
                            TemplateTask {
                                title: "Collect abstracts".to_string(),
                                state: Some("In Progress".to_string()),
                                ..Default::default()
                            },
                            TemplateTask {
                                title: "Print badges".to_string(),
                                state: Some("Not Started".to_string()),
                                ..Default::default()
                            },
                        ],
                    }],
                }],
            },
        })
        .await
        .unwrap();

    let project = instantiate_template(&store, &template, None).await.unwrap();
    assert_eq!(project.name, "Community Meetup");
    assert_eq!(project.project_type, ProjectType::Meetup);
    assert_eq!(project.status, ProjectStatus::InPlanning);

    // one area: lead = first member, participant = second
    let areas = store.list_areas(project.id).await.unwrap();
    assert_eq!(areas.len(), 1);
    let area = &areas[0];

    let ana = store
        .find_user_by_email("ana@example.com")
        .await
        .unwrap()
        .expect("ana should exist");
    let ben = store
        .find_user_by_name("ben okafor")
        .await
        .unwrap()
        .expect("ben should exist");
    assert_eq!(ben.initials, "BO");
    assert!(ben.password_hash.is_none());

    assert_eq!(area.lead_id, Some(ana.id));
    assert_eq!(area.participant_ids, vec![ben.id]);

    let responsibilities = store.list_responsibilities(area.id).await.unwrap();
    assert_eq!(responsibilities.len(), 1);
    assert_eq!(responsibilities[0].name, "Speakers");

    // three tasks with mapped statuses
    let mut tasks = store.list_tasks(project.id).await.unwrap();
    tasks.sort_by(|a, b| a.title.cmp(&b.title));
    assert_eq!(tasks.len(), 3);

    let by_title = |title: &str| {
        tasks
            .iter()
            .find(|t| t.title == title)
            .unwrap_or_else(|| panic!("missing task {title}"))
    };
    assert_eq!(by_title("Confirm keynote").status, TaskStatus::Completed);
    assert!(by_title("Confirm keynote").completed_at.is_some());
    assert_eq!(by_title("Collect abstracts").status, TaskStatus::InProgress);
    assert_eq!(by_title("Print badges").status, TaskStatus::Pending);
    assert!(tasks.iter().all(|t| t.area_id == Some(area.id)));

    // expanding again reuses the resolved users and suffixes the slug
    let again = instantiate_template(&store, &template, None).await.unwrap();
    assert_eq!(again.slug, format!("{}-1", project.slug));
    let users = store.list_users().await.unwrap();
    assert_eq!(users.len(), 2);

    cleanup(store).await;
}

#[tokio::test]
async fn test_dependencies_stored_as_given() {
    let store = temp_store().await;
    let project = store
        .create_project(create_project_input("Deps"))
        .await
        .unwrap();

    let blocker = store
        .create_task(create_task_input(project.id, "Blocker"))
        .await
        .unwrap();

    // one real reference, one dangling: both are kept
    let dangling = Uuid::new_v4();
    let mut input = create_task_input(project.id, "Blocked");
    input.depends_on = vec![blocker.id, dangling];
    let task = store.create_task(input).await.unwrap();
    assert_eq!(task.depends_on, vec![blocker.id, dangling]);

    // replacement set on update
    let task = store
        .update_task(
            task.id,
            UpdateTask {
                depends_on: Some(vec![dangling]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(task.depends_on, vec![dangling]);

    cleanup(store).await;
}
