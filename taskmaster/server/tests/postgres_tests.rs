//! Runs the project lifecycle against a real PostgreSQL container.
//!
//! Requires a Docker daemon: `cargo test -p taskmaster_server --test postgres_tests -- --ignored`.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use taskmaster_server::entities::task;
use taskmaster_server::project::{NewProject, ProjectService};
use taskmaster_server::task::{NewTask, TaskService, TaskServiceError};
use testcontainers_modules::{postgres, testcontainers};

mod common;

pub struct TestContext {
    #[allow(dead_code)] // container is kept to ensure it's not dropped
    pub container: testcontainers::ContainerAsync<postgres::Postgres>,
    pub db: DatabaseConnection,
}

async fn setup() -> anyhow::Result<TestContext> {
    let container = common::setup_container().await?;
    let db = common::setup_postgres_db(&container).await?;
    Ok(TestContext { db, container })
}

#[tokio::test]
#[ignore = "requires docker"]
async fn project_lifecycle_on_postgres() {
    let state = setup().await.expect("Failed to setup test context");
    let service = ProjectService::new(&state.db);

    let saved = service
        .save_project(NewProject::new("A", "d").with_task(NewTask::new("Old", "")))
        .await
        .expect("Failed to save project");
    assert!(saved.id() > 0);

    let updated = service
        .update_project(
            saved.id(),
            NewProject::new("B", "e")
                .with_task(NewTask::new("T1", ""))
                .with_task(NewTask::new("T2", "")),
        )
        .await
        .expect("Failed to update project");
    assert_eq!(updated.tasks().len(), 2);
    assert_eq!(
        service.get_project_by_id(saved.id()).await.unwrap(),
        Some(updated)
    );

    assert!(service.delete_project(saved.id()).await.unwrap());
    assert!(!service.delete_project(saved.id()).await.unwrap());
    let remaining = task::Entity::find()
        .filter(task::Column::ProjectId.eq(saved.id()))
        .count(&state.db)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}

#[tokio::test]
#[ignore = "requires docker"]
async fn task_foreign_key_is_checked_on_postgres() {
    let state = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&state.db);

    let result = service.save_task(NewTask::new("Orphan", "").in_project(1)).await;

    assert!(matches!(result, Err(TaskServiceError::ProjectNotFound(1))));
}
