use crate::task::{DEFAULT_STATUS, NewTask, Task, TaskService};
use crate::web::AppState;
use crate::web::api::{ApiError, ErrorResponse};
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskJson {
    /// Unique identifier for the task
    id: i32,
    /// Short name of the task
    name: String,
    /// Free-form description
    description: String,
    /// Opaque status label
    status: String,
    /// Project owning the task, if any
    project_id: Option<i32>,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            name: task.name().to_string(),
            description: task.description().to_string(),
            status: task.status().to_string(),
            project_id: task.project_id(),
        }
    }
}

/// JSON request payload for creating or replacing a task.
///
/// Any `id` in the payload is ignored. A missing or `null` description
/// becomes empty and a missing or `null` status becomes `TODO`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TaskPayload {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    project_id: Option<i32>,
}

impl From<TaskPayload> for NewTask {
    fn from(payload: TaskPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description.unwrap_or_default(),
            status: payload.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            project_id: payload.project_id,
        }
    }
}

/// Handler for GET /api/tasks - Returns all tasks.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = Vec<TaskJson>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_all_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskJson>>, ApiError> {
    let service = TaskService::new(&state.db);
    let tasks = service.get_all_tasks().await?;
    Ok(Json(tasks.into_iter().map(TaskJson::from).collect()))
}

/// Handler for GET /api/tasks/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task found", body = TaskJson),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<TaskJson>, ApiError> {
    let service = TaskService::new(&state.db);
    match service.get_task_by_id(id).await? {
        Some(task) => Ok(Json(TaskJson::from(task))),
        None => Err(ApiError::NotFound),
    }
}

/// Handler for POST /api/tasks.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = TaskPayload,
    responses(
        (status = 200, description = "Task created", body = TaskJson),
        (status = 422, description = "Referenced project does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task(
    State(state): State<AppState>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<TaskJson>, ApiError> {
    let service = TaskService::new(&state.db);
    let task = service.save_task(payload.into()).await?;
    tracing::info!("Created task {}", task.id());
    Ok(Json(TaskJson::from(task)))
}

/// Handler for PUT /api/tasks/{id} - Overwrites every field of the task.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = TaskPayload,
    responses(
        (status = 200, description = "Task updated", body = TaskJson),
        (status = 404, description = "Task not found"),
        (status = 422, description = "Referenced project does not exist", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<TaskPayload>,
) -> Result<Json<TaskJson>, ApiError> {
    let service = TaskService::new(&state.db);
    let task = service.update_task(id, payload.into()).await?;
    Ok(Json(TaskJson::from(task)))
}

/// Handler for DELETE /api/tasks/{id}. Responds 204 whether or not the task existed.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Task deleted or already absent"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let service = TaskService::new(&state.db);
    service.delete_task_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Creates and returns the tasks API router.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/tasks", get(get_all_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task_by_id)
                .put(update_task)
                .delete(delete_task_by_id),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_defaults_missing_fields() {
        let payload: TaskPayload = serde_json::from_str(r#"{"name":"Plan sprint"}"#).unwrap();
        let new_task = NewTask::from(payload);

        assert_eq!(new_task, NewTask::new("Plan sprint", ""));
    }

    #[test]
    fn payload_ignores_client_supplied_id() {
        let payload: TaskPayload = serde_json::from_str(
            r#"{"id":42,"name":"Plan sprint","description":"Q3","status":"DONE","project_id":1}"#,
        )
        .unwrap();
        let new_task = NewTask::from(payload);

        assert_eq!(
            new_task,
            NewTask::new("Plan sprint", "Q3").with_status("DONE").in_project(1)
        );
    }

    #[test]
    fn payload_treats_null_fields_as_defaults() {
        let payload: TaskPayload = serde_json::from_str(
            r#"{"name":"Plan sprint","description":null,"status":null,"project_id":null}"#,
        )
        .unwrap();
        let new_task = NewTask::from(payload);

        assert_eq!(new_task, NewTask::new("Plan sprint", ""));
    }

    #[test]
    fn payload_requires_name() {
        let result = serde_json::from_str::<TaskPayload>(r#"{"description":"no name"}"#);
        assert!(result.is_err());
    }
}
