use crate::project::{self, ProjectServiceError};
use crate::task::{self, TaskServiceError};
use crate::web::AppState;
use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use utoipa::{OpenApi, ToSchema};

/// JSON response for API errors
#[derive(serde::Serialize, serde::Deserialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Error type returned by the JSON API handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The addressed entity does not exist. Rendered as a 404 with an empty body.
    #[error("Not found")]
    NotFound,
    /// A task payload references a project that does not exist.
    #[error("Project with ID {0} not found")]
    UnknownProject(i32),
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::ProjectNotFound(_) => ApiError::NotFound,
            ProjectServiceError::Database(db_err) => ApiError::Database(db_err),
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::TaskNotFound(_) => ApiError::NotFound,
            TaskServiceError::ProjectNotFound(project_id) => ApiError::UnknownProject(project_id),
            TaskServiceError::Database(db_err) => ApiError::Database(db_err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::UnknownProject(project_id) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: "UNKNOWN_PROJECT".to_string(),
                    message: format!("Project with ID {} not found", project_id),
                }),
            )
                .into_response(),
            ApiError::Database(err) => {
                tracing::error!("Request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: "INTERNAL_ERROR".to_string(),
                        message: "An unexpected error occurred while processing your request. Please try again later.".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        project::api::v1::get_all_projects,
        project::api::v1::get_project_by_id,
        project::api::v1::create_project,
        project::api::v1::update_project,
        project::api::v1::delete_project,
        task::api::v1::get_all_tasks,
        task::api::v1::get_task_by_id,
        task::api::v1::create_task,
        task::api::v1::update_task,
        task::api::v1::delete_task_by_id,
    ),
    tags(
        (name = "Projects", description = "Project management"),
        (name = "Tasks", description = "Task management")
    )
)]
pub struct ApiDoc;

#[tracing::instrument]
async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(state: AppState) -> Router {
    let projects_router = project::api::v1::create_api_router(state.clone());
    let tasks_router = task::api::v1::create_api_router(state);
    Router::new()
        .nest("/api", projects_router.merge(tasks_router))
        .route("/api-docs/openapi.json", get(openapi_handler))
}
