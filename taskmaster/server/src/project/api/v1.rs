use crate::project::{NewProject, Project, ProjectService};
use crate::task::api::v1::{TaskJson, TaskPayload};
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

/// JSON representation of a Project for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectJson {
    /// Unique identifier for the project
    id: i32,
    /// Name of the project
    name: String,
    /// Description of the project
    description: String,
    /// Tasks owned by the project
    tasks: Vec<TaskJson>,
}

impl From<Project> for ProjectJson {
    fn from(project: Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_string(),
            description: project.description().to_string(),
            tasks: project.into_tasks().into_iter().map(TaskJson::from).collect(),
        }
    }
}

/// JSON request payload for creating or replacing a project.
///
/// Any `id` in the payload is ignored, as is the `id` of each nested task.
/// A missing or `null` description or task list is treated as empty.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProjectPayload {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    tasks: Option<Vec<TaskPayload>>,
}

impl From<ProjectPayload> for NewProject {
    fn from(payload: ProjectPayload) -> Self {
        Self {
            name: payload.name,
            description: payload.description.unwrap_or_default(),
            tasks: payload
                .tasks
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// Handler for GET /api/projects - Returns all projects with their tasks.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "Successfully retrieved projects", body = Vec<ProjectJson>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn get_all_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectJson>>, ApiError> {
    let service = ProjectService::new(&state.db);
    let projects = service.get_all_projects().await?;
    Ok(Json(projects.into_iter().map(ProjectJson::from).collect()))
}

/// Handler for GET /api/projects/{id}.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project found", body = ProjectJson),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn get_project_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProjectJson>, ApiError> {
    let service = ProjectService::new(&state.db);
    match service.get_project_by_id(id).await? {
        Some(project) => Ok(Json(ProjectJson::from(project))),
        None => Err(ApiError::NotFound),
    }
}

/// Handler for POST /api/projects - Stores a project and its nested tasks.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    post,
    path = "/api/projects",
    request_body = ProjectPayload,
    responses(
        (status = 200, description = "Project created", body = ProjectJson),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn create_project(
    State(state): State<AppState>,
    Json(payload): Json<ProjectPayload>,
) -> Result<Json<ProjectJson>, ApiError> {
    let service = ProjectService::new(&state.db);
    let project = service.save_project(payload.into()).await?;
    tracing::info!(
        "Created project {} with {} task(s)",
        project.id(),
        project.tasks().len()
    );
    Ok(Json(ProjectJson::from(project)))
}

/// Handler for PUT /api/projects/{id}.
///
/// Overwrites name and description and replaces the whole task collection:
/// tasks missing from the payload are deleted and payload tasks are stored as new tasks.
#[tracing::instrument(skip(state, payload))]
#[utoipa::path(
    put,
    path = "/api/projects/{id}",
    params(("id" = i32, Path, description = "Project ID")),
    request_body = ProjectPayload,
    responses(
        (status = 200, description = "Project updated", body = ProjectJson),
        (status = 404, description = "Project not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<ProjectPayload>,
) -> Result<Json<ProjectJson>, ApiError> {
    let service = ProjectService::new(&state.db);
    let project = service.update_project(id, payload.into()).await?;
    Ok(Json(ProjectJson::from(project)))
}

/// Handler for DELETE /api/projects/{id}. Responds 204 whether or not the project existed.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted or already absent"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Projects"
)]
pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let service = ProjectService::new(&state.db);
    service.delete_project(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Creates and returns the projects API router.
pub fn create_api_router(state: AppState) -> Router {
    Router::new()
        .route("/projects", get(get_all_projects).post(create_project))
        .route(
            "/projects/{id}",
            get(get_project_by_id)
                .put(update_project)
                .delete(delete_project),
        )
        .with_state(state)
}
