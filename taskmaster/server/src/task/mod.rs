use crate::entities::*;
use sea_orm::*;

pub mod api;

/// Status given to tasks whose payload does not carry one.
pub const DEFAULT_STATUS: &str = "TODO";

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Task {
    id: i32,
    name: String,
    description: String,
    status: String,
    project_id: Option<i32>,
}

impl Task {
    pub fn new(
        id: i32,
        name: String,
        description: String,
        status: String,
        project_id: Option<i32>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            status,
            project_id,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the name of the task.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description of the task.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status of the task. The value is opaque to the service.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns the ID of the owning project, if any.
    pub fn project_id(&self) -> Option<i32> {
        self.project_id
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(
            model.id,
            model.name,
            model.description,
            model.status,
            model.project_id,
        )
    }
}

/// Field values for a task that has not been stored yet, or that overwrite a stored one.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct NewTask {
    pub name: String,
    pub description: String,
    pub status: String,
    pub project_id: Option<i32>,
}

impl NewTask {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            status: DEFAULT_STATUS.to_string(),
            project_id: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn in_project(mut self, project_id: i32) -> Self {
        self.project_id = Some(project_id);
        self
    }

    /// Builds an insertable row owned by `project_id`, ignoring any project set on `self`.
    pub(crate) fn into_owned_active_model(self, project_id: i32) -> task::ActiveModel {
        task::ActiveModel {
            name: ActiveValue::Set(self.name),
            description: ActiveValue::Set(self.description),
            status: ActiveValue::Set(self.status),
            project_id: ActiveValue::Set(Some(project_id)),
            ..Default::default()
        }
    }
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    /// Represents a task not found error.
    #[error("Task with ID {0} not found")]
    TaskNotFound(i32),
    /// The task references a project that does not exist.
    #[error("Project with ID {0} not found")]
    ProjectNotFound(i32),
}

pub struct TaskService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService<'_> {
        TaskService { db }
    }

    /// Retrieves all tasks, regardless of the project they belong to.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = task::Entity::find()
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Retrieves a task by its ID.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no task has the given ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_task_by_id(&self, id: i32) -> Result<Option<Task>, TaskServiceError> {
        let task = task::Entity::find_by_id(id).one(self.db).await?;
        Ok(task.map(Task::from))
    }

    /// Creates a new task.
    ///
    /// # Arguments
    ///
    /// * `new_task` - The field values of the task. The ID is generated by the database.
    ///
    /// # Returns
    ///
    /// The stored task, or `ProjectNotFound` if `new_task.project_id` names no project.
    #[tracing::instrument(skip(self))]
    pub async fn save_task(&self, new_task: NewTask) -> Result<Task, TaskServiceError> {
        self.ensure_project_exists(new_task.project_id).await?;

        let active_model = task::ActiveModel {
            name: ActiveValue::Set(new_task.name),
            description: ActiveValue::Set(new_task.description),
            status: ActiveValue::Set(new_task.status),
            project_id: ActiveValue::Set(new_task.project_id),
            ..Default::default()
        };
        let created_model = active_model.insert(self.db).await?;
        Ok(Task::from(created_model))
    }

    /// Overwrites every field of an existing task.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(&self, id: i32, details: NewTask) -> Result<Task, TaskServiceError> {
        let task_to_update = task::Entity::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        self.ensure_project_exists(details.project_id).await?;

        let mut active_model: task::ActiveModel = task_to_update.into();
        active_model.name = ActiveValue::Set(details.name);
        active_model.description = ActiveValue::Set(details.description);
        active_model.status = ActiveValue::Set(details.status);
        active_model.project_id = ActiveValue::Set(details.project_id);
        let updated_model = active_model.update(self.db).await?;

        Ok(Task::from(updated_model))
    }

    /// Deletes a task by its ID. Deleting an ID that does not exist is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if a task was removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task_by_id(&self, id: i32) -> Result<bool, TaskServiceError> {
        let result = task::Entity::delete_by_id(id).exec(self.db).await?;
        if result.rows_affected == 0 {
            tracing::debug!("No task with ID {} to delete", id);
        }
        Ok(result.rows_affected > 0)
    }

    async fn ensure_project_exists(&self, project_id: Option<i32>) -> Result<(), TaskServiceError> {
        let Some(project_id) = project_id else {
            return Ok(());
        };
        let project = project::Entity::find_by_id(project_id).one(self.db).await?;
        match project {
            Some(_) => Ok(()),
            None => Err(TaskServiceError::ProjectNotFound(project_id)),
        }
    }
}
