use crate::entities::*;
use crate::task::{NewTask, Task};
use sea_orm::*;

pub mod api;

/// A project together with the tasks it owns, ordered by task ID.
#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Project {
    id: i32,
    name: String,
    description: String,
    tasks: Vec<Task>,
}

impl Project {
    pub fn new(id: i32, name: String, description: String, tasks: Vec<Task>) -> Self {
        Self {
            id,
            name,
            description,
            tasks,
        }
    }

    /// Returns the ID of the project.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Returns the name of the project.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description of the project.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the tasks owned by the project.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    fn from_models(model: project::Model, task_models: Vec<task::Model>) -> Self {
        let mut tasks: Vec<Task> = task_models.into_iter().map(Task::from).collect();
        tasks.sort_by_key(Task::id);
        Project::new(model.id, model.name, model.description, tasks)
    }
}

/// Field values for a project that has not been stored yet, or that replace a stored one.
///
/// The `project_id` of each nested task is ignored; nested tasks always belong to this project.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub tasks: Vec<NewTask>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tasks: Vec::new(),
        }
    }

    pub fn with_task(mut self, task: NewTask) -> Self {
        self.tasks.push(task);
        self
    }
}

/// Error type for ProjectService operations.
#[derive(Debug, thiserror::Error)]
pub enum ProjectServiceError {
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
    /// Represents a project not found error.
    #[error("Project with ID {0} not found")]
    ProjectNotFound(i32),
}

pub struct ProjectService<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl ProjectService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> ProjectService<'_> {
        ProjectService { db }
    }

    /// Retrieves all projects with their tasks, ordered by project ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_projects(&self) -> Result<Vec<Project>, ProjectServiceError> {
        let projects = project::Entity::find()
            .find_with_related(task::Entity)
            .order_by_asc(project::Column::Id)
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(|(model, tasks)| Project::from_models(model, tasks))
            .collect();
        Ok(projects)
    }

    /// Retrieves a project and its tasks by the project ID.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no project has the given ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_project_by_id(&self, id: i32) -> Result<Option<Project>, ProjectServiceError> {
        let Some(model) = project::Entity::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };
        let tasks = model
            .find_related(task::Entity)
            .order_by_asc(task::Column::Id)
            .all(self.db)
            .await?;
        Ok(Some(Project::from_models(model, tasks)))
    }

    /// Creates a new project along with any nested tasks, in one transaction.
    ///
    /// # Arguments
    ///
    /// * `new_project` - The project fields and its initial tasks. IDs are generated by the
    ///   database.
    ///
    /// # Returns
    ///
    /// The stored project including the generated project and task IDs.
    #[tracing::instrument(skip(self))]
    pub async fn save_project(
        &self,
        new_project: NewProject,
    ) -> Result<Project, ProjectServiceError> {
        let txn = self.db.begin().await?;

        let active_model = project::ActiveModel {
            name: ActiveValue::Set(new_project.name),
            description: ActiveValue::Set(new_project.description),
            ..Default::default()
        };
        let created_model = active_model.insert(&txn).await?;
        let tasks = insert_owned_tasks(&txn, created_model.id, new_project.tasks).await?;

        txn.commit().await?;
        Ok(Project::from_models(created_model, tasks))
    }

    /// Replaces a project's name, description and complete task collection.
    ///
    /// Every task currently owned by the project is deleted and every task in
    /// `details` is inserted as a new task, so tasks omitted from `details` are
    /// removed. Runs in one transaction.
    ///
    /// # Returns
    ///
    /// The updated project, or `ProjectNotFound` if no project has the given ID.
    #[tracing::instrument(skip(self))]
    pub async fn update_project(
        &self,
        id: i32,
        details: NewProject,
    ) -> Result<Project, ProjectServiceError> {
        let txn = self.db.begin().await?;

        let project_to_update = project::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(id))?;

        let mut active_model: project::ActiveModel = project_to_update.into();
        active_model.name = ActiveValue::Set(details.name);
        active_model.description = ActiveValue::Set(details.description);
        let updated_model = active_model.update(&txn).await?;

        let removed = task::Entity::delete_many()
            .filter(task::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        let tasks = insert_owned_tasks(&txn, id, details.tasks).await?;
        tracing::debug!(
            "Replaced {} task(s) of project {} with {}",
            removed.rows_affected,
            id,
            tasks.len()
        );

        txn.commit().await?;
        Ok(Project::from_models(updated_model, tasks))
    }

    /// Deletes a project and the tasks it owns. Deleting an ID that does not exist is a no-op.
    ///
    /// # Returns
    ///
    /// `true` if a project was removed.
    #[tracing::instrument(skip(self))]
    pub async fn delete_project(&self, id: i32) -> Result<bool, ProjectServiceError> {
        let txn = self.db.begin().await?;

        task::Entity::delete_many()
            .filter(task::Column::ProjectId.eq(id))
            .exec(&txn)
            .await?;
        let result = project::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        if result.rows_affected == 0 {
            tracing::debug!("No project with ID {} to delete", id);
        }
        Ok(result.rows_affected > 0)
    }
}

async fn insert_owned_tasks<C: ConnectionTrait>(
    conn: &C,
    project_id: i32,
    tasks: Vec<NewTask>,
) -> Result<Vec<task::Model>, DbErr> {
    let mut created = Vec::with_capacity(tasks.len());
    for new_task in tasks {
        created.push(new_task.into_owned_active_model(project_id).insert(conn).await?);
    }
    Ok(created)
}
