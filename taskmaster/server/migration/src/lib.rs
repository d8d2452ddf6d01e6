pub use sea_orm_migration::prelude::*;

mod m20251018_000001_create_projects_table;
mod m20251018_000002_create_tasks_table;
mod m20251018_000003_add_tasks_project_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251018_000001_create_projects_table::Migration),
            Box::new(m20251018_000002_create_tasks_table::Migration),
            Box::new(m20251018_000003_add_tasks_project_index::Migration),
        ]
    }
}
