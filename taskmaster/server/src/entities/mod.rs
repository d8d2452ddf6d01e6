//! sea-orm entities backing the project and task tables.

pub mod project;
pub mod task;
