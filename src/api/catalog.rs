//! Reference Data
//!
//! Catalog lookups used to populate selects: employees, lands, and the
//! task catalog.

use super::get_list;
use crate::models::{Employee, Land, TaskKind};

pub async fn list_employees() -> Result<Vec<Employee>, String> {
    get_list("/api/employees/").await
}

pub async fn list_lands() -> Result<Vec<Land>, String> {
    get_list("/api/lands/").await
}

pub async fn list_task_kinds() -> Result<Vec<TaskKind>, String> {
    get_list("/api/tasks/").await
}
