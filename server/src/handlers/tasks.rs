// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use common::{
    AssignPayload, CreateTaskPayload, NewTask, SelectOption, TaskDetails, TaskFilter, TaskPriority,
    TaskStatus, TaskSummary, TaskType, UpdateTaskPayload,
};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

use crate::database;
use crate::handlers::AppError;

/// Handler for listing tasks, filtered by any combination of client,
/// assignee, status, type and month/year window.
pub async fn list_tasks(
    State(pool): State<SqlitePool>,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<Vec<TaskSummary>>, AppError> {
    let tasks = database::tasks::get_tasks_from_db(&pool, &filter).await?;
    info!("Successfully retrieved {} tasks.", tasks.len());
    Ok(Json(tasks))
}

/// Handler for fetching a single task with its assignment rows.
pub async fn get_task(
    State(pool): State<SqlitePool>,
    Path(task_id): Path<i64>,
) -> Result<Json<TaskDetails>, AppError> {
    match database::tasks::get_task_from_db(&pool, task_id).await? {
        Some(details) => Ok(Json(details)),
        None => Err(AppError::new(StatusCode::NOT_FOUND, "Task not found")),
    }
}

/// Checks the required creation fields and applies the defaults. An empty
/// name or task id counts as absent.
fn validate_create(payload: CreateTaskPayload) -> Option<NewTask> {
    let client_id = payload.client_id?;
    let name = payload.name.filter(|name| !name.is_empty())?;
    let task_type = payload.task_type?;
    let planned_hours = payload.planned_hours?;

    Some(NewTask {
        task_id: payload.task_id.filter(|id| !id.is_empty()),
        client_id,
        name,
        description: payload.description,
        task_type,
        planned_hours,
        start_date: payload.start_date,
        end_date: payload.end_date,
        assigned_employee_id: payload.assigned_employee_id,
        priority: payload.priority.unwrap_or(TaskPriority::Medium),
    })
}

/// Handler for creating a new task.
pub async fn create_task(
    State(pool): State<SqlitePool>,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<(StatusCode, Json<TaskSummary>), AppError> {
    debug!("Received request to create task: {:?}", payload.name);

    let Some(new_task) = validate_create(payload) else {
        error!("Validation failed: missing required task fields.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Client ID, name, task type, and planned hours are required",
        ));
    };

    let task = database::tasks::create_task_in_db(&pool, new_task).await?;

    info!("Task created successfully with ID: {}", task.task_id);

    Ok((StatusCode::CREATED, Json(task)))
}

/// Handler for fully updating a task, including status and actual hours.
pub async fn update_task(
    State(pool): State<SqlitePool>,
    Path(task_id): Path<i64>,
    Json(payload): Json<UpdateTaskPayload>,
) -> Result<Json<TaskSummary>, AppError> {
    match database::tasks::update_task_in_db(&pool, task_id, payload).await? {
        Some(task) => {
            info!("Task with ID {} updated successfully.", task_id);
            Ok(Json(task))
        }
        None => Err(AppError::new(StatusCode::NOT_FOUND, "Task not found")),
    }
}

/// Handler for hard-deleting a task and its assignments.
pub async fn delete_task(
    State(pool): State<SqlitePool>,
    Path(task_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = database::tasks::delete_task_from_db(&pool, task_id).await?;

    if deleted {
        info!("Task with ID {} deleted successfully.", task_id);
        Ok(Json(serde_json::json!({
            "message": "Task deleted successfully"
        })))
    } else {
        error!("Task with ID {} not found for deletion.", task_id);
        Err(AppError::new(StatusCode::NOT_FOUND, "Task not found"))
    }
}

/// Handler for booking an employee onto a task.
pub async fn assign_employee(
    State(pool): State<SqlitePool>,
    Path(task_id): Path<i64>,
    Json(payload): Json<AssignPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (Some(employee_id), Some(assigned_hours)) = (payload.employee_id, payload.assigned_hours)
    else {
        error!("Validation failed: employee ID or assigned hours missing.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Employee ID and assigned hours are required",
        ));
    };

    database::tasks::assign_employee_in_db(&pool, task_id, employee_id, assigned_hours).await?;

    info!(
        "Assigned employee {} to task {} for {} hours.",
        employee_id, task_id, assigned_hours
    );

    Ok(Json(serde_json::json!({
        "message": "Employee assigned successfully"
    })))
}

/// Handler for the fixed task-type options used by UI selectors.
pub async fn list_task_types() -> Json<Vec<SelectOption>> {
    Json(
        TaskType::ALL
            .iter()
            .map(|task_type| SelectOption {
                value: task_type.as_str(),
                label: task_type.label(),
            })
            .collect(),
    )
}

/// Handler for the fixed status options used by UI selectors.
pub async fn list_task_statuses() -> Json<Vec<SelectOption>> {
    Json(
        TaskStatus::ALL
            .iter()
            .map(|status| SelectOption {
                value: status.as_str(),
                label: status.label(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> CreateTaskPayload {
        CreateTaskPayload {
            task_id: None,
            client_id: Some(1),
            name: Some("Year-end close".to_string()),
            description: None,
            task_type: Some(TaskType::AnnualAccounts),
            planned_hours: Some(40),
            start_date: None,
            end_date: None,
            assigned_employee_id: None,
            priority: None,
        }
    }

    #[test]
    fn test_validate_create_applies_defaults() {
        let new_task = validate_create(full_payload()).unwrap();
        assert_eq!(new_task.priority, TaskPriority::Medium);
        assert!(new_task.task_id.is_none());
    }

    #[test]
    fn test_validate_create_rejects_missing_required_fields() {
        let mut missing_client = full_payload();
        missing_client.client_id = None;
        assert!(validate_create(missing_client).is_none());

        let mut empty_name = full_payload();
        empty_name.name = Some("".to_string());
        assert!(validate_create(empty_name).is_none());

        let mut missing_hours = full_payload();
        missing_hours.planned_hours = None;
        assert!(validate_create(missing_hours).is_none());
    }

    #[test]
    fn test_validate_create_drops_empty_task_id_suggestion() {
        let mut payload = full_payload();
        payload.task_id = Some("".to_string());
        let new_task = validate_create(payload).unwrap();
        assert!(new_task.task_id.is_none());
    }

    #[tokio::test]
    async fn test_create_task_validation_missing_fields() {
        // The validation fails before any DB access.
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let mut payload = full_payload();
        payload.task_type = None;

        let result = create_task(State(pool), Json(payload)).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert_eq!(
            err.message,
            "Client ID, name, task type, and planned hours are required"
        );
    }

    #[tokio::test]
    async fn test_assign_validation_missing_hours() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = Json(AssignPayload {
            employee_id: Some(1),
            assigned_hours: None,
        });

        let result = assign_employee(State(pool), Path(1), payload).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Employee ID and assigned hours are required");
    }

    #[tokio::test]
    async fn test_meta_options_are_complete() {
        let Json(types) = list_task_types().await;
        assert_eq!(types.len(), 8);
        assert!(types.iter().any(|o| o.value == "btw_icp" && o.label == "BTW/ICP Filings"));

        let Json(statuses) = list_task_statuses().await;
        assert_eq!(statuses.len(), 5);
        assert!(statuses.iter().any(|o| o.value == "on_hold" && o.label == "On Hold"));
    }
}
