// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use common::{Employee, EmployeePayload, EmployeeWorkload};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

use crate::database;
use crate::handlers::AppError;

/// Handler for listing all active employees.
pub async fn list_employees(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees = database::employees::get_active_employees_from_db(&pool).await?;
    info!("Successfully retrieved {} employees.", employees.len());
    Ok(Json(employees))
}

/// Handler for fetching a single active employee by id.
pub async fn get_employee(
    State(pool): State<SqlitePool>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Employee>, AppError> {
    match database::employees::get_employee_from_db(&pool, employee_id).await? {
        Some(employee) => Ok(Json(employee)),
        None => Err(AppError::new(StatusCode::NOT_FOUND, "Employee not found")),
    }
}

/// Handler for creating a new employee.
pub async fn create_employee(
    State(pool): State<SqlitePool>,
    Json(payload): Json<EmployeePayload>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    debug!(
        "Received request to create employee: {}",
        payload.employee_number
    );
    if payload.employee_number.is_empty() || payload.name.is_empty() {
        error!("Validation failed: employee number or name is empty.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Employee number and name are required",
        ));
    }

    let employee = database::employees::create_employee_in_db(&pool, payload).await?;

    info!("Employee created successfully with ID: {}", employee.id);

    Ok((StatusCode::CREATED, Json(employee)))
}

/// Handler for fully updating an employee.
pub async fn update_employee(
    State(pool): State<SqlitePool>,
    Path(employee_id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> Result<Json<Employee>, AppError> {
    if payload.employee_number.is_empty() || payload.name.is_empty() {
        error!("Validation failed: employee number or name is empty.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Employee number and name are required",
        ));
    }

    match database::employees::update_employee_in_db(&pool, employee_id, payload).await? {
        Some(employee) => {
            info!("Employee with ID {} updated successfully.", employee_id);
            Ok(Json(employee))
        }
        None => Err(AppError::new(StatusCode::NOT_FOUND, "Employee not found")),
    }
}

/// Handler for soft-deleting an employee.
pub async fn delete_employee(
    State(pool): State<SqlitePool>,
    Path(employee_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deactivated = database::employees::deactivate_employee_in_db(&pool, employee_id).await?;

    if deactivated {
        info!("Employee with ID {} deactivated successfully.", employee_id);
        Ok(Json(serde_json::json!({
            "message": "Employee deactivated successfully"
        })))
    } else {
        error!("Employee with ID {} not found for deactivation.", employee_id);
        Err(AppError::new(StatusCode::NOT_FOUND, "Employee not found"))
    }
}

/// Handler for the workload/capacity report of one employee.
pub async fn get_employee_workload(
    State(pool): State<SqlitePool>,
    Path(employee_id): Path<i64>,
) -> Result<Json<EmployeeWorkload>, AppError> {
    match database::employees::get_employee_workload_from_db(&pool, employee_id).await? {
        Some(workload) => {
            info!(
                "Workload for employee {}: {} assigned hours, {} available.",
                employee_id, workload.total_assigned_hours, workload.available_capacity
            );
            Ok(Json(workload))
        }
        None => Err(AppError::new(StatusCode::NOT_FOUND, "Employee not found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_employee_validation_empty_number() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let payload = Json(EmployeePayload {
            employee_number: "".to_string(),
            name: "Sarah van der Berg".to_string(),
            email: None,
            department: None,
            capacity_hours: None,
        });

        let result = create_employee(State(pool), payload).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Employee number and name are required");
    }
}
