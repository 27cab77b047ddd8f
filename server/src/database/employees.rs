// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::Utc;
use common::{Employee, EmployeePayload, EmployeeWorkload, TaskStatus, WorkloadTask};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Fallback monthly capacity: 8 hours x 20 workdays.
const DEFAULT_CAPACITY_HOURS: i64 = 160;

/// Retrieves all active employees, ordered by name.
pub async fn get_active_employees_from_db(pool: &SqlitePool) -> Result<Vec<Employee>> {
    let employees =
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE is_active = 1 ORDER BY name")
            .fetch_all(pool)
            .await
            .context("Failed to retrieve employees from DB")?;

    Ok(employees)
}

/// Retrieves an active employee by row id. Deactivated employees are not
/// addressable here; task joins still resolve their names.
pub async fn get_employee_from_db(pool: &SqlitePool, employee_id: i64) -> Result<Option<Employee>> {
    let employee =
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ? AND is_active = 1")
            .bind(employee_id)
            .fetch_optional(pool)
            .await
            .context("Failed to retrieve employee from DB")?;

    Ok(employee)
}

/// Inserts a new employee, falling back to the default monthly capacity
/// when none is given.
pub async fn create_employee_in_db(
    pool: &SqlitePool,
    payload: EmployeePayload,
) -> Result<Employee> {
    let capacity_hours = payload.capacity_hours.unwrap_or(DEFAULT_CAPACITY_HOURS);
    let now = Utc::now();

    debug!(
        "Insert values: employee_number={}, name={}, capacity_hours={}",
        payload.employee_number, payload.name, capacity_hours
    );

    let id = sqlx::query(
        "INSERT INTO employees (employee_number, name, email, department, capacity_hours, is_active, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(&payload.employee_number)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.department)
    .bind(capacity_hours)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert employee into DB")?
    .last_insert_rowid();

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to re-read inserted employee from DB")?;

    Ok(employee)
}

/// Full-record update of an employee. Returns `None` when the id matches
/// nothing.
pub async fn update_employee_in_db(
    pool: &SqlitePool,
    employee_id: i64,
    payload: EmployeePayload,
) -> Result<Option<Employee>> {
    let result = sqlx::query(
        "UPDATE employees \
         SET employee_number = ?, name = ?, email = ?, department = ?, \
             capacity_hours = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(&payload.employee_number)
    .bind(&payload.name)
    .bind(&payload.email)
    .bind(&payload.department)
    .bind(payload.capacity_hours.unwrap_or(DEFAULT_CAPACITY_HOURS))
    .bind(Utc::now())
    .bind(employee_id)
    .execute(pool)
    .await
    .context("Failed to update employee in DB")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let employee = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(employee_id)
        .fetch_one(pool)
        .await
        .context("Updated employee row went missing")?;

    Ok(Some(employee))
}

/// Soft deletes an employee by clearing the active flag.
pub async fn deactivate_employee_in_db(pool: &SqlitePool, employee_id: i64) -> Result<bool> {
    debug!("Attempting to deactivate employee with ID: {}", employee_id);

    let result = sqlx::query("UPDATE employees SET is_active = 0, updated_at = ? WHERE id = ?")
        .bind(Utc::now())
        .bind(employee_id)
        .execute(pool)
        .await
        .context("Failed to deactivate employee in DB")?;

    let rows_affected = result.rows_affected();
    info!(
        "Deactivated {} rows for employee ID: {}",
        rows_affected, employee_id
    );

    Ok(rows_affected > 0)
}

/// Sums the assignment-table hours of a workload. A task without an
/// assignment row contributes nothing, whatever its planned hours say.
pub fn total_assigned_hours(tasks: &[WorkloadTask]) -> i64 {
    tasks.iter().map(|t| t.assigned_hours.unwrap_or(0)).sum()
}

/// Builds the workload report for an active employee: every planned or
/// in-progress task where they are the primary assignee, each joined with
/// its assignment-table hours for that employee. Available capacity may go
/// negative; that is the overallocation signal.
pub async fn get_employee_workload_from_db(
    pool: &SqlitePool,
    employee_id: i64,
) -> Result<Option<EmployeeWorkload>> {
    let Some(employee) = get_employee_from_db(pool, employee_id).await? else {
        return Ok(None);
    };

    let tasks = sqlx::query_as::<_, WorkloadTask>(
        "SELECT t.id, t.task_id, t.client_id, t.name, t.description, t.task_type, t.status, \
                t.priority, t.planned_hours, t.actual_hours, t.start_date, t.end_date, \
                t.assigned_employee_id, c.company_name, ta.assigned_hours \
         FROM tasks t \
         JOIN clients c ON t.client_id = c.id \
         LEFT JOIN task_assignments ta ON t.id = ta.task_id AND ta.employee_id = ? \
         WHERE t.status IN (?, ?) AND t.assigned_employee_id = ? \
         ORDER BY t.end_date",
    )
    .bind(employee_id)
    .bind(TaskStatus::Planned)
    .bind(TaskStatus::InProgress)
    .bind(employee_id)
    .fetch_all(pool)
    .await
    .context("Failed to retrieve workload tasks from DB")?;

    let total = total_assigned_hours(&tasks);
    let available_capacity = employee.capacity_hours - total;

    Ok(Some(EmployeeWorkload {
        employee,
        tasks,
        total_assigned_hours: total,
        available_capacity,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_schema;
    use crate::database::clients::create_client_in_db;
    use crate::database::tasks::{assign_employee_in_db, create_task_in_db};
    use common::{ClientPayload, NewTask, TaskPriority, TaskType};

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory SQLite");
        create_schema(&pool).await.expect("Failed to create schema");
        pool
    }

    fn payload(number: &str, name: &str, capacity: Option<i64>) -> EmployeePayload {
        EmployeePayload {
            employee_number: number.to_string(),
            name: name.to_string(),
            email: None,
            department: Some("Audit".to_string()),
            capacity_hours: capacity,
        }
    }

    async fn seed_client(pool: &SqlitePool) -> i64 {
        create_client_in_db(
            pool,
            ClientPayload {
                client_id: "CL001".to_string(),
                company_name: "TechCorp BV".to_string(),
                contact_person: None,
                phone: None,
                email: None,
                address: None,
                industry: None,
            },
        )
        .await
        .unwrap()
        .id
    }

    fn new_task(client_id: i64, name: &str, employee_id: Option<i64>) -> NewTask {
        NewTask {
            task_id: None,
            client_id,
            name: name.to_string(),
            description: None,
            task_type: TaskType::Audit,
            planned_hours: 40,
            start_date: None,
            end_date: None,
            assigned_employee_id: employee_id,
            priority: TaskPriority::Medium,
        }
    }

    #[tokio::test]
    async fn test_create_applies_default_capacity() {
        let pool = setup_test_db().await;
        let employee = create_employee_in_db(&pool, payload("EMP001", "Sarah van der Berg", None))
            .await
            .unwrap();
        assert_eq!(employee.capacity_hours, 160);
        assert!(employee.is_active);
    }

    #[tokio::test]
    async fn test_deactivated_employee_is_not_addressable() {
        let pool = setup_test_db().await;
        let employee = create_employee_in_db(&pool, payload("EMP001", "Sarah", None))
            .await
            .unwrap();

        assert!(deactivate_employee_in_db(&pool, employee.id).await.unwrap());
        assert!(get_employee_from_db(&pool, employee.id).await.unwrap().is_none());
        assert!(get_active_employees_from_db(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_workload_sums_assignment_table_hours_only() {
        let pool = setup_test_db().await;
        let client_id = seed_client(&pool).await;
        let employee = create_employee_in_db(&pool, payload("EMP001", "Sarah", Some(160)))
            .await
            .unwrap();

        let first = create_task_in_db(&pool, new_task(client_id, "Annual accounts", Some(employee.id)))
            .await
            .unwrap();
        let second = create_task_in_db(&pool, new_task(client_id, "Q1 filing", Some(employee.id)))
            .await
            .unwrap();
        // Primary assignee set at creation, but never booked in the
        // assignment table: contributes 0 hours.
        create_task_in_db(&pool, new_task(client_id, "Advisory call", Some(employee.id)))
            .await
            .unwrap();

        assign_employee_in_db(&pool, first.id, employee.id, 50).await.unwrap();
        assign_employee_in_db(&pool, second.id, employee.id, 30).await.unwrap();

        let workload = get_employee_workload_from_db(&pool, employee.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(workload.tasks.len(), 3);
        assert_eq!(workload.total_assigned_hours, 80);
        assert_eq!(workload.available_capacity, 80);
    }

    #[tokio::test]
    async fn test_workload_without_assignment_rows_is_zero() {
        let pool = setup_test_db().await;
        let client_id = seed_client(&pool).await;
        let employee = create_employee_in_db(&pool, payload("EMP001", "Sarah", Some(160)))
            .await
            .unwrap();
        create_task_in_db(&pool, new_task(client_id, "Unbooked task", Some(employee.id)))
            .await
            .unwrap();

        let workload = get_employee_workload_from_db(&pool, employee.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(workload.tasks.len(), 1);
        assert_eq!(workload.total_assigned_hours, 0);
        assert_eq!(workload.available_capacity, 160);
    }

    #[tokio::test]
    async fn test_overallocation_goes_negative() {
        let pool = setup_test_db().await;
        let client_id = seed_client(&pool).await;
        let employee = create_employee_in_db(&pool, payload("EMP001", "Sarah", Some(40)))
            .await
            .unwrap();
        let task = create_task_in_db(&pool, new_task(client_id, "Big audit", Some(employee.id)))
            .await
            .unwrap();
        assign_employee_in_db(&pool, task.id, employee.id, 100).await.unwrap();

        let workload = get_employee_workload_from_db(&pool, employee.id)
            .await
            .unwrap()
            .unwrap();

        // Not clamped: negative capacity is the overallocation signal.
        assert_eq!(workload.available_capacity, -60);
    }

    #[tokio::test]
    async fn test_workload_for_unknown_employee_is_none() {
        let pool = setup_test_db().await;
        assert!(get_employee_workload_from_db(&pool, 77).await.unwrap().is_none());
    }

    #[test]
    fn test_total_assigned_hours_falls_back_to_zero() {
        let task = WorkloadTask {
            id: 1,
            task_id: "TASK001".to_string(),
            client_id: 1,
            name: "Audit".to_string(),
            description: None,
            task_type: TaskType::Audit,
            status: TaskStatus::Planned,
            priority: TaskPriority::Medium,
            planned_hours: 40,
            actual_hours: 0,
            start_date: None,
            end_date: None,
            assigned_employee_id: Some(1),
            company_name: "TechCorp BV".to_string(),
            assigned_hours: None,
        };
        let mut booked = task.clone();
        booked.assigned_hours = Some(25);

        assert_eq!(total_assigned_hours(&[task, booked]), 25);
    }
}
