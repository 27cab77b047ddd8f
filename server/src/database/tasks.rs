// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::Utc;
use common::{
    AssignmentDetail, NewTask, TaskDetails, TaskFilter, TaskStatus, TaskSummary, UpdateTaskPayload,
};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::{debug, info};

use crate::database::filter::push_task_filters;

/// Every task read joins the owning client (required) and the primary
/// assignee (optional, and deliberately unfiltered so soft-deleted
/// employees still resolve on historical tasks).
const TASK_SUMMARY_SELECT: &str = "SELECT t.*, c.company_name, c.client_id AS client_code, \
            e.name AS assigned_employee_name, e.employee_number \
     FROM tasks t \
     JOIN clients c ON t.client_id = c.id \
     LEFT JOIN employees e ON t.assigned_employee_id = e.id";

/// Formats a numeric suffix as a task business key, zero-padded to three
/// digits and growing naturally past `TASK999`.
pub fn format_task_id(suffix: i64) -> String {
    format!("TASK{:03}", suffix)
}

/// Derives the next free task identifier: one past the highest numeric
/// suffix currently stored. This is a read-then-write with no lock; the
/// UNIQUE constraint on `task_id` turns a concurrent collision into a
/// storage error instead of a silent duplicate.
pub async fn next_task_id_from_db(pool: &SqlitePool) -> Result<String> {
    let (max_suffix,): (Option<i64>,) =
        sqlx::query_as("SELECT MAX(CAST(SUBSTR(task_id, 5) AS INTEGER)) AS max_id FROM tasks")
            .fetch_one(pool)
            .await
            .context("Failed to read the highest task id from DB")?;

    Ok(format_task_id(max_suffix.unwrap_or(0) + 1))
}

async fn task_id_exists_in_db(pool: &SqlitePool, task_id: &str) -> Result<bool> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM tasks WHERE task_id = ?")
        .bind(task_id)
        .fetch_optional(pool)
        .await
        .context("Failed to check task id existence in DB")?;

    Ok(row.is_some())
}

/// Retrieves all tasks matching the filter, joined with their client and
/// assignee context, ordered by start date then creation time (newest
/// first within a day).
pub async fn get_tasks_from_db(pool: &SqlitePool, filter: &TaskFilter) -> Result<Vec<TaskSummary>> {
    let mut qb: QueryBuilder<'_, Sqlite> =
        QueryBuilder::new(format!("{TASK_SUMMARY_SELECT} WHERE 1=1"));
    push_task_filters(&mut qb, filter);
    qb.push(" ORDER BY t.start_date ASC, t.created_at DESC");

    let tasks = qb
        .build_query_as::<TaskSummary>()
        .fetch_all(pool)
        .await
        .context("Failed to retrieve tasks from DB")?;

    Ok(tasks)
}

/// Retrieves one task (with joined context) by row id.
pub async fn get_task_summary_from_db(
    pool: &SqlitePool,
    task_id: i64,
) -> Result<Option<TaskSummary>> {
    let task = sqlx::query_as::<_, TaskSummary>(&format!("{TASK_SUMMARY_SELECT} WHERE t.id = ?"))
        .bind(task_id)
        .fetch_optional(pool)
        .await
        .context("Failed to retrieve task from DB")?;

    Ok(task)
}

/// Retrieves one task plus its assignment rows.
pub async fn get_task_from_db(pool: &SqlitePool, task_id: i64) -> Result<Option<TaskDetails>> {
    let Some(task) = get_task_summary_from_db(pool, task_id).await? else {
        return Ok(None);
    };

    let assignments = sqlx::query_as::<_, AssignmentDetail>(
        "SELECT ta.id, ta.task_id, ta.employee_id, ta.assigned_hours, ta.assigned_date, \
                e.name, e.employee_number \
         FROM task_assignments ta \
         JOIN employees e ON ta.employee_id = e.id \
         WHERE ta.task_id = ?",
    )
    .bind(task_id)
    .fetch_all(pool)
    .await
    .context("Failed to retrieve task assignments from DB")?;

    Ok(Some(TaskDetails { task, assignments }))
}

/// Inserts a new task. A missing or already-taken task id is replaced by
/// the next free sequential one; new tasks start planned with zero actual
/// hours.
pub async fn create_task_in_db(pool: &SqlitePool, new_task: NewTask) -> Result<TaskSummary> {
    let task_id = match &new_task.task_id {
        Some(candidate) if !task_id_exists_in_db(pool, candidate).await? => candidate.clone(),
        _ => next_task_id_from_db(pool).await?,
    };

    let now = Utc::now();

    debug!(
        "Insert values: task_id={}, client_id={}, name={}, task_type={:?}, planned_hours={}",
        task_id, new_task.client_id, new_task.name, new_task.task_type, new_task.planned_hours
    );

    let id = sqlx::query(
        "INSERT INTO tasks (task_id, client_id, name, description, task_type, status, priority, \
                            planned_hours, actual_hours, start_date, end_date, \
                            assigned_employee_id, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0, ?, ?, ?, ?, ?)",
    )
    .bind(&task_id)
    .bind(new_task.client_id)
    .bind(&new_task.name)
    .bind(&new_task.description)
    .bind(new_task.task_type)
    .bind(TaskStatus::Planned)
    .bind(new_task.priority)
    .bind(new_task.planned_hours)
    .bind(new_task.start_date)
    .bind(new_task.end_date)
    .bind(new_task.assigned_employee_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert task into DB")?
    .last_insert_rowid();

    let task = get_task_summary_from_db(pool, id)
        .await?
        .context("Inserted task row went missing")?;

    Ok(task)
}

/// Full-record update of a task, including status and actual hours.
/// Returns `None` when the id matches nothing.
pub async fn update_task_in_db(
    pool: &SqlitePool,
    task_id: i64,
    payload: UpdateTaskPayload,
) -> Result<Option<TaskSummary>> {
    let result = sqlx::query(
        "UPDATE tasks \
         SET task_id = ?, name = ?, description = ?, task_type = ?, \
             status = ?, planned_hours = ?, actual_hours = ?, \
             start_date = ?, end_date = ?, assigned_employee_id = ?, \
             priority = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(&payload.task_id)
    .bind(&payload.name)
    .bind(&payload.description)
    .bind(payload.task_type)
    .bind(payload.status)
    .bind(payload.planned_hours)
    .bind(payload.actual_hours)
    .bind(payload.start_date)
    .bind(payload.end_date)
    .bind(payload.assigned_employee_id)
    .bind(payload.priority)
    .bind(Utc::now())
    .bind(task_id)
    .execute(pool)
    .await
    .context("Failed to update task in DB")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_task_summary_from_db(pool, task_id).await
}

/// Hard deletes a task, its assignment rows first so none are orphaned.
/// Returns true if a task was deleted.
pub async fn delete_task_from_db(pool: &SqlitePool, task_id: i64) -> Result<bool> {
    debug!("Attempting to delete task with ID: {}", task_id);

    sqlx::query("DELETE FROM task_assignments WHERE task_id = ?")
        .bind(task_id)
        .execute(pool)
        .await
        .context("Failed to delete task assignments from DB")?;

    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(task_id)
        .execute(pool)
        .await
        .context("Failed to delete task from DB")?;

    let rows_affected = result.rows_affected();
    info!("Deleted {} rows for task ID: {}", rows_affected, task_id);

    Ok(rows_affected > 0)
}

/// Books an employee onto a task: upserts the assignment row (unique per
/// task/employee pair) and makes the employee the task's primary assignee.
pub async fn assign_employee_in_db(
    pool: &SqlitePool,
    task_id: i64,
    employee_id: i64,
    assigned_hours: i64,
) -> Result<()> {
    let now = Utc::now();

    sqlx::query(
        "INSERT OR REPLACE INTO task_assignments \
             (task_id, employee_id, assigned_hours, assigned_date, created_at) \
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(task_id)
    .bind(employee_id)
    .bind(assigned_hours)
    .bind(now.date_naive())
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to upsert task assignment in DB")?;

    sqlx::query("UPDATE tasks SET assigned_employee_id = ? WHERE id = ?")
        .bind(employee_id)
        .bind(task_id)
        .execute(pool)
        .await
        .context("Failed to update the task's primary assignee in DB")?;

    Ok(())
}
