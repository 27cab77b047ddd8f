// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The recurring compliance work the firm performs for its clients.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    QuarterlyAdmin,
    BtwIcp,
    Salaries,
    AnnualAccounts,
    Advisory,
    Secretarial,
    Audit,
    Payroll,
}

impl TaskType {
    pub const ALL: [TaskType; 8] = [
        TaskType::QuarterlyAdmin,
        TaskType::BtwIcp,
        TaskType::Salaries,
        TaskType::AnnualAccounts,
        TaskType::Advisory,
        TaskType::Secretarial,
        TaskType::Audit,
        TaskType::Payroll,
    ];

    /// The wire value, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::QuarterlyAdmin => "quarterly_admin",
            TaskType::BtwIcp => "btw_icp",
            TaskType::Salaries => "salaries",
            TaskType::AnnualAccounts => "annual_accounts",
            TaskType::Advisory => "advisory",
            TaskType::Secretarial => "secretarial",
            TaskType::Audit => "audit",
            TaskType::Payroll => "payroll",
        }
    }

    /// Human-readable label for UI selectors.
    pub fn label(&self) -> &'static str {
        match self {
            TaskType::QuarterlyAdmin => "Quarterly Administration",
            TaskType::BtwIcp => "BTW/ICP Filings",
            TaskType::Salaries => "Salaries Processing",
            TaskType::AnnualAccounts => "Annual Accounts",
            TaskType::Advisory => "Advisory Services",
            TaskType::Secretarial => "Secretarial Services",
            TaskType::Audit => "Audit/Review",
            TaskType::Payroll => "Payroll Processing",
        }
    }
}

/// Progress state of a task. New tasks start as `Planned`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
    OnHold,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 5] = [
        TaskStatus::Planned,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
        TaskStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Planned => "planned",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
            TaskStatus::OnHold => "on_hold",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Planned => "Planned",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
            TaskStatus::Cancelled => "Cancelled",
            TaskStatus::OnHold => "On Hold",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

/// A fixed `{value, label}` pair for populating UI selectors.
#[derive(Serialize, Debug, Clone)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// A task exactly as stored, without joined context.
///
/// `task_id` is the business key (`TASK###`). `start_date`/`end_date` span
/// the task on the calendar; `end_date >= start_date` is expected but not
/// enforced. `assigned_employee_id` is the primary assignee and may point
/// at a soft-deleted employee.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Task {
    pub id: i64,
    pub task_id: String,
    pub client_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub planned_hours: i64,
    pub actual_hours: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_employee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A task joined with the context the UI tables need: the client's company
/// name and business key, and the primary assignee's name and number when
/// one is set.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct TaskSummary {
    pub id: i64,
    pub task_id: String,
    pub client_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub planned_hours: i64,
    pub actual_hours: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_employee_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company_name: String,
    pub client_code: String,
    pub assigned_employee_name: Option<String>,
    pub employee_number: Option<String>,
}

/// One row of the task/employee assignment table. Unique per
/// (task, employee) pair; `assigned_hours` is what workload reporting sums.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct TaskAssignment {
    pub id: i64,
    pub task_id: i64,
    pub employee_id: i64,
    pub assigned_hours: i64,
    pub assigned_date: NaiveDate,
}

/// An assignment row joined with the employee it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct AssignmentDetail {
    pub id: i64,
    pub task_id: i64,
    pub employee_id: i64,
    pub assigned_hours: i64,
    pub assigned_date: NaiveDate,
    pub name: String,
    pub employee_number: String,
}

/// Full view of a single task: the joined summary plus its assignment rows.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TaskDetails {
    #[serde(flatten)]
    pub task: TaskSummary,
    pub assignments: Vec<AssignmentDetail>,
}

/// Body for creating a task. The required fields are optional here so the
/// handler can answer a missing one with a descriptive validation error
/// instead of a deserialization failure. A supplied `task_id` is only a
/// suggestion: if it is taken, the server allocates the next free one.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateTaskPayload {
    pub task_id: Option<String>,
    pub client_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub task_type: Option<TaskType>,
    pub planned_hours: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_employee_id: Option<i64>,
    pub priority: Option<TaskPriority>,
}

/// A validated task creation: what remains after the handler has checked
/// the required fields and applied the defaults.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub task_id: Option<String>,
    pub client_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub task_type: TaskType,
    pub planned_hours: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_employee_id: Option<i64>,
    pub priority: TaskPriority,
}

/// Body for fully updating a task. Unlike creation this is a plain
/// full-record replace, so the non-nullable columns are required outright.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UpdateTaskPayload {
    pub task_id: String,
    pub name: String,
    pub description: Option<String>,
    pub task_type: TaskType,
    pub status: TaskStatus,
    pub planned_hours: i64,
    pub actual_hours: i64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assigned_employee_id: Option<i64>,
    pub priority: TaskPriority,
}

/// Body for booking an employee onto a task.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssignPayload {
    pub employee_id: Option<i64>,
    pub assigned_hours: Option<i64>,
}

/// Optional criteria for the task list. Every supplied criterion must
/// match; `month` is only meaningful together with `year`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct TaskFilter {
    pub client_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub status: Option<TaskStatus>,
    pub task_type: Option<TaskType>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}
