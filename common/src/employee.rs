// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::task::{TaskPriority, TaskStatus, TaskType};

/// An employee of the firm. `employee_number` is the business key
/// (e.g. `EMP001`); `is_active` is the soft-delete flag.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Employee {
    pub id: i64,
    pub employee_number: String,
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,

    // Maximum hours per month, the denominator for overallocation checks.
    pub capacity_hours: i64,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or fully updating an employee.
/// `capacity_hours` defaults to 160 (8 hours x 20 workdays) when omitted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmployeePayload {
    pub employee_number: String,
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
    pub capacity_hours: Option<i64>,
}

/// One row of an employee's workload: an active task where the employee is
/// the primary assignee, joined with the client name and the hours booked
/// against it in the assignment table.
///
/// `assigned_hours` is `None` when no assignment row exists for the pair;
/// only assignment-table hours count towards capacity, `planned_hours`
/// does not.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct WorkloadTask {
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
    pub company_name: String,
    pub assigned_hours: Option<i64>,
}

/// Workload report for one employee. `available_capacity` may be negative:
/// that is the overallocation signal and must not be clamped.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct EmployeeWorkload {
    pub employee: Employee,
    pub tasks: Vec<WorkloadTask>,
    pub total_assigned_hours: i64,
    pub available_capacity: i64,
}
