// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Translation of a [`TaskFilter`] into SQL predicates. The construction
//! is kept separate from the queries so it can be tested without touching
//! the storage engine.

use chrono::NaiveDate;
use common::TaskFilter;
use sqlx::{QueryBuilder, Sqlite};

/// First and last day of a calendar month. `None` when the pair does not
/// name a real calendar month (e.g. month 13).
pub fn month_window(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}

/// First and last day of a calendar year.
pub fn year_window(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Appends one `AND` clause per supplied criterion to a query that already
/// ends in a `WHERE` clause.
///
/// The month/year window predicate matches a task whose span overlaps the
/// window, or whose start falls inside it. The second disjunct is subsumed
/// by the first for any task with `start <= end`; it is kept so a reversed
/// span still matches through its start date. A task with no overlap at
/// all never matches.
pub fn push_task_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TaskFilter) {
    if let Some(client_id) = filter.client_id {
        qb.push(" AND t.client_id = ").push_bind(client_id);
    }
    if let Some(employee_id) = filter.employee_id {
        qb.push(" AND t.assigned_employee_id = ").push_bind(employee_id);
    }
    if let Some(status) = filter.status {
        qb.push(" AND t.status = ").push_bind(status);
    }
    if let Some(task_type) = filter.task_type {
        qb.push(" AND t.task_type = ").push_bind(task_type);
    }

    // A month on its own is ignored; a year on its own spans the calendar year.
    let window = match (filter.year, filter.month) {
        (Some(year), Some(month)) => Some(month_window(year, month)),
        (Some(year), None) => Some(year_window(year)),
        _ => None,
    };
    match window {
        Some(Some((window_start, window_end))) => {
            qb.push(" AND ((t.start_date <= ").push_bind(window_end);
            qb.push(" AND t.end_date >= ").push_bind(window_start);
            qb.push(") OR (t.start_date >= ").push_bind(window_start);
            qb.push(" AND t.start_date <= ").push_bind(window_end);
            qb.push("))");
        }
        // The filter asked for a month that does not exist: match nothing.
        Some(None) => {
            qb.push(" AND 0");
        }
        None => {}
    }
}
