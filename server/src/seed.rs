// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Illustrative fixture data: a dozen clients, a ten-person team and a
//! year of compliance tasks. Loaded only into an empty store.

use std::collections::HashMap;

use anyhow::{Context, Result};
use chrono::Utc;
use common::ClientStatus;
use sqlx::SqlitePool;
use tracing::info;

// (client_id, company_name, contact_person, phone, email, industry)
const SEED_CLIENTS: [(&str, &str, &str, &str, &str, &str); 12] = [
    ("CL001", "TechCorp BV", "Jan Jansen", "+31 20 123 4567", "jan@techcorp.nl", "Technology"),
    ("CL002", "RetailPlus", "Marie Dubois", "+31 20 987 6543", "marie@retailplus.nl", "Retail"),
    ("CL003", "FinanceGroup", "Peter de Vries", "+31 20 555 1234", "peter@financegroup.nl", "Financial Services"),
    ("CL004", "Manufacturing Inc", "Anna Schmidt", "+31 20 777 8888", "anna@manufacturing.nl", "Manufacturing"),
    ("CL005", "Consulting Partners", "Mark Johnson", "+31 20 333 4444", "mark@consulting.nl", "Consulting"),
    ("CL006", "Healthcare Solutions", "Dr. Elena Martinez", "+31 20 111 2222", "elena@healthcare.nl", "Healthcare"),
    ("CL007", "Green Energy BV", "Thomas Green", "+31 20 444 5555", "thomas@greenenergy.nl", "Energy"),
    ("CL008", "Logistics Express", "Sophie van Berg", "+31 20 666 7777", "sophie@logistics.nl", "Logistics"),
    ("CL009", "Real Estate Holdings", "Robert Brown", "+31 20 888 9999", "robert@realestate.nl", "Real Estate"),
    ("CL010", "Digital Marketing Pro", "Lisa Anderson", "+31 20 222 3333", "lisa@digitalmarketing.nl", "Marketing"),
    ("CL011", "Construction Masters", "Paul de Groot", "+31 20 555 6666", "paul@construction.nl", "Construction"),
    ("CL012", "Food & Beverage Co", "Maria Rodriguez", "+31 20 777 1111", "maria@foodbev.nl", "Food Industry"),
];

// (employee_number, name, email, department, capacity_hours)
const SEED_EMPLOYEES: [(&str, &str, &str, &str, i64); 10] = [
    ("EMP001", "Sarah van der Berg", "sarah@accountancy.nl", "Audit", 160),
    ("EMP002", "Michael Rossi", "michael@accountancy.nl", "Tax", 160),
    ("EMP003", "Lisa Chen", "lisa@accountancy.nl", "Audit", 160),
    ("EMP004", "David Thompson", "david@accountancy.nl", "Financial Reporting", 160),
    ("EMP005", "Emma Wilson", "emma@accountancy.nl", "Tax", 160),
    ("EMP006", "Johan Bakker", "johan@accountancy.nl", "Advisory", 160),
    ("EMP007", "Natalie van Dijk", "natalie@accountancy.nl", "Payroll", 160),
    ("EMP008", "Carlos Mendez", "carlos@accountancy.nl", "Audit", 160),
    ("EMP009", "Sophie Janssen", "sophie@accountancy.nl", "Tax", 160),
    ("EMP010", "Tim de Boer", "tim@accountancy.nl", "Financial Reporting", 160),
];

// (task_id, client, name, description, task_type, status,
//  planned_hours, actual_hours, start_date, end_date, employee, priority)
#[rustfmt::skip]
const SEED_TASKS: [(&str, &str, &str, &str, &str, &str, i64, i64, &str, &str, &str, &str); 40] = [
    ("TASK001", "CL001", "January Payroll Processing", "Monthly payroll for TechCorp", "salaries", "completed", 8, 8, "2025-01-01", "2025-01-31", "EMP007", "high"),
    ("TASK002", "CL002", "Q4 2024 BTW Filing", "Quarterly VAT return", "btw_icp", "completed", 6, 7, "2025-01-10", "2025-01-20", "EMP002", "high"),
    ("TASK003", "CL003", "Annual Accounts 2024 Prep", "Start preparation annual statements", "annual_accounts", "completed", 20, 22, "2025-01-15", "2025-01-31", "EMP001", "high"),
    ("TASK004", "CL004", "February Payroll", "Monthly payroll processing", "salaries", "completed", 8, 8, "2025-02-01", "2025-02-28", "EMP007", "high"),
    ("TASK005", "CL005", "Tax Advisory Consultation", "Quarterly tax planning", "advisory", "completed", 12, 10, "2025-02-10", "2025-02-20", "EMP006", "medium"),
    ("TASK006", "CL006", "Healthcare Compliance Audit", "Annual compliance review", "audit", "completed", 40, 42, "2025-02-01", "2025-02-28", "EMP003", "high"),
    ("TASK007", "CL007", "Q1 2025 Financial Review", "Quarterly financial statements", "quarterly_admin", "completed", 16, 15, "2025-03-01", "2025-03-31", "EMP004", "medium"),
    ("TASK008", "CL008", "March Payroll", "Monthly payroll processing", "salaries", "completed", 8, 8, "2025-03-01", "2025-03-31", "EMP007", "high"),
    ("TASK009", "CL001", "Annual Accounts 2024 Final", "Finalize annual statements", "annual_accounts", "completed", 30, 32, "2025-03-01", "2025-03-31", "EMP001", "high"),
    ("TASK010", "CL002", "Q1 2025 BTW Filing", "Quarterly VAT return", "btw_icp", "completed", 6, 6, "2025-04-10", "2025-04-20", "EMP002", "high"),
    ("TASK011", "CL009", "Real Estate Tax Planning", "Property tax optimization", "advisory", "completed", 20, 18, "2025-04-01", "2025-04-30", "EMP006", "medium"),
    ("TASK012", "CL010", "Marketing Budget Review", "Financial budget analysis", "quarterly_admin", "completed", 12, 12, "2025-04-15", "2025-04-30", "EMP004", "low"),
    ("TASK013", "CL011", "Construction Payroll May", "Complex payroll with bonuses", "salaries", "completed", 12, 14, "2025-05-01", "2025-05-31", "EMP007", "high"),
    ("TASK014", "CL012", "Food Industry Compliance", "Health & safety financial audit", "audit", "completed", 24, 24, "2025-05-01", "2025-05-31", "EMP008", "high"),
    ("TASK015", "CL003", "Mid-Year Tax Review", "Tax position assessment", "advisory", "completed", 16, 15, "2025-05-15", "2025-05-31", "EMP009", "medium"),
    ("TASK016", "CL004", "Q2 2025 Quarterly Admin", "Quarterly administration", "quarterly_admin", "completed", 20, 22, "2025-06-01", "2025-06-30", "EMP010", "high"),
    ("TASK017", "CL005", "June Payroll", "Monthly payroll with vacation pay", "salaries", "completed", 10, 10, "2025-06-01", "2025-06-30", "EMP007", "high"),
    ("TASK018", "CL006", "Healthcare Financial Audit", "Semi-annual audit", "audit", "completed", 32, 30, "2025-06-01", "2025-06-30", "EMP001", "high"),
    ("TASK019", "CL007", "Q2 2025 BTW Filing", "Quarterly VAT return", "btw_icp", "completed", 8, 8, "2025-07-10", "2025-07-20", "EMP002", "high"),
    ("TASK020", "CL008", "Logistics Tax Optimization", "International tax planning", "advisory", "completed", 24, 26, "2025-07-01", "2025-07-31", "EMP009", "medium"),
    ("TASK021", "CL009", "Property Portfolio Review", "Real estate financial analysis", "quarterly_admin", "completed", 16, 16, "2025-07-15", "2025-07-31", "EMP004", "medium"),
    ("TASK022", "CL010", "August Digital Campaign Audit", "Marketing expense audit", "audit", "completed", 20, 19, "2025-08-01", "2025-08-31", "EMP003", "low"),
    ("TASK023", "CL011", "Construction Payroll August", "Monthly payroll processing", "salaries", "completed", 12, 12, "2025-08-01", "2025-08-31", "EMP007", "high"),
    ("TASK024", "CL012", "Food Safety Compliance Report", "Regulatory compliance filing", "secretarial", "completed", 8, 8, "2025-08-15", "2025-08-31", "EMP005", "medium"),
    ("TASK025", "CL001", "Q3 2025 Financial Statements", "Quarterly reporting", "quarterly_admin", "completed", 24, 25, "2025-09-01", "2025-09-30", "EMP010", "high"),
    ("TASK026", "CL002", "September Inventory Audit", "Retail inventory valuation", "audit", "completed", 16, 18, "2025-09-01", "2025-09-30", "EMP008", "medium"),
    ("TASK027", "CL003", "Tax Planning 2026", "Annual tax strategy", "advisory", "in_progress", 20, 12, "2025-09-15", "2025-09-30", "EMP006", "high"),
    ("TASK028", "CL004", "Q3 2025 BTW Filing", "Quarterly VAT return", "btw_icp", "in_progress", 8, 4, "2025-10-10", "2025-10-20", "EMP002", "high"),
    ("TASK029", "CL005", "October Payroll", "Monthly payroll processing", "salaries", "planned", 8, 0, "2025-10-01", "2025-10-31", "EMP007", "high"),
    ("TASK030", "CL006", "Annual Budget Planning", "Healthcare budget 2026", "advisory", "planned", 30, 0, "2025-10-01", "2025-10-31", "EMP006", "high"),
    ("TASK031", "CL007", "Year-End Tax Preparation", "Preliminary tax calculations", "annual_accounts", "planned", 40, 0, "2025-11-01", "2025-11-30", "EMP001", "high"),
    ("TASK032", "CL008", "November Payroll", "Monthly payroll with bonuses", "salaries", "planned", 10, 0, "2025-11-01", "2025-11-30", "EMP007", "high"),
    ("TASK033", "CL009", "Property Tax Assessment", "Annual property tax review", "advisory", "planned", 16, 0, "2025-11-15", "2025-11-30", "EMP009", "medium"),
    ("TASK034", "CL010", "Annual Marketing Audit", "Year-end marketing expense audit", "audit", "planned", 24, 0, "2025-12-01", "2025-12-31", "EMP003", "medium"),
    ("TASK035", "CL011", "Year-End Payroll", "December payroll with bonuses", "salaries", "planned", 16, 0, "2025-12-01", "2025-12-31", "EMP007", "high"),
    ("TASK036", "CL012", "Annual Accounts 2025", "Prepare annual financial statements", "annual_accounts", "planned", 48, 0, "2025-12-01", "2025-12-31", "EMP001", "high"),
    ("TASK037", "CL001", "October Payroll TechCorp", "Monthly payroll", "salaries", "planned", 6, 0, "2025-10-25", "2025-10-31", "EMP007", "high"),
    ("TASK038", "CL002", "Q4 2025 Planning", "Quarter planning review", "quarterly_admin", "planned", 20, 0, "2025-10-15", "2025-10-31", "EMP004", "medium"),
    ("TASK039", "CL003", "November Tax Filing", "Monthly tax submissions", "btw_icp", "planned", 8, 0, "2025-11-10", "2025-11-20", "EMP002", "high"),
    ("TASK040", "CL004", "December Financial Close", "Year-end closing procedures", "annual_accounts", "planned", 36, 0, "2025-12-15", "2025-12-31", "EMP010", "high"),
];

/// Seeds the fixture data, but only when the store holds no tasks yet.
pub async fn seed_if_empty(pool: &SqlitePool) -> Result<()> {
    let (task_count,): (i64,) = sqlx::query_as("SELECT COUNT(*) AS count FROM tasks")
        .fetch_one(pool)
        .await
        .context("Failed to count tasks")?;

    if task_count == 0 {
        info!("Database is empty, seeding with sample data...");
        seed_database(pool).await?;
    } else {
        info!(
            "Database already contains {} tasks, skipping seed.",
            task_count
        );
    }

    Ok(())
}

/// Loads the full fixture set, clearing any partial leftovers first
/// (in reverse dependency order).
pub async fn seed_database(pool: &SqlitePool) -> Result<()> {
    for table in ["task_assignments", "tasks", "employees", "clients"] {
        sqlx::query(&format!("DELETE FROM {table}"))
            .execute(pool)
            .await
            .with_context(|| format!("Failed to clear '{table}' before seeding"))?;
    }

    let now = Utc::now();

    for (client_id, company_name, contact_person, phone, email, industry) in SEED_CLIENTS {
        sqlx::query(
            "INSERT INTO clients (client_id, company_name, contact_person, phone, email, industry, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(client_id)
        .bind(company_name)
        .bind(contact_person)
        .bind(phone)
        .bind(email)
        .bind(industry)
        .bind(ClientStatus::Active)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to seed clients")?;
    }

    for (employee_number, name, email, department, capacity_hours) in SEED_EMPLOYEES {
        sqlx::query(
            "INSERT INTO employees (employee_number, name, email, department, capacity_hours, is_active, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, 1, ?, ?)",
        )
        .bind(employee_number)
        .bind(name)
        .bind(email)
        .bind(department)
        .bind(capacity_hours)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to seed employees")?;
    }

    // The task fixtures reference clients and employees by business key;
    // map those to the freshly assigned row ids.
    let client_rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, client_id FROM clients")
        .fetch_all(pool)
        .await
        .context("Failed to read seeded clients")?;
    let client_ids: HashMap<String, i64> =
        client_rows.into_iter().map(|(id, key)| (key, id)).collect();

    let employee_rows: Vec<(i64, String)> =
        sqlx::query_as("SELECT id, employee_number FROM employees")
            .fetch_all(pool)
            .await
            .context("Failed to read seeded employees")?;
    let employee_ids: HashMap<String, i64> = employee_rows
        .into_iter()
        .map(|(id, key)| (key, id))
        .collect();

    for (
        task_id,
        client,
        name,
        description,
        task_type,
        status,
        planned_hours,
        actual_hours,
        start_date,
        end_date,
        employee,
        priority,
    ) in SEED_TASKS
    {
        let client_id = client_ids
            .get(client)
            .copied()
            .context("Seed task references an unknown client")?;
        let employee_id = employee_ids
            .get(employee)
            .copied()
            .context("Seed task references an unknown employee")?;

        sqlx::query(
            "INSERT INTO tasks (task_id, client_id, name, description, task_type, status, priority, \
                                planned_hours, actual_hours, start_date, end_date, \
                                assigned_employee_id, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(task_id)
        .bind(client_id)
        .bind(name)
        .bind(description)
        .bind(task_type)
        .bind(status)
        .bind(priority)
        .bind(planned_hours)
        .bind(actual_hours)
        .bind(start_date)
        .bind(end_date)
        .bind(employee_id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .context("Failed to seed tasks")?;
    }

    info!("Sample data seeded successfully.");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::create_schema;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory SQLite");
        create_schema(&pool).await.expect("Failed to create schema");
        pool
    }

    async fn count(pool: &SqlitePool, table: &str) -> i64 {
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    #[tokio::test]
    async fn test_seed_if_empty_populates_the_store() {
        let pool = setup_test_db().await;

        seed_if_empty(&pool).await.unwrap();

        assert_eq!(count(&pool, "clients").await, 12);
        assert_eq!(count(&pool, "employees").await, 10);
        assert_eq!(count(&pool, "tasks").await, 40);
    }

    #[tokio::test]
    async fn test_seed_is_skipped_when_tasks_exist() {
        let pool = setup_test_db().await;
        seed_if_empty(&pool).await.unwrap();

        // Remove one task; a second pass must not reload the fixtures.
        sqlx::query("DELETE FROM tasks WHERE task_id = 'TASK040'")
            .execute(&pool)
            .await
            .unwrap();
        seed_if_empty(&pool).await.unwrap();

        assert_eq!(count(&pool, "tasks").await, 39);
    }

    #[tokio::test]
    async fn test_seeded_rows_decode_through_the_data_access_layer() {
        let pool = setup_test_db().await;
        seed_if_empty(&pool).await.unwrap();

        let clients = crate::database::clients::get_active_clients_from_db(&pool)
            .await
            .unwrap();
        assert_eq!(clients.len(), 12);

        let tasks = crate::database::tasks::get_tasks_from_db(&pool, &Default::default())
            .await
            .unwrap();
        assert_eq!(tasks.len(), 40);
        assert!(tasks.iter().all(|t| !t.company_name.is_empty()));
    }
}
