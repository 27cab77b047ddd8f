// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
pub mod clients;
pub mod employees;
pub mod filter;
pub mod tasks;

use anyhow::{Context, Result};
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use tracing::info;

/// Establishes the database connection pool.
/// If the database does not exist, it creates it, and it ensures the full
/// schema is in place before returning.
pub async fn establish_connection_pool(database_url: &str) -> Result<SqlitePool> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        info!("Creating database {}", database_url);
        Sqlite::create_database(database_url)
            .await
            .context("Failed to create database")?;
    } else {
        info!("Database already exists.");
    }

    let pool = SqlitePool::connect(database_url)
        .await
        .context("Failed to connect to database")?;

    create_schema(&pool).await?;

    info!("Database schema is ready.");

    Ok(pool)
}

/// Creates the six tables and their indexes. Every statement is
/// idempotent, so this runs on every startup.
///
/// Timestamps carry SQL defaults but are always bound from Rust, so the
/// stored text encoding stays uniform.
pub async fn create_schema(pool: &SqlitePool) -> Result<()> {
    // Account records; present in the schema, but no route enforces them.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_number VARCHAR(50) UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100),
            role VARCHAR(20) DEFAULT 'user',
            is_active BOOLEAN DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'users' table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS clients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            client_id VARCHAR(50) UNIQUE NOT NULL,
            company_name VARCHAR(200) NOT NULL,
            contact_person VARCHAR(100),
            phone VARCHAR(20),
            email VARCHAR(100),
            address TEXT,
            industry VARCHAR(100),
            status VARCHAR(20) DEFAULT 'active',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'clients' table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            employee_number VARCHAR(50) UNIQUE NOT NULL,
            name VARCHAR(100) NOT NULL,
            email VARCHAR(100),
            department VARCHAR(50),
            capacity_hours INTEGER DEFAULT 160,
            is_active BOOLEAN DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'employees' table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id VARCHAR(50) UNIQUE NOT NULL,
            client_id INTEGER NOT NULL,
            name VARCHAR(200) NOT NULL,
            description TEXT,
            task_type VARCHAR(50) NOT NULL,
            status VARCHAR(20) DEFAULT 'planned',
            priority VARCHAR(10) DEFAULT 'medium',
            planned_hours INTEGER NOT NULL,
            actual_hours INTEGER DEFAULT 0,
            start_date DATE,
            end_date DATE,
            assigned_employee_id INTEGER,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (client_id) REFERENCES clients (id),
            FOREIGN KEY (assigned_employee_id) REFERENCES employees (id)
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'tasks' table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS task_assignments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            task_id INTEGER NOT NULL,
            employee_id INTEGER NOT NULL,
            assigned_hours INTEGER NOT NULL,
            assigned_date DATE DEFAULT CURRENT_DATE,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (task_id) REFERENCES tasks (id),
            FOREIGN KEY (employee_id) REFERENCES employees (id),
            UNIQUE(task_id, employee_id)
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'task_assignments' table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS planning_periods (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            period_name VARCHAR(100) NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            year INTEGER NOT NULL,
            quarter INTEGER,
            month INTEGER,
            is_active BOOLEAN DEFAULT 1,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create 'planning_periods' table")?;

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_tasks_client_id ON tasks(client_id)",
        "CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status)",
        "CREATE INDEX IF NOT EXISTS idx_tasks_assigned_employee ON tasks(assigned_employee_id)",
        "CREATE INDEX IF NOT EXISTS idx_task_assignments_task_id ON task_assignments(task_id)",
        "CREATE INDEX IF NOT EXISTS idx_task_assignments_employee_id ON task_assignments(employee_id)",
    ];
    for statement in indexes {
        sqlx::query(statement)
            .execute(pool)
            .await
            .context("Failed to create index")?;
    }

    Ok(())
}
