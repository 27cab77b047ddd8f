// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use axum::{
    routing::{get, post},
    Router,
};

use crate::{events, handlers, AppState};

/// Creates and configures the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        // Clients: CRUD with soft delete
        .route(
            "/api/clients",
            get(handlers::clients::list_clients).post(handlers::clients::create_client),
        )
        .route(
            "/api/clients/{id}",
            get(handlers::clients::get_client)
                .put(handlers::clients::update_client)
                .delete(handlers::clients::delete_client),
        )
        // Employees: CRUD with soft delete, plus the capacity report
        .route(
            "/api/employees",
            get(handlers::employees::list_employees).post(handlers::employees::create_employee),
        )
        .route(
            "/api/employees/{id}",
            get(handlers::employees::get_employee)
                .put(handlers::employees::update_employee)
                .delete(handlers::employees::delete_employee),
        )
        .route(
            "/api/employees/{id}/workload",
            get(handlers::employees::get_employee_workload),
        )
        // Tasks: filtered list, CRUD with hard delete, assignment, and the
        // fixed selector options
        .route(
            "/api/tasks",
            get(handlers::tasks::list_tasks).post(handlers::tasks::create_task),
        )
        .route(
            "/api/tasks/meta/task-types",
            get(handlers::tasks::list_task_types),
        )
        .route(
            "/api/tasks/meta/statuses",
            get(handlers::tasks::list_task_statuses),
        )
        .route(
            "/api/tasks/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::update_task)
                .delete(handlers::tasks::delete_task),
        )
        .route("/api/tasks/{id}/assign", post(handlers::tasks::assign_employee))
        // Update relay for connected UIs
        .route("/ws", get(events::ws_handler))
        .with_state(state)
}
