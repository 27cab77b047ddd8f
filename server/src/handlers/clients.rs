// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use common::{Client, ClientPayload};
use sqlx::SqlitePool;
use tracing::{debug, error, info};

use crate::database;
use crate::handlers::AppError;

/// Handler for listing all active clients.
pub async fn list_clients(State(pool): State<SqlitePool>) -> Result<Json<Vec<Client>>, AppError> {
    let clients = database::clients::get_active_clients_from_db(&pool).await?;
    info!("Successfully retrieved {} clients.", clients.len());
    Ok(Json(clients))
}

/// Handler for fetching a single client by id, active or not.
pub async fn get_client(
    State(pool): State<SqlitePool>,
    Path(client_id): Path<i64>,
) -> Result<Json<Client>, AppError> {
    match database::clients::get_client_from_db(&pool, client_id).await? {
        Some(client) => Ok(Json(client)),
        None => Err(AppError::new(StatusCode::NOT_FOUND, "Client not found")),
    }
}

/// Handler for creating a new client.
pub async fn create_client(
    State(pool): State<SqlitePool>,
    Json(payload): Json<ClientPayload>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    debug!(
        "Received request to create client: {}",
        payload.client_id
    );
    if payload.client_id.is_empty() || payload.company_name.is_empty() {
        error!("Validation failed: client ID or company name is empty.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Client ID and company name are required",
        ));
    }

    let client = database::clients::create_client_in_db(&pool, payload).await?;

    info!("Client created successfully with ID: {}", client.id);

    Ok((StatusCode::CREATED, Json(client)))
}

/// Handler for fully updating a client's profile.
pub async fn update_client(
    State(pool): State<SqlitePool>,
    Path(client_id): Path<i64>,
    Json(payload): Json<ClientPayload>,
) -> Result<Json<Client>, AppError> {
    if payload.client_id.is_empty() || payload.company_name.is_empty() {
        error!("Validation failed: client ID or company name is empty.");
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Client ID and company name are required",
        ));
    }

    match database::clients::update_client_in_db(&pool, client_id, payload).await? {
        Some(client) => {
            info!("Client with ID {} updated successfully.", client_id);
            Ok(Json(client))
        }
        None => Err(AppError::new(StatusCode::NOT_FOUND, "Client not found")),
    }
}

/// Handler for soft-deleting a client.
pub async fn delete_client(
    State(pool): State<SqlitePool>,
    Path(client_id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deactivated = database::clients::deactivate_client_in_db(&pool, client_id).await?;

    if deactivated {
        info!("Client with ID {} deactivated successfully.", client_id);
        Ok(Json(serde_json::json!({
            "message": "Client deactivated successfully"
        })))
    } else {
        error!("Client with ID {} not found for deactivation.", client_id);
        Err(AppError::new(StatusCode::NOT_FOUND, "Client not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(client_id: &str, company_name: &str) -> Json<ClientPayload> {
        Json(ClientPayload {
            client_id: client_id.to_string(),
            company_name: company_name.to_string(),
            contact_person: None,
            phone: None,
            email: None,
            address: None,
            industry: None,
        })
    }

    #[tokio::test]
    async fn test_create_client_validation_empty_id() {
        // The validation fails before any DB access.
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();

        let result = create_client(State(pool), payload("", "TechCorp BV")).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Client ID and company name are required");
    }

    #[tokio::test]
    async fn test_create_client_validation_empty_company_name() {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();

        let result = create_client(State(pool), payload("CL001", "")).await;

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.code, StatusCode::BAD_REQUEST);
    }
}
