// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use anyhow::{Context, Result};
use chrono::Utc;
use common::{Client, ClientPayload, ClientStatus};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// Retrieves all active clients, ordered by company name.
/// Deactivated clients are excluded here but stay reachable by id.
pub async fn get_active_clients_from_db(pool: &SqlitePool) -> Result<Vec<Client>> {
    let clients = sqlx::query_as::<_, Client>(
        "SELECT * FROM clients WHERE status = ? ORDER BY company_name",
    )
    .bind(ClientStatus::Active)
    .fetch_all(pool)
    .await
    .context("Failed to retrieve clients from DB")?;

    Ok(clients)
}

/// Retrieves a client by row id, whatever its lifecycle state: historical
/// tasks keep referencing deactivated clients.
pub async fn get_client_from_db(pool: &SqlitePool, client_id: i64) -> Result<Option<Client>> {
    let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
        .bind(client_id)
        .fetch_optional(pool)
        .await
        .context("Failed to retrieve client from DB")?;

    Ok(client)
}

/// Inserts a new client. New clients always start out active.
pub async fn create_client_in_db(pool: &SqlitePool, payload: ClientPayload) -> Result<Client> {
    let now = Utc::now();

    debug!(
        "Insert values: client_id={}, company_name={}",
        payload.client_id, payload.company_name
    );

    let id = sqlx::query(
        "INSERT INTO clients (client_id, company_name, contact_person, phone, email, address, industry, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.client_id)
    .bind(&payload.company_name)
    .bind(&payload.contact_person)
    .bind(&payload.phone)
    .bind(&payload.email)
    .bind(&payload.address)
    .bind(&payload.industry)
    .bind(ClientStatus::Active)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .context("Failed to insert client into DB")?
    .last_insert_rowid();

    let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await
        .context("Failed to re-read inserted client from DB")?;

    Ok(client)
}

/// Full-record update of a client's profile. The lifecycle status is not
/// touched here; deactivation goes through [`deactivate_client_in_db`].
/// Returns `None` when no client with the given id exists.
pub async fn update_client_in_db(
    pool: &SqlitePool,
    client_id: i64,
    payload: ClientPayload,
) -> Result<Option<Client>> {
    let result = sqlx::query(
        "UPDATE clients \
         SET client_id = ?, company_name = ?, contact_person = ?, phone = ?, \
             email = ?, address = ?, industry = ?, updated_at = ? \
         WHERE id = ?",
    )
    .bind(&payload.client_id)
    .bind(&payload.company_name)
    .bind(&payload.contact_person)
    .bind(&payload.phone)
    .bind(&payload.email)
    .bind(&payload.address)
    .bind(&payload.industry)
    .bind(Utc::now())
    .bind(client_id)
    .execute(pool)
    .await
    .context("Failed to update client in DB")?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    let client = get_client_from_db(pool, client_id)
        .await?
        .context("Updated client row went missing")?;

    Ok(Some(client))
}

/// Soft deletes a client by flipping its status to inactive.
/// Returns true if a client was updated, false if the id matched nothing.
pub async fn deactivate_client_in_db(pool: &SqlitePool, client_id: i64) -> Result<bool> {
    debug!("Attempting to deactivate client with ID: {}", client_id);

    let result = sqlx::query("UPDATE clients SET status = ?, updated_at = ? WHERE id = ?")
        .bind(ClientStatus::Inactive)
        .bind(Utc::now())
        .bind(client_id)
        .execute(pool)
        .await
        .context("Failed to deactivate client in DB")?;

    let rows_affected = result.rows_affected();
    info!(
        "Deactivated {} rows for client ID: {}",
        rows_affected, client_id
    );

    Ok(rows_affected > 0)
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

    fn payload(client_id: &str, company_name: &str) -> ClientPayload {
        ClientPayload {
            client_id: client_id.to_string(),
            company_name: company_name.to_string(),
            contact_person: Some("Jane Doe".to_string()),
            phone: None,
            email: Some("jane@example.com".to_string()),
            address: None,
            industry: Some("Technology".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_client() {
        let pool = setup_test_db().await;

        let created = create_client_in_db(&pool, payload("CL001", "TechCorp BV"))
            .await
            .unwrap();
        assert_eq!(created.client_id, "CL001");
        assert_eq!(created.company_name, "TechCorp BV");
        assert_eq!(created.status, ClientStatus::Active);
        assert!(created.id > 0);

        let fetched = get_client_from_db(&pool, created.id).await.unwrap();
        assert_eq!(fetched.unwrap().client_id, "CL001");
    }

    #[tokio::test]
    async fn test_active_listing_orders_by_company_name() {
        let pool = setup_test_db().await;
        create_client_in_db(&pool, payload("CL002", "Zeta Accounting"))
            .await
            .unwrap();
        create_client_in_db(&pool, payload("CL001", "Alpha Retail"))
            .await
            .unwrap();

        let clients = get_active_clients_from_db(&pool).await.unwrap();
        assert_eq!(clients.len(), 2);
        assert_eq!(clients[0].company_name, "Alpha Retail");
        assert_eq!(clients[1].company_name, "Zeta Accounting");
    }

    #[tokio::test]
    async fn test_deactivated_client_leaves_listing_but_resolves_by_id() {
        let pool = setup_test_db().await;
        let client = create_client_in_db(&pool, payload("CL001", "TechCorp BV"))
            .await
            .unwrap();

        assert!(deactivate_client_in_db(&pool, client.id).await.unwrap());

        let listed = get_active_clients_from_db(&pool).await.unwrap();
        assert!(listed.is_empty());

        // Historical references must keep resolving.
        let fetched = get_client_from_db(&pool, client.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, ClientStatus::Inactive);
    }

    #[tokio::test]
    async fn test_deactivate_unknown_client_reports_false() {
        let pool = setup_test_db().await;
        assert!(!deactivate_client_in_db(&pool, 999).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_replaces_the_full_record() {
        let pool = setup_test_db().await;
        let client = create_client_in_db(&pool, payload("CL001", "TechCorp BV"))
            .await
            .unwrap();

        let mut updated_payload = payload("CL001", "TechCorp International BV");
        updated_payload.industry = None;
        let updated = update_client_in_db(&pool, client.id, updated_payload)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.company_name, "TechCorp International BV");
        // Full-record semantics: an omitted optional field is cleared.
        assert_eq!(updated.industry, None);
    }

    #[tokio::test]
    async fn test_update_unknown_client_is_none() {
        let pool = setup_test_db().await;
        let updated = update_client_in_db(&pool, 42, payload("CL009", "Ghost BV"))
            .await
            .unwrap();
        assert!(updated.is_none());
    }
}
