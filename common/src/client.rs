// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a client. Clients are never hard-deleted; removing
/// one flips its status to `Inactive` so historical tasks keep resolving.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
}

/// A client company of the firm.
///
/// `client_id` is the human-facing business key (e.g. `CL001`) and is
/// unique independently of the internal row `id`.
#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Client {
    pub id: i64,
    pub client_id: String,
    pub company_name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub status: ClientStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or fully updating a client. The lifecycle status is
/// deliberately absent: deactivation only happens through the delete route.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClientPayload {
    pub client_id: String,
    pub company_name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
}
