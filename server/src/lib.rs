// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.

//! Planning backend for an accounting firm: clients, employees and
//! recurring compliance tasks over a single SQLite store, plus a
//! best-effort WebSocket relay for UI refresh hints.

pub mod database;
pub mod events;
pub mod handlers;
pub mod routes;
pub mod seed;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::events::EventHub;

/// Everything a request handler needs, constructed once at startup and
/// injected through axum state. No module reaches for a global.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub events: EventHub,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for EventHub {
    fn from_ref(state: &AppState) -> Self {
        state.events.clone()
    }
}
