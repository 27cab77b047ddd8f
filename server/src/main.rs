// Copyright (c) 2025 sbksba
//
// This software is licensed under the terms of the MIT License.
// See the LICENSE file in the project root for the full license text.
use std::net::SocketAddr;

use axum::http::HeaderName;
use server::events::EventHub;
use server::{database, routes, seed, AppState};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

// Defaults, overridable through the environment (or a .env file).
const DEFAULT_DB_URL: &str = "sqlite://database/planboard.db";
const DB_DIR: &str = "database";
const DEFAULT_PORT: u16 = 5000;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting up the server...");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DB_URL.to_string());

    // SQLite creates the file, not the directory it lives in.
    if let Err(e) = std::fs::create_dir_all(DB_DIR) {
        tracing::error!("Failed to create the database directory: {:?}", e);
        std::process::exit(1);
    }

    let db_pool = match database::establish_connection_pool(&database_url).await {
        Ok(pool) => {
            tracing::info!("Database connection was made successfully.");
            pool
        }
        Err(e) => {
            tracing::error!("Failed to connect with the database: {:?}", e);
            std::process::exit(1);
        }
    };

    // Fixtures are illustrative only; a failed seed is not fatal.
    if let Err(e) = seed::seed_if_empty(&db_pool).await {
        tracing::error!("Database seeding failed: {:?}", e);
    }

    let app_routes = routes::create_router(AppState {
        pool: db_pool,
        events: EventHub::new(),
    });

    // Permissive CORS: the frontend is served from another origin.
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
        ])
        .allow_origin(Any);

    let app = app_routes.layer(cors).layer(TraceLayer::new_for_http());

    let port = std::env::var("PORT")
        .ok()
        .and_then(|port| port.parse().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("The server listens on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
