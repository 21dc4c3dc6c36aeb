//! autoshop-api library
//!
//! REST backend for a mechanic shop: customers, mechanics, service tickets
//! and parts inventory.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

// Core modules
pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod rate_limiter;
pub mod services;

use axum::{extract::State, response::Json, routing::get, Router};
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::cache::{CacheBackend, InMemoryCache};
use crate::handlers::AppServices;

/// Interval for evicting stale rate-limit windows.
const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub auth: Arc<auth::AuthService>,
    pub services: AppServices,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, config: config::AppConfig) -> Self {
        let auth = Arc::new(auth::AuthService::new(auth::AuthConfig::from(&config)));
        let cache: Arc<dyn CacheBackend> = Arc::new(InMemoryCache::new());
        let services = AppServices::new(
            db.clone(),
            auth.clone(),
            cache,
            Duration::from_secs(config.cache_ttl_secs),
        );

        Self {
            db,
            config,
            auth,
            services,
        }
    }
}

/// Builds the full application router: resource routes grouped by prefix,
/// request tracing, and the rate-limit layer outermost.
pub fn app_router(state: AppState) -> Router {
    let rl_config = rate_limiter::RateLimitConfig {
        requests_per_window: state.config.rate_limit_requests_per_window,
        window_duration: Duration::from_secs(state.config.rate_limit_window_seconds),
        enable_headers: state.config.rate_limit_enable_headers,
    };
    let policies =
        rate_limiter::parse_path_policies(state.config.rate_limit_path_policies.as_deref());
    let rate_limit = rate_limiter::RateLimitLayer::new(rl_config).with_policies(policies);

    tokio::spawn(rate_limiter::start_cleanup_task(
        rate_limit.limiter(),
        RATE_LIMIT_CLEANUP_INTERVAL,
    ));

    Router::new()
        .route("/", get(|| async { "autoshop-api up" }))
        .route("/health", get(health_check))
        .nest("/customers", handlers::customers::routes())
        .nest("/mechanics", handlers::mechanics::routes())
        .nest("/service-tickets", handlers::service_tickets::routes())
        .nest("/inventory", handlers::inventory::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .layer(rate_limit)
}

async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<Value>, errors::ServiceError> {
    let db_status = match state.db.ping().await {
        Ok(_) => "healthy",
        Err(_) => "unhealthy",
    };

    Ok(Json(json!({
        "status": db_status,
        "checks": {
            "database": db_status,
        },
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
