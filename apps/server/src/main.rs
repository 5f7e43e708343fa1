// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cityblock Server - building footprints for the walkthrough viewer.
//!
//! Loads the building dataset, reference point and model substitution
//! definition once at startup, then serves read-only queries over them.
//! If any of them fails to load the process exits before binding.
//!
//! # Endpoints
//!
//! - `GET /` - API information
//! - `GET /api/v1/health` - Dataset status, building count, reference point
//! - `GET /api/v1/center` - Reference point `{ x, z }`
//! - `POST /api/v1/buildings` - Buildings with a vertex near `position`

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use cityblock_core::{Dataset, ModelSubstitution, QueryEngine};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod routes;
mod types;

use config::{Config, LogFormat};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<QueryEngine>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(config.log_format);

    tracing::info!(
        host = %config.host,
        port = config.port,
        buildings_path = %config.buildings_path.display(),
        center_path = %config.center_path.display(),
        models_path = ?config.models_path,
        max_body_kb = config.max_body_kb,
        "Starting Cityblock Server"
    );

    let engine = load_engine(&config)?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    let state = AppState {
        engine: Arc::new(engine),
        config: Arc::new(config),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server shut down");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,cityblock_server=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Load the dataset and substitution rules. Any failure aborts startup.
fn load_engine(config: &Config) -> anyhow::Result<QueryEngine> {
    let dataset = Dataset::load(&config.buildings_path, &config.center_path)
        .context("failed to load building dataset")?;

    let models = match &config.models_path {
        Some(path) => ModelSubstitution::load(path).with_context(|| {
            format!("failed to load model definition {}", path.display())
        })?,
        None => ModelSubstitution::empty(),
    };

    let engine = QueryEngine::new(dataset, models);
    let center = engine.center();

    tracing::info!(
        buildings = engine.building_count(),
        model_groups = engine.models().group_count(),
        model_assignments = engine.models().assignment_count(),
        center_x = center.x,
        center_z = center.z,
        "Dataset loaded"
    );

    let degenerate = engine.dataset().degenerate_count();
    if degenerate > 0 {
        tracing::warn!(count = degenerate, "Buildings with fewer than two nodes");
    }

    for id in engine.dangling_assignments() {
        tracing::warn!(building = %id, "Model assignment references a building not in the dataset");
    }

    Ok(engine)
}

/// Build the router with all routes and middleware.
pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    Router::new()
        // Root endpoint - API information
        .route("/", get(routes::health::info))
        // Health check
        .route("/api/v1/health", get(routes::health::check))
        // Reference point
        .route("/api/v1/center", get(routes::center::get_center))
        // Proximity query
        .route("/api/v1/buildings", post(routes::buildings::query_buildings))
        .fallback(routes::not_found)
        // Middleware
        .layer(DefaultBodyLimit::max(config.max_body_kb * 1024))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
