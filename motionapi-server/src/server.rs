//! Axum server setup
//!
//! Server skeleton with:
//! - Localhost-only CORS by default
//! - Tracing and request timeout middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, StatusCode};
use axum::Router;
use clap::Parser;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use motionapi_core::{ApiConfig, ServerConfig};

use crate::routes;
use crate::state::AppState;
use crate::store::EntryStore;

/// Server command-line arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "motionapi", version, about = "CRUD API over the deleted motions collection")]
pub struct ServerArgs {
    /// Config file (default: ~/.motionapi/config.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Bind address, e.g. 127.0.0.1:3030
    #[arg(short, long)]
    pub bind: Option<SocketAddr>,

    /// MongoDB connection URL
    #[arg(long)]
    pub mongodb_url: Option<String>,

    /// Database holding the collection
    #[arg(long)]
    pub database: Option<String>,

    /// Collection to serve
    #[arg(long)]
    pub collection: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Allow any CORS origin
    #[arg(long)]
    pub cors_permissive: bool,

    /// Keep entries in memory instead of MongoDB (nothing is persisted)
    #[arg(long)]
    pub memory: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl ServerArgs {
    /// Apply flags given on the command line over the loaded config.
    pub fn apply_to(&self, config: &mut ApiConfig) {
        if let Some(bind) = self.bind {
            config.server.bind_addr = bind;
        }
        if let Some(url) = &self.mongodb_url {
            config.store.connection_url = url.clone();
        }
        if let Some(database) = &self.database {
            config.store.default_database = database.clone();
        }
        if let Some(collection) = &self.collection {
            config.store.collection_name = collection.clone();
        }
        if let Some(timeout) = self.timeout {
            config.server.timeout_secs = timeout;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
    }
}

/// Build the router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let server = &state.config().server;

    let cors = if server.cors_permissive {
        tracing::warn!("CORS: Permissive mode enabled - all origins allowed");
        CorsLayer::permissive()
    } else {
        localhost_cors(server)
    };

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(server.timeout_secs),
        ))
        .layer(cors);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::deleted::router())
        .layer(middleware)
        .with_state(state)
}

fn localhost_cors(server: &ServerConfig) -> CorsLayer {
    let port = server.bind_addr.port();
    let origins: Vec<HeaderValue> = [
        format!("http://localhost:{}", port),
        format!("http://127.0.0.1:{}", port),
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
    .into_iter()
    .filter_map(|origin| HeaderValue::from_str(&origin).ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Run the HTTP server until a shutdown signal arrives.
pub async fn run_server(config: ApiConfig, store: Arc<dyn EntryStore>) -> Result<(), ServerError> {
    let bind_addr = config.server.bind_addr;
    let app = build_router(AppState::new(store, config));

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = ServerArgs::try_parse_from([
            "motionapi",
            "--bind",
            "0.0.0.0:8080",
            "--collection",
            "trash",
            "--timeout",
            "5",
            "--cors-permissive",
        ])
        .unwrap();

        let mut config = ApiConfig::default();
        args.apply_to(&mut config);

        assert_eq!(config.server.bind_addr.port(), 8080);
        assert_eq!(config.server.timeout_secs, 5);
        assert!(config.server.cors_permissive);
        assert_eq!(config.store.collection_name, "trash");
        assert_eq!(config.store.default_database, "motion");
    }

    #[test]
    fn no_flags_leave_config_alone() {
        let args = ServerArgs::try_parse_from(["motionapi"]).unwrap();
        let mut config = ApiConfig::default();
        args.apply_to(&mut config);
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn rejects_bad_bind() {
        assert!(ServerArgs::try_parse_from(["motionapi", "--bind", "nowhere"]).is_err());
    }
}
