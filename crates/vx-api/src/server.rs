//! HTTP API Server
//!
//! Starts and manages the axum-based HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use http::HeaderValue;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{info, warn};

use vx_core::{ApiConfig, SessionManager, SpeechTranscriber};

use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<SessionManager>,
    pub transcriber: Arc<dyn SpeechTranscriber>,
}

impl AppState {
    pub fn new(session_manager: SessionManager, transcriber: Arc<dyn SpeechTranscriber>) -> Self {
        Self {
            session_manager: Arc::new(session_manager),
            transcriber,
        }
    }
}

/// Build the CORS layer; no configured origins means any origin
fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = allowed_origins.filter(|o| !o.is_empty()) else {
        return CorsLayer::permissive();
    };

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    let mut router = Router::new().merge(routes());

    // Add static file serving if directory provided
    if let Some(dir) = &config.static_dir {
        info!("Serving static files from: {}", dir);
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(cors_layer(config.allowed_origins.as_deref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP API server and run until `shutdown` resolves
pub async fn start_server(
    state: AppState,
    config: &ApiConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let app = build_router(state, config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
