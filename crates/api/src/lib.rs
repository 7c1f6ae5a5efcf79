//! BlueWatch API Server
//!
//! REST surface for room coordination: create a room, join it as a role,
//! read session state, and tune the alert sensitivity. Detection and
//! alerting run in the role runtimes; this layer only fronts the session
//! store and mirrors updates onto the room channel.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

pub mod rate_limit;
pub mod settings;
mod routes;

use room_channel::RoomChannelHub;
use session_store::{SessionStore, StoreError};

/// Application state shared across handlers
pub struct AppState {
    /// Session repository
    pub store: Arc<SessionStore>,
    /// Room channel hub
    pub hub: Arc<RoomChannelHub>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self {
            store: Arc::new(SessionStore::new()),
            hub: Arc::new(RoomChannelHub::new()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// API error mapped onto HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Store(StoreError::RoomNotFound(code)) => {
                (StatusCode::NOT_FOUND, format!("room not found: {}", code))
            }
            ApiError::Store(StoreError::InvalidRoomCode(input)) => {
                (StatusCode::BAD_REQUEST, format!("invalid room code: {}", input))
            }
            ApiError::Store(StoreError::LockPoisoned) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "session store unavailable".to_string(),
            ),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route("/api/v1/rooms", post(routes::rooms::create_room))
        .route("/api/v1/rooms/:code", get(routes::rooms::get_room))
        .route("/api/v1/rooms/:code/join", post(routes::rooms::join_room))
        .route(
            "/api/v1/rooms/:code/threshold",
            put(routes::rooms::put_threshold),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp,
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        active_sessions: state.store.session_count(),
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server
pub async fn run_server(settings: settings::ApiSettings) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::new());
    let governor = rate_limit::create_governor_config(&settings.rate_limit());

    let app = create_router(state).layer(GovernorLayer { config: governor });

    info!("Starting API server on {}", settings.bind_addr);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
