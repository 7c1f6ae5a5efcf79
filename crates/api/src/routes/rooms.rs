//! Room Routes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{ApiError, AppState};
use room_channel::RoomMessage;
use session_store::{RoomCode, SessionRecord, SessionUpdate};

/// Role joining a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Cctv,
    Monitor,
}

/// Request body for join
#[derive(Debug, Deserialize)]
pub struct JoinRequest {
    pub role: Role,
}

/// Request body for threshold update
#[derive(Debug, Deserialize)]
pub struct ThresholdRequest {
    pub blue_threshold: f64,
}

/// Response for room creation
#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub room_code: String,
    pub session: SessionRecord,
}

/// Create a new room
pub async fn create_room(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<CreateRoomResponse>), ApiError> {
    let session = state.store.create_session()?;
    Ok((
        StatusCode::CREATED,
        Json(CreateRoomResponse {
            room_code: session.room_code.to_string(),
            session,
        }),
    ))
}

/// Read a session by room code
pub async fn get_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<SessionRecord>, ApiError> {
    let room = RoomCode::parse(&code)?;
    Ok(Json(state.store.get(&room)?))
}

/// Join a room as one of the two roles
pub async fn join_room(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<SessionRecord>, ApiError> {
    let room = RoomCode::parse(&code)?;
    let update = match request.role {
        Role::Cctv => SessionUpdate::cctv_connected(true),
        Role::Monitor => SessionUpdate::monitor_connected(true),
    };

    let session = state.store.update(&room, update)?;
    publish_session_changed(&state, &room, &session);
    Ok(Json(session))
}

/// Update the shared alert sensitivity
pub async fn put_threshold(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Json(request): Json<ThresholdRequest>,
) -> Result<Json<SessionRecord>, ApiError> {
    let room = RoomCode::parse(&code)?;
    let session = state
        .store
        .update(&room, SessionUpdate::blue_threshold(request.blue_threshold))?;
    publish_session_changed(&state, &room, &session);
    Ok(Json(session))
}

/// Mirror a store update onto the room channel for external viewers
fn publish_session_changed(state: &AppState, room: &RoomCode, session: &SessionRecord) {
    state.hub.publish(
        room,
        RoomMessage::SessionChanged {
            current_blue_level: session.current_blue_level,
            blue_threshold: session.blue_threshold,
            cctv_connected: session.cctv_connected,
        },
    );
}
