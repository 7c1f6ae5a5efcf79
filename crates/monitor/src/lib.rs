//! Monitor Role
//!
//! Receiving side of a BlueWatch session:
//! - Bridges the session-store change feed and the room broadcast
//!   channel into the alert dispatcher's single inbox
//! - Exposes alert state and history for rendering
//! - Owns sensitivity control and session teardown

mod session;

pub use session::MonitorSession;

use session_store::StoreError;
use thiserror::Error;

/// Monitor role errors
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Session error: {0}")]
    Store(#[from] StoreError),
}
