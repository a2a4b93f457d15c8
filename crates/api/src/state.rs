use std::sync::Arc;

use perfectme_core::calendar::DayClock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: perfectme_db::DbPool,
    /// Server configuration (JWT settings, day clock).
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// The clock every handler resolves "today" with.
    pub fn clock(&self) -> DayClock {
        self.config.clock
    }
}
