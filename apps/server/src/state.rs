//! # Application State
//!
//! One explicit state struct passed to every handler via axum's `State`
//! extractor; clones share the underlying pool.

use stampcard_db::Database;

use crate::qr::QrService;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Record store handle (pool-backed, cheap to clone).
    pub db: Database,

    /// QR card-link service.
    pub qr: QrService,
}

impl AppState {
    /// Creates the application state.
    pub fn new(db: Database, qr: QrService) -> Self {
        AppState { db, qr }
    }
}
