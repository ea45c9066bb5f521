//! Partsbin Web API
//!
//! Axum-based REST API over the component inventory store.

mod handlers;
mod respond;
mod routes;

pub use routes::create_router;

use partsbin_database::Database;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

pub type SharedState = Arc<AppState>;
