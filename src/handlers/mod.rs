pub mod budget;
pub mod catalog;
pub mod health;
pub mod materials;
pub mod metrics_handler;

use std::sync::Arc;
use std::time::Duration;

use crate::db::Database;

/// Shared state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    /// Upper bound on a single budget-save transaction
    pub save_timeout: Duration,
}
