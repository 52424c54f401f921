use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration; the engine section carries the business rules
    pub config: Arc<AppConfig>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            start_time: Utc::now(),
        }
    }
}
