use std::sync::Arc;

use crate::config::Config;
use crate::quota::QuotaLedger;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Token records and daily word windows. One ledger per running process.
    pub ledger: Arc<QuotaLedger>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            ledger: Arc::new(QuotaLedger::new(config.daily_word_limit)),
            config,
        }
    }
}
