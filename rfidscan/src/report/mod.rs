// rfidscan/src/report/mod.rs
//! Where session results end up: the latest result text and the delivery
//! log, both read by the control plane.

mod api_log;

pub use api_log::{ApiLog, ApiLogEntry};

use crate::constants::API_LOG_CAPACITY;
use crate::delivery::DeliveryAttempt;

/// Shown before the first card was seen.
pub const NO_CARD_TEXT: &str = "No card";

#[derive(Debug, Clone)]
pub struct ResultSink {
    last_result: String,
    sessions: u64,
    log: ApiLog,
}

impl ResultSink {
    pub fn new() -> Self {
        Self {
            last_result: NO_CARD_TEXT.to_string(),
            sessions: 0,
            log: ApiLog::new(API_LOG_CAPACITY),
        }
    }

    /// Replace the latest result with a completed session's text.
    pub fn record(&mut self, text: String) {
        self.last_result = text;
        self.sessions += 1;
    }

    pub fn record_delivery(&mut self, timestamp_s: u64, attempt: &DeliveryAttempt) {
        self.log.push(ApiLogEntry {
            timestamp_s,
            uid: attempt.uid.clone(),
            http_status: attempt.status,
            url: attempt.url.clone(),
        });
    }

    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    /// Completed sessions since boot.
    pub fn sessions(&self) -> u64 {
        self.sessions
    }

    pub fn log(&self) -> &ApiLog {
        &self.log
    }
}

impl Default for ResultSink {
    fn default() -> Self {
        Self::new()
    }
}
