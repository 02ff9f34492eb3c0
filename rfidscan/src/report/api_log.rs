// rfidscan/src/report/api_log.rs

use std::collections::VecDeque;

use serde::Serialize;

/// One delivery attempt as served by the API log route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiLogEntry {
    /// Seconds since boot.
    #[serde(rename = "t")]
    pub timestamp_s: u64,
    pub uid: String,
    /// HTTP status, or a negative transport code.
    #[serde(rename = "code")]
    pub http_status: i32,
    pub url: String,
}

/// Fixed-capacity ring of recent deliveries; the oldest entry is evicted
/// when a new one arrives at capacity.
#[derive(Debug, Clone)]
pub struct ApiLog {
    entries: VecDeque<ApiLogEntry>,
    capacity: usize,
}

impl ApiLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: ApiLogEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ApiLogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&ApiLogEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// JSON array, oldest first.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let entries: Vec<&ApiLogEntry> = self.entries.iter().collect();
        serde_json::to_string(&entries)
    }
}
