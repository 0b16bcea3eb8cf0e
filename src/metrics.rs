use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request counters for monitoring
#[derive(Clone)]
pub struct Metrics {
    pub items_created: Arc<AtomicU64>,
    pub items_read: Arc<AtomicU64>,
    pub items_updated: Arc<AtomicU64>,
    pub items_deleted: Arc<AtomicU64>,
    pub not_found: Arc<AtomicU64>,
    pub rate_limited: Arc<AtomicU64>,
    pub start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            items_created: Arc::new(AtomicU64::new(0)),
            items_read: Arc::new(AtomicU64::new(0)),
            items_updated: Arc::new(AtomicU64::new(0)),
            items_deleted: Arc::new(AtomicU64::new(0)),
            not_found: Arc::new(AtomicU64::new(0)),
            rate_limited: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    pub fn inc_items_created(&self) {
        self.items_created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_items_read(&self) {
        self.items_read.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_items_updated(&self) {
        self.items_updated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_items_deleted(&self) {
        self.items_deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rate_limited(&self) {
        self.rate_limited.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            items_created: self.items_created.load(Ordering::Relaxed),
            items_read: self.items_read.load(Ordering::Relaxed),
            items_updated: self.items_updated.load(Ordering::Relaxed),
            items_deleted: self.items_deleted.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            rate_limited: self.rate_limited.load(Ordering::Relaxed),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct MetricsSnapshot {
    pub items_created: u64,
    pub items_read: u64,
    pub items_updated: u64,
    pub items_deleted: u64,
    pub not_found: u64,
    pub rate_limited: u64,
    pub uptime_seconds: u64,
}
