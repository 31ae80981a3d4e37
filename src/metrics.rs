use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters for observability.
/// All metrics are atomic counters for thread-safety
#[derive(Clone, Default)]
pub struct Metrics {
    /// Selector calls
    pub selections: Arc<AtomicU64>,
    /// Selections that had to drop recency avoidance
    pub recency_relaxations: Arc<AtomicU64>,
    /// Selections that had to drop the dietary filter
    pub dietary_relaxations: Arc<AtomicU64>,
    /// External API calls answered by a local fallback
    pub api_fallbacks: Arc<AtomicU64>,
    pub cache_hit_count: Arc<AtomicU64>,
    pub cache_miss_count: Arc<AtomicU64>,
    /// Successful plan writes
    pub plan_writes: Arc<AtomicU64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_selection(&self) {
        self.selections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_recency_relaxation(&self) {
        self.recency_relaxations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_dietary_relaxation(&self) {
        self.dietary_relaxations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_api_fallback(&self) {
        self.api_fallbacks.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hit_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_miss_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_plan_write(&self) {
        self.plan_writes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(counter: &AtomicU64) -> u64 {
        counter.load(Ordering::Relaxed)
    }
}
