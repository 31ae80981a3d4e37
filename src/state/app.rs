use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::sync::Arc;
use lru::LruCache;
use parking_lot::{Mutex, RwLock};
use crate::cache::CachedResponse;
use crate::catalog::MealType;
use crate::metrics::Metrics;
use crate::state::recency::RecencyWindow;

const DEFAULT_RECENCY_WINDOW: usize = 5;
const DEFAULT_CACHE_SIZE: usize = 100;

/// Application-wide state container.
/// All mutable state is centralized here and passed explicitly to functions.
#[derive(Clone)]
pub struct AppState {
    /// Recently selected recipe names per meal-type (to avoid immediate repeats)
    pub recent_selections: Arc<RwLock<HashMap<MealType, RecencyWindow>>>,
    /// Actions currently running, keyed by action and user
    pub in_flight: Arc<Mutex<HashSet<String>>>,
    /// External API response cache (LRU with bounded size)
    pub response_cache: Arc<RwLock<LruCache<u64, CachedResponse>>>,
    pub metrics: Metrics,
    recency_capacity: usize,
}

impl AppState {
    /// Create a new AppState with default values
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_RECENCY_WINDOW, DEFAULT_CACHE_SIZE)
    }

    pub fn with_limits(recency_capacity: usize, cache_size: usize) -> Self {
        let cache_size = NonZeroUsize::new(cache_size)
            .unwrap_or(NonZeroUsize::MIN);
        AppState {
            recent_selections: Arc::new(RwLock::new(HashMap::new())),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
            response_cache: Arc::new(RwLock::new(LruCache::new(cache_size))),
            metrics: Metrics::new(),
            recency_capacity,
        }
    }

    /// Run `f` with exclusive access to one meal-type's window.
    /// The lock is held for the whole closure so read-then-record is atomic.
    pub fn with_recency<F, T>(&self, meal_type: MealType, f: F) -> T
    where
        F: FnOnce(&mut RecencyWindow) -> T,
    {
        let mut windows = self.recent_selections.write();
        let window = windows
            .entry(meal_type)
            .or_insert_with(|| RecencyWindow::new(self.recency_capacity));
        f(window)
    }

    /// Get recently selected recipe names for a meal-type
    pub fn recent_selections(&self, meal_type: MealType) -> Vec<String> {
        self.recent_selections
            .read()
            .get(&meal_type)
            .map(|w| w.names())
            .unwrap_or_default()
    }

    /// Forget selection history for every meal-type
    pub fn reset_recency(&self) {
        let mut windows = self.recent_selections.write();
        for window in windows.values_mut() {
            window.clear();
        }
    }

    /// Mark an action as running. Returns None if it already is.
    pub fn try_begin(&self, key: impl Into<String>) -> Option<InFlightGuard> {
        let key = key.into();
        let mut running = self.in_flight.lock();
        if !running.insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            key,
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight.lock().contains(key)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Clears its in-flight entry when dropped
pub struct InFlightGuard {
    key: String,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_are_tracked_per_meal_type() {
        let state = AppState::new();
        state.with_recency(MealType::Lunch, |w| w.record(["Rajma Chawal"]));
        assert_eq!(state.recent_selections(MealType::Lunch), vec!["Rajma Chawal"]);
        assert!(state.recent_selections(MealType::Dinner).is_empty());
    }

    #[test]
    fn reset_clears_all_windows() {
        let state = AppState::new();
        state.with_recency(MealType::Lunch, |w| w.record(["a"]));
        state.with_recency(MealType::Snack, |w| w.record(["b"]));
        state.reset_recency();
        assert!(state.recent_selections(MealType::Lunch).is_empty());
        assert!(state.recent_selections(MealType::Snack).is_empty());
    }

    #[test]
    fn window_capacity_follows_limits() {
        let state = AppState::with_limits(2, 10);
        state.with_recency(MealType::Breakfast, |w| w.record(["a", "b", "c"]));
        assert_eq!(state.recent_selections(MealType::Breakfast), vec!["a", "b"]);
    }

    #[test]
    fn in_flight_guard_blocks_until_dropped() {
        let state = AppState::new();
        let guard = state.try_begin("week:u1");
        assert!(guard.is_some());
        assert!(state.try_begin("week:u1").is_none());
        assert!(state.try_begin("week:u2").is_some());
        drop(guard);
        assert!(!state.is_in_flight("week:u1"));
        assert!(state.try_begin("week:u1").is_some());
    }
}
