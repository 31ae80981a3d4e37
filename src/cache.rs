use std::hash::{Hash, Hasher};
use std::collections::hash_map::DefaultHasher;
use serde::{Serialize, Deserialize};
use crate::state::app::AppState;
use crate::error::PlannerError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CachedResponse {
    pub data: String,
    pub timestamp: i64,
}

/// Generate a hash key from service name and request URL
fn cache_key(service: &str, url: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    service.hash(&mut hasher);
    url.hash(&mut hasher);
    hasher.finish()
}

/// Check cache and return if found
pub fn get_cached<T: for<'de> Deserialize<'de>>(
    state: &AppState,
    service: &str,
    url: &str,
) -> Option<T> {
    let key = cache_key(service, url);
    let cache = state.response_cache.read();

    if let Some(cached) = cache.peek(&key) {
        match serde_json::from_str::<T>(&cached.data) {
            Ok(parsed) => {
                tracing::debug!(service = service, url = url, "Cache hit");
                state.metrics.record_cache_hit();
                return Some(parsed);
            }
            Err(e) => {
                tracing::warn!(
                    service = service,
                    error = %e,
                    "Failed to parse cached response"
                );
            }
        }
    }

    tracing::debug!(service = service, url = url, "Cache miss");
    state.metrics.record_cache_miss();
    None
}

/// Store response in cache
pub fn cache_response<T: Serialize>(
    state: &AppState,
    service: &str,
    url: &str,
    response: &T,
) -> Result<(), PlannerError> {
    let key = cache_key(service, url);
    let data = serde_json::to_string(response)
        .map_err(|e| PlannerError::new(
            format!("Failed to serialize response for cache: {}", e),
            "json_serialize"
        ))?;

    let cached = CachedResponse {
        data,
        timestamp: chrono::Utc::now().timestamp(),
    };

    let mut cache = state.response_cache.write();
    cache.put(key, cached);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;

    #[test]
    fn stored_response_is_returned() {
        let state = AppState::new();
        cache_response(&state, "recipedb", "http://x/recipe", &vec!["a", "b"]).unwrap();
        let hit: Option<Vec<String>> = get_cached(&state, "recipedb", "http://x/recipe");
        assert_eq!(hit, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(Metrics::get(&state.metrics.cache_hit_count), 1);
    }

    #[test]
    fn service_is_part_of_the_key() {
        let state = AppState::new();
        cache_response(&state, "recipedb", "http://x/a", &1u32).unwrap();
        let miss: Option<u32> = get_cached(&state, "flavordb", "http://x/a");
        assert!(miss.is_none());
        assert_eq!(Metrics::get(&state.metrics.cache_miss_count), 1);
    }

    #[test]
    fn oldest_entry_is_evicted() {
        let state = AppState::with_limits(5, 1);
        cache_response(&state, "s", "first", &1u32).unwrap();
        cache_response(&state, "s", "second", &2u32).unwrap();
        assert!(get_cached::<u32>(&state, "s", "first").is_none());
        assert_eq!(get_cached::<u32>(&state, "s", "second"), Some(2));
    }
}
