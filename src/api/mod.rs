pub mod flavor;
pub mod recipe;

pub use flavor::{FlavorDbClient, Substitute};
pub use recipe::RecipeDbClient;

use std::sync::OnceLock;
use std::time::Duration;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde_json::Value;
use thiserror::Error;
use crate::cache::{cache_response, get_cached};
use crate::logging::{log_api_fallback, PerfTimer};
use crate::state::app::AppState;

/// Failures talking to RecipeDB / FlavorDB. Never surfaced past the clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Reusable HTTP client shared by every endpoint; timeouts are set per request
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

fn http_client() -> &'static Client {
    HTTP_CLIENT.get_or_init(|| {
        Client::builder()
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build tuned HTTP client, using defaults");
                Client::new()
            })
    })
}

/// JSON headers plus a bearer token when a key is configured
pub fn auth_headers(key: Option<&str>) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Some(key) = key.filter(|k| !k.is_empty()) {
        match HeaderValue::from_str(&format!("Bearer {}", key)) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(e) => tracing::warn!(error = %e, "API key is not a valid header value, sending without auth"),
        }
    }
    headers
}

/// One external JSON service: base URL, optional key and request timeout
#[derive(Clone, Debug)]
pub(crate) struct Endpoint {
    service: &'static str,
    base: String,
    key: Option<String>,
    timeout: Duration,
}

impl Endpoint {
    pub(crate) fn new(service: &'static str, base: String, key: Option<&str>, timeout_secs: u64) -> Self {
        Endpoint {
            service,
            base: base.trim_end_matches('/').to_string(),
            key: key.map(str::to_string),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub(crate) fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ApiError> {
        let raw = format!("{}{}", self.base, path);
        Url::parse_with_params(&raw, params).map_err(|e| ApiError::InvalidUrl {
            url: raw,
            reason: e.to_string(),
        })
    }

    /// GET a JSON document, answering from the response cache when possible
    pub(crate) async fn get_json(
        &self,
        state: &AppState,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Value, ApiError> {
        let url = self.url(path, params)?;
        if let Some(cached) = get_cached::<Value>(state, self.service, url.as_str()) {
            return Ok(cached);
        }

        let perf = PerfTimer::new(self.service);
        let response = http_client()
            .get(url.clone())
            .headers(auth_headers(self.key.as_deref()))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }
        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text)?;

        tracing::debug!(
            service = self.service,
            endpoint = path,
            duration_ms = perf.elapsed_ms(),
            "External call succeeded"
        );
        if let Err(e) = cache_response(state, self.service, url.as_str(), &value) {
            tracing::warn!(service = self.service, error = %e, "Failed to cache response");
        }
        Ok(value)
    }

    /// Log and count a failed call, then hand back the local answer
    pub(crate) fn fallback<T>(&self, state: &AppState, endpoint: &str, err: &ApiError, value: T) -> T {
        log_api_fallback(self.service, endpoint, &err.to_string());
        state.metrics.record_api_fallback();
        value
    }
}

/// Pull the item list out of the response shapes these services use
pub(crate) fn extract_items(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(Value::Object(mut payload)) = map.remove("payload") {
                if let Some(data) = payload.remove("data") {
                    return extract_items(data);
                }
            }
            for key in ["data", "pairs", "entities", "content"] {
                match map.remove(key) {
                    Some(Value::Array(items)) => return items,
                    Some(Value::Null) | None => continue,
                    Some(single) => return vec![single],
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}
