use std::time::Instant;

/// Initialize structured logging with tracing.
/// Called once at startup; later calls leave the existing subscriber in place.
pub fn init_logging() {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .json()
        );

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("Global tracing subscriber already installed");
        return;
    }

    tracing::info!("Structured logging initialized");
}

/// Record the outcome of one selector call
pub fn log_selection(meal_type: &str, requested: usize, returned: usize, relaxed: Option<&str>) {
    match relaxed {
        Some(relaxation) => tracing::info!(
            meal_type = meal_type,
            requested = requested,
            returned = returned,
            relaxed = relaxation,
            "Selected recipes with relaxed constraints"
        ),
        None => tracing::debug!(
            meal_type = meal_type,
            requested = requested,
            returned = returned,
            "Selected recipes"
        ),
    }
}

/// An external lookup failed and a local fallback was used
pub fn log_api_fallback(service: &str, endpoint: &str, reason: &str) {
    tracing::warn!(service = service, endpoint = endpoint, reason = reason, "Fallback triggered");
}

/// Timer that logs elapsed time on drop
pub struct PerfTimer {
    label: &'static str,
    start: Instant,
}

impl PerfTimer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfTimer {
    fn drop(&mut self) {
        tracing::debug!(label = self.label, duration_ms = self.elapsed_ms(), "Perf");
    }
}
