pub mod app;
pub mod recency;

pub use app::{AppState, InFlightGuard};
pub use recency::RecencyWindow;
