use serde::{Serialize, Deserialize};
use std::fmt;

/// Unified error type for the planner.
/// Store, config and assembly functions return Result<T, PlannerError>.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerError {
    pub message: String,
    pub stage: String,
    pub user_id: Option<String>,
    pub context: Option<String>,
    pub source: Option<String>,
}

impl PlannerError {
    /// Create a new error with stage and message
    pub fn new<S: Into<String>>(message: S, stage: &'static str) -> Self {
        PlannerError {
            message: message.into(),
            stage: stage.to_string(),
            user_id: None,
            context: None,
            source: None,
        }
    }

    /// The referenced user record does not exist
    pub fn not_found<S: Into<String>>(user_id: S) -> Self {
        let user_id = user_id.into();
        PlannerError::new(format!("User '{}' not found", user_id), "not_found")
            .with_user(user_id)
    }

    pub fn is_not_found(&self) -> bool {
        self.stage == "not_found"
    }

    /// Attach the user the failing operation was acting on
    pub fn with_user<S: Into<String>>(mut self, user_id: S) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Add additional context information
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add source error information
    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.stage, self.message)?;
        if let Some(ref user_id) = self.user_id {
            write!(f, " (user: {})", user_id)?;
        }
        if let Some(ref context) = self.context {
            write!(f, " (context: {})", context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (source: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for PlannerError {}

impl From<anyhow::Error> for PlannerError {
    fn from(err: anyhow::Error) -> Self {
        PlannerError::new(err.to_string(), "unknown").with_source("anyhow")
    }
}

impl From<std::io::Error> for PlannerError {
    fn from(err: std::io::Error) -> Self {
        PlannerError::new(format!("I/O error: {}", err), "io").with_source("std::io")
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::new(format!("JSON error: {}", err), "json_parse").with_source("serde_json")
    }
}

impl From<toml::de::Error> for PlannerError {
    fn from(err: toml::de::Error) -> Self {
        PlannerError::new(format!("Config error: {}", err), "config").with_source("toml")
    }
}

#[cfg(test)]
mod tests {
    use super::PlannerError;

    #[test]
    fn not_found_carries_user_and_stage() {
        let err = PlannerError::not_found("u1");
        assert!(err.is_not_found());
        assert_eq!(err.user_id.as_deref(), Some("u1"));
        assert!(err.to_string().contains("u1"));
    }

    #[test]
    fn io_errors_are_not_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing file");
        let err: PlannerError = io.into();
        assert_eq!(err.stage, "io");
        assert!(!err.is_not_found());
    }
}
