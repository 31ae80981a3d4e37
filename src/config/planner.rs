use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use lazy_static::lazy_static;
use crate::error::PlannerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub recipe_db_url: String,
    pub recipe_db_path: String,
    pub flavor_db_url: String,
    pub flavor_db_path: String,
    pub recipe_db_key: Option<String>,
    pub flavor_db_key: Option<String>,
    /// Shared key used when a service-specific key is not set
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub data_dir: PathBuf,
    pub suggestion_count: usize,
    pub recency_window: usize,
    pub response_cache_size: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        PlannerConfig {
            recipe_db_url: "http://cosylab.iiitd.edu.in:6969".to_string(),
            recipe_db_path: "/recipe2-api".to_string(),
            flavor_db_url: "http://192.168.1.92:9208".to_string(),
            flavor_db_path: "/flavordb".to_string(),
            recipe_db_key: None,
            flavor_db_key: None,
            api_key: None,
            request_timeout_secs: 10,
            data_dir: super::app_data_dir().join("data"),
            suggestion_count: 3,
            recency_window: 5,
            response_cache_size: 100,
        }
    }
}

impl PlannerConfig {
    /// Parse a config file. Missing keys take their defaults.
    pub fn load_from(path: &Path) -> Result<Self, PlannerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PlannerError::from(e).with_context(format!("path: {:?}", path)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, PlannerError> {
        Ok(toml::from_str::<PlannerConfig>(content)?)
    }

    /// Apply `PALATE_*` overrides through the given lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty("PALATE_RECIPE_DB_URL") {
            self.recipe_db_url = url;
        }
        if let Some(url) = non_empty("PALATE_FLAVOR_DB_URL") {
            self.flavor_db_url = url;
        }
        if let Some(key) = non_empty("PALATE_RECIPE_DB_KEY") {
            self.recipe_db_key = Some(key);
        }
        if let Some(key) = non_empty("PALATE_FLAVOR_DB_KEY") {
            self.flavor_db_key = Some(key);
        }
        if let Some(key) = non_empty("PALATE_API_KEY") {
            self.api_key = Some(key);
        }
        if let Some(dir) = non_empty("PALATE_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        self
    }

    pub fn recipe_db_base(&self) -> String {
        format!("{}{}", self.recipe_db_url.trim_end_matches('/'), self.recipe_db_path)
    }

    pub fn flavor_db_base(&self) -> String {
        format!("{}{}", self.flavor_db_url.trim_end_matches('/'), self.flavor_db_path)
    }

    pub fn recipe_key(&self) -> Option<&str> {
        self.recipe_db_key.as_deref().or(self.api_key.as_deref())
    }

    pub fn flavor_key(&self) -> Option<&str> {
        self.flavor_db_key.as_deref().or(self.api_key.as_deref())
    }
}

fn get_config_path() -> PathBuf {
    super::app_data_dir().join("palate.toml")
}

fn load_config_internal() -> PlannerConfig {
    let config_path = get_config_path();

    let config = match PlannerConfig::load_from(&config_path) {
        Ok(config) => {
            tracing::info!(path = ?config_path, "Loaded planner config");
            config
        }
        Err(e) if e.stage == "io" => {
            tracing::info!(path = ?config_path, "No config file, using defaults");
            PlannerConfig::default()
        }
        Err(e) => {
            tracing::warn!(path = ?config_path, error = %e, "Failed to parse config, using defaults");
            PlannerConfig::default()
        }
    };

    config.with_overrides(|name| std::env::var(name).ok())
}

lazy_static! {
    static ref PLANNER_CONFIG: PlannerConfig = load_config_internal();
}

/// Get the cached configuration (loaded once at startup)
pub fn get_config() -> &'static PlannerConfig {
    &PLANNER_CONFIG
}
