use std::collections::BTreeMap;
use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use crate::error::PlannerError;
use crate::planner::meal::{Meal, Mode};
use crate::planner::targets::{BodyMetrics, HealthProfile};
use crate::store::backend::KeyValueStore;
use crate::store::plan::PersistedPlan;

pub const DEMO_USER_ID: &str = "demo_user";
const CURRENT_USER_KEY: &str = "current_user";

pub fn user_key(user_id: &str) -> String {
    format!("user_{}", user_id)
}

/// One consumed (or skipped) meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealLog {
    pub date: DateTime<Utc>,
    pub day: String,
    pub meal: Meal,
    pub consumed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default = "default_provider")]
    pub provider: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub mode: Option<Mode>,
    #[serde(default)]
    pub onboarded: bool,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub preferences: BTreeMap<String, Value>,
    #[serde(default)]
    pub health_profile: Option<HealthProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_profile: Option<BodyMetrics>,
    #[serde(default)]
    pub weekly_plan: Option<PersistedPlan>,
    #[serde(default)]
    pub history: Vec<MealLog>,
}

fn default_provider() -> String {
    "email".to_string()
}

/// Fields supplied at sign-up
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewUser {
    pub id: Option<String>,
    pub email: String,
    pub name: String,
    pub avatar: Option<String>,
    pub provider: Option<String>,
}

impl UserRecord {
    pub fn new(user: NewUser) -> Self {
        let now = Utc::now();
        UserRecord {
            id: user
                .id
                .unwrap_or_else(|| format!("user_{}", now.timestamp_millis())),
            email: user.email,
            name: user.name,
            avatar: user.avatar,
            provider: user.provider.unwrap_or_else(default_provider),
            created_at: now,
            updated_at: None,
            mode: None,
            onboarded: false,
            allergies: Vec::new(),
            preferences: BTreeMap::new(),
            health_profile: None,
            fitness_profile: None,
            weekly_plan: None,
            history: Vec::new(),
        }
    }
}

/// User documents and the current-user session over a key-value backend
#[derive(Clone)]
pub struct UserStore {
    backend: Arc<dyn KeyValueStore>,
}

impl UserStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        UserStore { backend }
    }

    pub async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>, PlannerError> {
        let Some(value) = self.backend.get(&user_key(user_id)).await? else {
            return Ok(None);
        };
        serde_json::from_value(value).map(Some).map_err(|e| {
            tracing::error!(user_id = user_id, error = %e, "Stored user document is malformed");
            PlannerError::from(e).with_user(user_id)
        })
    }

    /// Load a user that must exist
    pub async fn require_user(&self, user_id: &str) -> Result<UserRecord, PlannerError> {
        self.get_user(user_id)
            .await?
            .ok_or_else(|| PlannerError::not_found(user_id))
    }

    /// Write the whole document back
    pub async fn put_user(&self, user: &UserRecord) -> Result<(), PlannerError> {
        let value = serde_json::to_value(user)
            .map_err(|e| PlannerError::new(
                format!("Failed to serialize user: {}", e),
                "json_serialize"
            ).with_user(user.id.clone()))?;
        self.backend.set(&user_key(&user.id), &value).await
    }

    /// Create and store a new user, making it the current user
    pub async fn create_user(&self, new_user: NewUser) -> Result<UserRecord, PlannerError> {
        let user = UserRecord::new(new_user);
        self.put_user(&user).await?;
        self.set_current_user(&user.id).await?;
        tracing::info!(user_id = %user.id, provider = %user.provider, "Created user");
        Ok(user)
    }

    /// Apply `f` to an existing user, stamp `updated_at` and persist
    pub async fn update_user<F>(&self, user_id: &str, f: F) -> Result<UserRecord, PlannerError>
    where
        F: FnOnce(&mut UserRecord),
    {
        let mut user = self.require_user(user_id).await?;
        f(&mut user);
        user.updated_at = Some(Utc::now());
        self.put_user(&user).await?;
        Ok(user)
    }

    /// Switching mode sends the user back through onboarding
    pub async fn set_mode(&self, user_id: &str, mode: Mode) -> Result<UserRecord, PlannerError> {
        self.update_user(user_id, |user| {
            user.mode = Some(mode);
            user.onboarded = false;
        })
        .await
    }

    pub async fn complete_onboarding(
        &self,
        user_id: &str,
        profile: HealthProfile,
    ) -> Result<UserRecord, PlannerError> {
        self.update_user(user_id, |user| {
            user.onboarded = true;
            user.health_profile = Some(profile);
        })
        .await
    }

    pub async fn is_onboarded(&self, user_id: &str) -> Result<bool, PlannerError> {
        Ok(self
            .get_user(user_id)
            .await?
            .map(|user| user.onboarded)
            .unwrap_or(false))
    }

    pub async fn save_allergies(
        &self,
        user_id: &str,
        allergies: Vec<String>,
    ) -> Result<UserRecord, PlannerError> {
        self.update_user(user_id, |user| user.allergies = allergies).await
    }

    pub async fn save_preferences(
        &self,
        user_id: &str,
        preferences: BTreeMap<String, Value>,
    ) -> Result<UserRecord, PlannerError> {
        self.update_user(user_id, |user| user.preferences = preferences).await
    }

    pub async fn save_fitness_profile(
        &self,
        user_id: &str,
        body: BodyMetrics,
    ) -> Result<UserRecord, PlannerError> {
        self.update_user(user_id, |user| user.fitness_profile = Some(body)).await
    }

    pub async fn log_meal_consumption(
        &self,
        user_id: &str,
        day: &str,
        meal: Meal,
        consumed: bool,
    ) -> Result<UserRecord, PlannerError> {
        let entry = MealLog {
            date: Utc::now(),
            day: day.to_string(),
            meal,
            consumed,
        };
        self.update_user(user_id, |user| user.history.push(entry)).await
    }

    /// Empty when the user does not exist
    pub async fn get_meal_history(&self, user_id: &str) -> Result<Vec<MealLog>, PlannerError> {
        Ok(self
            .get_user(user_id)
            .await?
            .map(|user| user.history)
            .unwrap_or_default())
    }

    /// Store the demo account once; later calls leave it untouched
    pub async fn seed_demo_user(&self) -> Result<String, PlannerError> {
        if self.get_user(DEMO_USER_ID).await?.is_none() {
            let mut user = UserRecord::new(NewUser {
                id: Some(DEMO_USER_ID.to_string()),
                email: "demo@palateplan.app".to_string(),
                name: "Demo User".to_string(),
                ..NewUser::default()
            });
            user.preferences.insert("cuisines".to_string(), json!(["Indian", "Mediterranean"]));
            user.preferences.insert("budget".to_string(), json!("medium"));
            self.put_user(&user).await?;
            tracing::info!(user_id = DEMO_USER_ID, "Seeded demo user");
        }
        Ok(DEMO_USER_ID.to_string())
    }

    pub async fn set_current_user(&self, user_id: &str) -> Result<(), PlannerError> {
        self.backend
            .set(CURRENT_USER_KEY, &Value::String(user_id.to_string()))
            .await
    }

    pub async fn current_user_id(&self) -> Result<Option<String>, PlannerError> {
        Ok(self
            .backend
            .get(CURRENT_USER_KEY)
            .await?
            .and_then(|value| value.as_str().map(str::to_string)))
    }

    pub async fn clear_session(&self) -> Result<(), PlannerError> {
        self.backend.remove(CURRENT_USER_KEY).await
    }
}
