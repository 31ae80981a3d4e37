use serde_json::Value;
use crate::api::{extract_items, Endpoint};
use crate::config::planner::PlannerConfig;
use crate::state::app::AppState;

const SERVICE: &str = "recipedb";

/// Instruction lists arrive either as plain strings or as step objects
fn instruction_text(step: &Value) -> Option<String> {
    match step {
        Value::String(text) => Some(text.clone()),
        Value::Object(_) => ["step", "instruction", "text"]
            .iter()
            .find_map(|key| step.get(key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

fn parse_instructions(value: Value) -> Option<Vec<String>> {
    let steps = match value {
        Value::Array(steps) => steps,
        Value::Object(mut map) => match map.remove("steps") {
            Some(Value::Array(steps)) => steps,
            _ => return None,
        },
        _ => return None,
    };
    Some(steps.iter().filter_map(instruction_text).collect())
}

/// RecipeDB lookups. Failures come back as empty lists or `None`.
#[derive(Clone)]
pub struct RecipeDbClient {
    endpoint: Endpoint,
    state: AppState,
}

impl RecipeDbClient {
    pub fn new(config: &PlannerConfig, state: AppState) -> Self {
        RecipeDbClient {
            endpoint: Endpoint::new(
                SERVICE,
                config.recipe_db_base(),
                config.recipe_key(),
                config.request_timeout_secs,
            ),
            state,
        }
    }

    async fn list(&self, path: &str, params: &[(&str, String)]) -> Vec<Value> {
        match self.endpoint.get_json(&self.state, path, params).await {
            Ok(value) => extract_items(value),
            Err(e) => self.endpoint.fallback(&self.state, path, &e, Vec::new()),
        }
    }

    /// First recipe whose title matches the keyword
    pub async fn search_by_title(&self, title: &str) -> Option<Value> {
        self.list("/recipe-bytitle/recipeByTitle", &[("title", title.to_string())])
            .await
            .into_iter()
            .next()
    }

    pub async fn recipe_instructions(&self, recipe_id: &str) -> Option<Vec<String>> {
        let path = format!("/instructions/{}", recipe_id);
        match self.endpoint.get_json(&self.state, &path, &[]).await {
            Ok(value) => parse_instructions(value),
            Err(e) => self.endpoint.fallback(&self.state, &path, &e, None),
        }
    }

    pub async fn search_by_diet(&self, diet: &str, limit: u32) -> Vec<Value> {
        self.list(
            "/recipe-diet/recipe-diet",
            &[("diet", diet.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn search_by_calories(&self, min: u32, max: u32, limit: u32) -> Vec<Value> {
        self.list(
            "/recipes-calories/calories",
            &[
                ("minCalories", min.to_string()),
                ("maxCalories", max.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    pub async fn search_by_protein(&self, min: u32, max: u32, page: u32, limit: u32) -> Vec<Value> {
        self.list(
            "/protein/protein-range",
            &[
                ("min", min.to_string()),
                ("max", max.to_string()),
                ("page", page.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    pub async fn recipe_of_the_day(&self) -> Option<Value> {
        let path = "/recipe/recipeofday";
        match self.endpoint.get_json(&self.state, path, &[]).await {
            Ok(value) => Some(value),
            Err(e) => self.endpoint.fallback(&self.state, path, &e, None),
        }
    }
}
