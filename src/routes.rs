use std::collections::BTreeMap;
use std::sync::Arc;
use serde_json::Value;
use crate::api::{FlavorDbClient, RecipeDbClient, Substitute};
use crate::catalog::{curated, Catalog, MealType};
use crate::config::planner::PlannerConfig;
use crate::error::PlannerError;
use crate::planner::meal::{CheatSuggestion, Meal, Mode};
use crate::planner::selector::{DietaryFilter, SelectionRequest};
use crate::planner::targets::{calculate_targets, BodyMetrics, HealthProfile, NutritionTargets};
use crate::planner::week::{Slot, WeekPlan};
use crate::planner::MealPlanner;
use crate::state::app::AppState;
use crate::store::{
    today_key, KeyValueStore, MealLog, NewUser, PlanFragment, PlanStore, PlanView, UserRecord, UserStore,
};

/// Everything a command handler needs, shared across the UI layer
#[derive(Clone)]
pub struct AppContext {
    pub state: AppState,
    pub planner: MealPlanner,
    pub users: UserStore,
    pub plans: PlanStore,
    pub flavor_db: FlavorDbClient,
    pub recipe_db: RecipeDbClient,
}

impl AppContext {
    pub fn new(config: &PlannerConfig, backend: Arc<dyn KeyValueStore>) -> Self {
        Self::with_catalog(config, backend, Catalog::builtin().clone())
    }

    pub fn with_catalog(config: &PlannerConfig, backend: Arc<dyn KeyValueStore>, catalog: Catalog) -> Self {
        let state = AppState::with_limits(config.recency_window, config.response_cache_size);
        let planner = MealPlanner::new(Arc::new(catalog), state.clone())
            .with_suggestion_count(config.suggestion_count);
        let users = UserStore::new(backend);
        AppContext {
            plans: PlanStore::new(users.clone(), state.metrics.clone()),
            flavor_db: FlavorDbClient::new(config, state.clone()),
            recipe_db: RecipeDbClient::new(config, state.clone()),
            planner,
            users,
            state,
        }
    }
}

fn parse_meal_type(value: &str) -> Result<MealType, String> {
    MealType::parse(value).ok_or_else(|| format!("Unknown meal type '{}'", value))
}

fn parse_slot(value: &str) -> Result<Slot, String> {
    Slot::parse(value).ok_or_else(|| format!("Unknown meal slot '{}'", value))
}

/// Plan writes report `false` for an unknown user and an error string for anything else
fn write_outcome(user_id: &str, result: Result<(), PlannerError>) -> Result<bool, String> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is_not_found() => {
            tracing::warn!(user_id = user_id, "Plan write for unknown user");
            Ok(false)
        }
        Err(e) => {
            tracing::error!(user_id = user_id, error = %e, "Plan write failed");
            Err(format!("Failed to save meal plan: {}", e))
        }
    }
}

pub fn select_meals(
    ctx: &AppContext,
    meal_type: String,
    count: Option<usize>,
    avoid_recent: Option<bool>,
    dietary: DietaryFilter,
) -> Result<Vec<Meal>, String> {
    let mut request = SelectionRequest::new(parse_meal_type(&meal_type)?).dietary(dietary);
    if let Some(count) = count {
        request = request.count(count);
    }
    if let Some(avoid) = avoid_recent {
        request = request.avoid_recent(avoid);
    }
    Ok(ctx.planner.select_meals(&request))
}

pub fn get_meal_options(
    ctx: &AppContext,
    meal_type: String,
    mode: Mode,
    dietary: DietaryFilter,
    workout_day: bool,
) -> Result<Vec<Meal>, String> {
    let meal_type = parse_meal_type(&meal_type)?;
    Ok(ctx.planner.generate_meal_options(meal_type, mode, dietary, workout_day))
}

pub fn assemble_week_plan(ctx: &AppContext, profile: HealthProfile) -> Result<WeekPlan, String> {
    ctx.planner
        .assemble_week_plan(&profile)
        .map_err(|e| format!("Failed to generate week plan, please try again: {}", e))
}

/// Assemble a week for the user's profile and store it.
/// A second request for the same user while one is running is refused.
pub async fn generate_week_plan(ctx: &AppContext, user_id: String) -> Result<WeekPlan, String> {
    let _guard = ctx
        .state
        .try_begin(format!("week_plan:{}", user_id))
        .ok_or_else(|| "A week plan is already being generated".to_string())?;

    let user = ctx
        .users
        .require_user(&user_id)
        .await
        .map_err(|e| e.to_string())?;
    let profile = user.health_profile.unwrap_or_default();

    let week = assemble_week_plan(ctx, profile)?;
    ctx.plans
        .replace_week_plan(&user_id, week.clone())
        .await
        .map_err(|e| format!("Failed to save week plan: {}", e))?;

    tracing::info!(user_id = %user_id, "Week plan generated and saved");
    Ok(week)
}

pub async fn replace_week_plan(ctx: &AppContext, user_id: String, week: WeekPlan) -> Result<bool, String> {
    write_outcome(&user_id, ctx.plans.replace_week_plan(&user_id, week).await)
}

pub async fn upsert_today_slot(
    ctx: &AppContext,
    user_id: String,
    slot: String,
    meal: Meal,
) -> Result<bool, String> {
    let slot = parse_slot(&slot)?;
    write_outcome(&user_id, ctx.plans.upsert_today_slot(&user_id, slot, meal).await)
}

pub async fn merge_plan_fragment(ctx: &AppContext, user_id: String, fragment: Value) -> Result<bool, String> {
    let fragment = PlanFragment::from_json(fragment).map_err(|e| e.to_string())?;
    write_outcome(&user_id, ctx.plans.merge_plan_fragment(&user_id, fragment).await)
}

pub async fn get_plan(ctx: &AppContext, user_id: String) -> Result<Option<PlanView>, String> {
    let plan = ctx.plans.get_plan(&user_id).await.map_err(|e| e.to_string())?;
    Ok(plan.map(|plan| plan.view(&today_key())))
}

pub fn suggest_cheat_meal(
    ctx: &AppContext,
    remaining_calories: u32,
    dietary: DietaryFilter,
) -> Result<CheatSuggestion, String> {
    ctx.planner
        .suggest_cheat_meal(remaining_calories, dietary)
        .map_err(|e| e.to_string())
}

pub fn get_nutrition_targets(body: BodyMetrics) -> NutritionTargets {
    calculate_targets(&body)
}

pub async fn get_substitutes(ctx: &AppContext, ingredient: String) -> Vec<Substitute> {
    ctx.flavor_db.substitutes(ingredient.trim()).await
}

pub async fn get_pairings(ctx: &AppContext, ingredient: String) -> Vec<Value> {
    ctx.flavor_db.pairing_suggestions(ingredient.trim()).await
}

/// RecipeDB steps for a meal, or the curated steps when the lookup finds nothing
pub async fn get_recipe_steps(ctx: &AppContext, meal_name: String) -> Vec<String> {
    let recipe_id = ctx
        .recipe_db
        .search_by_title(&meal_name)
        .await
        .and_then(|recipe| {
            ["Recipe_id", "recipe_id", "id"].iter().find_map(|key| match recipe.get(key) {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            })
        });

    if let Some(id) = recipe_id {
        if let Some(steps) = ctx.recipe_db.recipe_instructions(&id).await {
            if !steps.is_empty() {
                return steps;
            }
        }
    }
    curated::steps(&meal_name)
}

pub async fn create_user(ctx: &AppContext, user: NewUser) -> Result<UserRecord, String> {
    ctx.users.create_user(user).await.map_err(|e| e.to_string())
}

pub async fn get_current_user(ctx: &AppContext) -> Result<Option<UserRecord>, String> {
    let Some(user_id) = ctx.users.current_user_id().await.map_err(|e| e.to_string())? else {
        return Ok(None);
    };
    ctx.users.get_user(&user_id).await.map_err(|e| e.to_string())
}

pub async fn sign_out(ctx: &AppContext) -> Result<(), String> {
    ctx.users.clear_session().await.map_err(|e| e.to_string())
}

pub async fn set_mode(ctx: &AppContext, user_id: String, mode: Mode) -> Result<UserRecord, String> {
    ctx.users.set_mode(&user_id, mode).await.map_err(|e| e.to_string())
}

pub async fn complete_onboarding(
    ctx: &AppContext,
    user_id: String,
    profile: HealthProfile,
) -> Result<UserRecord, String> {
    ctx.users
        .complete_onboarding(&user_id, profile)
        .await
        .map_err(|e| e.to_string())
}

pub async fn save_allergies(ctx: &AppContext, user_id: String, allergies: Vec<String>) -> Result<UserRecord, String> {
    ctx.users
        .save_allergies(&user_id, allergies)
        .await
        .map_err(|e| e.to_string())
}

pub async fn save_preferences(
    ctx: &AppContext,
    user_id: String,
    preferences: BTreeMap<String, Value>,
) -> Result<UserRecord, String> {
    ctx.users
        .save_preferences(&user_id, preferences)
        .await
        .map_err(|e| e.to_string())
}

pub async fn save_fitness_profile(ctx: &AppContext, user_id: String, body: BodyMetrics) -> Result<UserRecord, String> {
    ctx.users
        .save_fitness_profile(&user_id, body)
        .await
        .map_err(|e| e.to_string())
}

pub async fn log_meal(
    ctx: &AppContext,
    user_id: String,
    day: String,
    meal: Meal,
    consumed: bool,
) -> Result<UserRecord, String> {
    ctx.users
        .log_meal_consumption(&user_id, &day, meal, consumed)
        .await
        .map_err(|e| e.to_string())
}

pub async fn get_meal_history(ctx: &AppContext, user_id: String) -> Result<Vec<MealLog>, String> {
    ctx.users.get_meal_history(&user_id).await.map_err(|e| e.to_string())
}
