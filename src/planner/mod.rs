pub mod cheat;
pub mod enrich;
pub mod meal;
pub mod selector;
pub mod targets;
pub mod week;

use std::sync::Arc;
use rand::Rng;
use crate::catalog::{Catalog, MealType};
use crate::error::PlannerError;
use crate::logging::log_selection;
use crate::planner::meal::{CheatSuggestion, Meal, Mode};
use crate::planner::selector::{select_recipes, DietaryFilter, Relaxation, SelectionRequest};
use crate::planner::targets::HealthProfile;
use crate::planner::week::{DayPlan, Slot, WeekPlan, Weekday};
use crate::state::app::AppState;

/// Recipe selection and plan assembly over a catalog.
/// Recency history lives in the shared AppState.
#[derive(Clone)]
pub struct MealPlanner {
    catalog: Arc<Catalog>,
    state: AppState,
    suggestion_count: usize,
}

impl MealPlanner {
    pub fn new(catalog: Arc<Catalog>, state: AppState) -> Self {
        MealPlanner {
            catalog,
            state,
            suggestion_count: selector::DEFAULT_COUNT,
        }
    }

    pub fn with_builtin_catalog(state: AppState) -> Self {
        Self::new(Arc::new(Catalog::builtin().clone()), state)
    }

    pub fn with_suggestion_count(mut self, count: usize) -> Self {
        self.suggestion_count = count;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn select_meals(&self, request: &SelectionRequest) -> Vec<Meal> {
        self.select_meals_with_rng(request, &mut rand::thread_rng())
    }

    /// Select and enrich meals, recording the picks in the meal-type's recency window
    pub fn select_meals_with_rng<R: Rng + ?Sized>(
        &self,
        request: &SelectionRequest,
        rng: &mut R,
    ) -> Vec<Meal> {
        let bucket = self.catalog.bucket(request.meal_type);
        let selection = self.state.with_recency(request.meal_type, |window| {
            select_recipes(bucket, request, window, rng)
        });

        self.state.metrics.record_selection();
        for relaxation in &selection.relaxed {
            match relaxation {
                Relaxation::Dietary => self.state.metrics.record_dietary_relaxation(),
                Relaxation::Recency => self.state.metrics.record_recency_relaxation(),
            }
        }
        let relaxed = selection
            .relaxed
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(",");
        log_selection(
            request.meal_type.as_str(),
            request.count,
            selection.recipes.len(),
            (!relaxed.is_empty()).then_some(relaxed.as_str()),
        );

        selection
            .recipes
            .iter()
            .map(|recipe| enrich::enrich(recipe, request.meal_type, &request.context, rng))
            .collect()
    }

    /// Suggestions for one meal-type, augmented for the mode
    pub fn generate_meal_options(
        &self,
        meal_type: MealType,
        mode: Mode,
        dietary: DietaryFilter,
        workout_day: bool,
    ) -> Vec<Meal> {
        tracing::info!(
            meal_type = %meal_type,
            mode = ?mode,
            dietary = ?dietary,
            "Generating meal options"
        );
        let request = SelectionRequest::new(meal_type)
            .count(self.suggestion_count)
            .dietary(dietary)
            .mode(mode)
            .workout_day(workout_day);
        self.select_meals(&request)
    }

    pub fn assemble_week_plan(&self, profile: &HealthProfile) -> Result<WeekPlan, PlannerError> {
        self.assemble_week_plan_with_rng(profile, &mut rand::thread_rng())
    }

    /// One selection per (weekday, slot), with recency history cleared first.
    /// Fails as a whole if any cell comes back empty.
    pub fn assemble_week_plan_with_rng<R: Rng + ?Sized>(
        &self,
        profile: &HealthProfile,
        rng: &mut R,
    ) -> Result<WeekPlan, PlannerError> {
        let dietary = profile.dietary_preference;
        self.state.reset_recency();

        let mut week = WeekPlan::new();
        for day in Weekday::ALL {
            let mut plan = DayPlan::new();
            for slot in Slot::ALL {
                let request = SelectionRequest::new(slot.meal_type())
                    .count(1)
                    .dietary(dietary);
                let meal = self
                    .select_meals_with_rng(&request, rng)
                    .into_iter()
                    .next()
                    .ok_or_else(|| PlannerError::new(
                        format!("No recipes available for {}", slot),
                        "assembly"
                    ).with_context(format!("day: {}", day)))?;
                plan.insert(slot, meal);
            }
            week.insert(day, plan);
        }

        tracing::info!(days = week.len(), dietary = ?dietary, "Assembled week plan");
        Ok(week)
    }

    pub fn suggest_cheat_meal(
        &self,
        remaining_calories: u32,
        dietary: DietaryFilter,
    ) -> Result<CheatSuggestion, PlannerError> {
        self.suggest_cheat_meal_with_rng(remaining_calories, dietary, &mut rand::thread_rng())
    }

    pub fn suggest_cheat_meal_with_rng<R: Rng + ?Sized>(
        &self,
        remaining_calories: u32,
        dietary: DietaryFilter,
        rng: &mut R,
    ) -> Result<CheatSuggestion, PlannerError> {
        let request = SelectionRequest::new(MealType::Cheat).count(1).dietary(dietary);
        let bucket = self.catalog.bucket(MealType::Cheat);
        let selection = self.state.with_recency(MealType::Cheat, |window| {
            select_recipes(bucket, &request, window, rng)
        });
        self.state.metrics.record_selection();

        let recipe = selection
            .recipes
            .first()
            .ok_or_else(|| PlannerError::new("No cheat meals in catalog", "selection"))?;
        Ok(cheat::to_suggestion(recipe, remaining_calories))
    }
}
