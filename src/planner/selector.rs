use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::catalog::{MealType, Recipe};
use crate::planner::meal::Mode;
use crate::state::recency::RecencyWindow;

pub const DEFAULT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DietaryFilter {
    #[serde(rename = "veg")]
    Vegetarian,
    #[serde(rename = "nonveg")]
    NonVegetarian,
    #[default]
    #[serde(rename = "both")]
    Any,
}

impl DietaryFilter {
    pub fn allows(&self, recipe: &Recipe) -> bool {
        match self {
            DietaryFilter::Vegetarian => recipe.vegetarian,
            DietaryFilter::NonVegetarian => !recipe.vegetarian,
            DietaryFilter::Any => true,
        }
    }
}

/// Constraint dropped to keep the result non-empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    Dietary,
    Recency,
}

impl Relaxation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relaxation::Dietary => "dietary",
            Relaxation::Recency => "recency",
        }
    }
}

/// Enrichment context for selected recipes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnrichContext {
    pub mode: Mode,
    pub workout_day: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionRequest {
    pub meal_type: MealType,
    pub count: usize,
    pub avoid_recent: bool,
    pub dietary: DietaryFilter,
    pub context: EnrichContext,
}

impl SelectionRequest {
    pub fn new(meal_type: MealType) -> Self {
        SelectionRequest {
            meal_type,
            count: DEFAULT_COUNT,
            avoid_recent: true,
            dietary: DietaryFilter::Any,
            context: EnrichContext::default(),
        }
    }

    pub fn count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn avoid_recent(mut self, avoid: bool) -> Self {
        self.avoid_recent = avoid;
        self
    }

    pub fn dietary(mut self, dietary: DietaryFilter) -> Self {
        self.dietary = dietary;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.context.mode = mode;
        self
    }

    pub fn workout_day(mut self, workout_day: bool) -> Self {
        self.context.workout_day = workout_day;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub recipes: Vec<Recipe>,
    pub relaxed: Vec<Relaxation>,
}

/// Pick up to `count` recipes from one catalog bucket.
///
/// Fallback chain, applied so a non-empty bucket never yields nothing:
/// 1. keep recipes matching the dietary filter, or the whole bucket if none match;
/// 2. when the pool holds more than twice `count`, drop names in the recency window,
///    unless that would leave nothing;
/// 3. uniform shuffle, take the first `count`.
///
/// The chosen names are recorded in `window`.
pub fn select_recipes<R: Rng + ?Sized>(
    bucket: &[Recipe],
    request: &SelectionRequest,
    window: &mut RecencyWindow,
    rng: &mut R,
) -> Selection {
    let mut relaxed = Vec::new();

    let mut pool: Vec<&Recipe> = bucket
        .iter()
        .filter(|r| request.dietary.allows(r))
        .collect();
    if pool.is_empty() && !bucket.is_empty() {
        relaxed.push(Relaxation::Dietary);
        pool = bucket.iter().collect();
    }

    let mut available = pool.clone();
    if request.avoid_recent && pool.len() > request.count.saturating_mul(2) {
        available.retain(|r| !window.contains(&r.name));
        if available.is_empty() {
            relaxed.push(Relaxation::Recency);
            available = pool;
        }
    }

    available.shuffle(rng);
    let recipes: Vec<Recipe> = available
        .into_iter()
        .take(request.count)
        .cloned()
        .collect();

    window.record(recipes.iter().map(|r| r.name.clone()));

    Selection { recipes, relaxed }
}
