use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use crate::planner::meal::Macros;
use crate::planner::selector::DietaryFilter;
use crate::planner::week::Slot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    VeryActive,
    Extreme,
}

impl ActivityLevel {
    fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::Extreme => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    MuscleGain,
    FatLoss,
    #[default]
    Maintenance,
    Endurance,
}

impl Goal {
    fn calorie_adjustment(&self) -> i64 {
        match self {
            Goal::MuscleGain => 300,
            Goal::FatLoss => -500,
            Goal::Maintenance => 0,
            Goal::Endurance => 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: Option<u32>,
    pub gender: Gender,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub goal: Goal,
}

/// What onboarding captured about the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    #[serde(default)]
    pub dietary_preference: DietaryFilter,
    #[serde(default)]
    pub conditions: Vec<String>,
    #[serde(default)]
    pub body: Option<BodyMetrics>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTargets {
    pub tdee: i64,
    pub target_calories: i64,
    pub macros: Macros,
    /// Percent of daily calories per slot
    pub meal_distribution: BTreeMap<Slot, u32>,
    pub weekly_goal: Goal,
}

const DEFAULT_AGE: u32 = 25;

/// Mifflin-St Jeor energy expenditure with goal adjustment and macro split
pub fn calculate_targets(body: &BodyMetrics) -> NutritionTargets {
    let age = f64::from(body.age.unwrap_or(DEFAULT_AGE));
    let base = 10.0 * body.weight_kg + 6.25 * body.height_cm - 5.0 * age;
    let bmr = match body.gender {
        Gender::Male => base + 5.0,
        _ => base - 161.0,
    };

    let tdee = (bmr * body.activity_level.multiplier()).round() as i64;
    let target = tdee + body.goal.calorie_adjustment();
    let target_f = target.max(0) as f64;

    let macros = Macros {
        protein_g: (body.weight_kg * 2.2).round() as u32,
        carbs_g: (target_f * 0.4 / 4.0).round() as u32,
        fat_g: (target_f * 0.25 / 9.0).round() as u32,
        calories: target.max(0) as u32,
    };

    let meal_distribution = [
        (Slot::Breakfast, 30),
        (Slot::Lunch, 35),
        (Slot::Snack, 10),
        (Slot::Dinner, 25),
    ]
    .into_iter()
    .collect();

    NutritionTargets {
        tdee,
        target_calories: target,
        macros,
        meal_distribution,
        weekly_goal: body.goal,
    }
}
