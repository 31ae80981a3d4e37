use serde::{Deserialize, Serialize};
use crate::catalog::curated::Ingredient;
use crate::catalog::{Difficulty, MealType};

/// User-facing persona that decides which extras a meal carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Clinical,
    #[default]
    Daily,
    Fitness,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalDetails {
    pub glycemic_index: u32,
    pub flavor_match_percent: u32,
    pub medicinal_benefits: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macros {
    pub protein_g: u32,
    pub carbs_g: u32,
    pub fat_g: u32,
    pub calories: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitnessDetails {
    pub macros: Macros,
    pub meal_timing: String,
    pub performance_benefit: String,
}

/// A recipe projected for one meal-type and mode.
/// Built fresh on every generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    pub meal_type: MealType,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub cook_time: u32,
    pub nutrition: Nutrition,
    pub difficulty: Difficulty,
    #[serde(rename = "estimatedCostINR")]
    pub estimated_cost_inr: u32,
    pub cheat_day_score: u32,
    pub flavor_profile: Vec<String>,
    pub preparation_steps: Vec<String>,
    pub vegetarian: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clinical: Option<ClinicalDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness: Option<FitnessDetails>,
}

/// A single indulgent suggestion that fits a calorie budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheatSuggestion {
    pub name: String,
    pub description: String,
    pub calories: u32,
    pub indulgence_score: u8,
    pub why_it_works: String,
    pub ingredients: Vec<String>,
    pub quick_tip: String,
    pub vegetarian: bool,
}
