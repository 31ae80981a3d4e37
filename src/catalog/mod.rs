pub mod curated;
mod data;

use std::collections::HashMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use lazy_static::lazy_static;

/// A catalog bucket. The four daily slots plus indulgent suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
    Cheat,
}

impl MealType {
    pub const ALL: [MealType; 5] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Snack,
        MealType::Dinner,
        MealType::Cheat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Snack => "snack",
            MealType::Dinner => "dinner",
            MealType::Cheat => "cheat",
        }
    }

    pub fn parse(value: &str) -> Option<MealType> {
        MealType::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

/// Extra data carried by cheat-bucket recipes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Indulgence {
    pub score: u8,
    pub tip: String,
}

/// Static catalog entry. Identity is the name within its bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub calories: u32,
    pub protein: u32,
    pub carbs: u32,
    pub fat: u32,
    pub fiber: u32,
    pub prep_minutes: u32,
    pub cost_inr: u32,
    pub difficulty: Difficulty,
    pub vegetarian: bool,
    pub indulgence: Option<Indulgence>,
}

impl Recipe {
    pub fn new<S: Into<String>>(name: S, vegetarian: bool) -> Self {
        Recipe {
            name: name.into(),
            calories: 0,
            protein: 0,
            carbs: 0,
            fat: 0,
            fiber: 0,
            prep_minutes: 0,
            cost_inr: 0,
            difficulty: Difficulty::Easy,
            vegetarian,
            indulgence: None,
        }
    }

    pub fn with_macros(mut self, calories: u32, protein: u32, carbs: u32, fat: u32, fiber: u32) -> Self {
        self.calories = calories;
        self.protein = protein;
        self.carbs = carbs;
        self.fat = fat;
        self.fiber = fiber;
        self
    }

    pub fn with_prep(mut self, minutes: u32, cost_inr: u32, difficulty: Difficulty) -> Self {
        self.prep_minutes = minutes;
        self.cost_inr = cost_inr;
        self.difficulty = difficulty;
        self
    }

    pub fn with_indulgence<S: Into<String>>(mut self, score: u8, tip: S) -> Self {
        self.indulgence = Some(Indulgence { score, tip: tip.into() });
        self
    }
}

/// Fixed recipe lists, one per meal-type
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    buckets: HashMap<MealType, Vec<Recipe>>,
}

lazy_static! {
    static ref BUILTIN: Catalog = data::builtin_catalog();
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The recipes shipped with the planner
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn with_bucket(mut self, meal_type: MealType, recipes: Vec<Recipe>) -> Self {
        self.buckets.insert(meal_type, recipes);
        self
    }

    /// Recipes for a meal-type; empty when the bucket is missing
    pub fn bucket(&self, meal_type: MealType) -> &[Recipe] {
        self.buckets
            .get(&meal_type)
            .map(|recipes| recipes.as_slice())
            .unwrap_or(&[])
    }

    pub fn find(&self, meal_type: MealType, name: &str) -> Option<&Recipe> {
        self.bucket(meal_type).iter().find(|r| r.name == name)
    }
}
