use rand::Rng;
use crate::catalog::{curated, MealType, Recipe};
use crate::planner::meal::{ClinicalDetails, FitnessDetails, Macros, Meal, Mode, Nutrition};
use crate::planner::selector::EnrichContext;

fn flavor_profile(meal_type: MealType) -> Vec<String> {
    let words: &[&str] = match meal_type {
        MealType::Breakfast => &["savory", "mild", "warm"],
        MealType::Lunch => &["rich", "hearty", "spicy"],
        MealType::Snack => &["light", "tangy", "fresh"],
        MealType::Dinner => &["aromatic", "comforting", "balanced"],
        MealType::Cheat => &["delicious"],
    };
    words.iter().map(|w| w.to_string()).collect()
}

/// Threshold rules on fiber, protein, calories and fat
pub fn clinical_benefits(nutrition: &Nutrition) -> Vec<String> {
    let mut benefits = Vec::new();
    if nutrition.fiber > 7 {
        benefits.push("High fiber - aids digestion".to_string());
    }
    if nutrition.protein > 15 {
        benefits.push("Good protein content".to_string());
    }
    if nutrition.calories < 350 {
        benefits.push("Calorie-controlled".to_string());
    }
    if nutrition.fat < 10 {
        benefits.push("Low-fat option".to_string());
    }
    if benefits.is_empty() {
        benefits = vec!["Balanced nutrition".to_string(), "Heart-healthy".to_string()];
    }
    benefits
}

pub fn performance_benefit(nutrition: &Nutrition) -> &'static str {
    if nutrition.protein > 20 {
        "High protein for muscle recovery"
    } else if nutrition.carbs > 50 {
        "Energy-dense for performance"
    } else {
        "Balanced macros for sustained energy"
    }
}

fn clinical_details<R: Rng + ?Sized>(nutrition: &Nutrition, rng: &mut R) -> ClinicalDetails {
    ClinicalDetails {
        glycemic_index: rng.gen_range(35..55),
        flavor_match_percent: rng.gen_range(75..95),
        medicinal_benefits: clinical_benefits(nutrition),
    }
}

fn fitness_details(nutrition: &Nutrition, workout_day: bool) -> FitnessDetails {
    FitnessDetails {
        macros: Macros {
            protein_g: nutrition.protein,
            carbs_g: nutrition.carbs,
            fat_g: nutrition.fat,
            calories: nutrition.calories,
        },
        meal_timing: if workout_day {
            "Post-workout within 45 mins".to_string()
        } else {
            "Anytime".to_string()
        },
        performance_benefit: performance_benefit(nutrition).to_string(),
    }
}

/// Project a catalog recipe into a meal for the given meal-type and mode
pub fn enrich<R: Rng + ?Sized>(
    recipe: &Recipe,
    meal_type: MealType,
    context: &EnrichContext,
    rng: &mut R,
) -> Meal {
    let nutrition = Nutrition {
        calories: recipe.calories,
        protein: recipe.protein,
        carbs: recipe.carbs,
        fat: recipe.fat,
        fiber: recipe.fiber,
    };

    let clinical = match context.mode {
        Mode::Clinical => Some(clinical_details(&nutrition, rng)),
        _ => None,
    };
    let fitness = match context.mode {
        Mode::Fitness => Some(fitness_details(&nutrition, context.workout_day)),
        _ => None,
    };

    Meal {
        name: recipe.name.clone(),
        meal_type,
        description: curated::description(&recipe.name, meal_type.as_str()),
        ingredients: curated::ingredients(&recipe.name),
        cook_time: recipe.prep_minutes,
        nutrition,
        difficulty: recipe.difficulty,
        estimated_cost_inr: recipe.cost_inr,
        cheat_day_score: recipe.calories / 60,
        flavor_profile: flavor_profile(meal_type),
        preparation_steps: curated::steps(&recipe.name),
        vegetarian: recipe.vegetarian,
        clinical,
        fitness,
    }
}
