use crate::catalog::Recipe;
use crate::planner::meal::CheatSuggestion;

/// Headroom kept below the remaining calorie budget
const BUDGET_MARGIN: u32 = 50;

pub fn to_suggestion(recipe: &Recipe, remaining_calories: u32) -> CheatSuggestion {
    let (score, tip) = match &recipe.indulgence {
        Some(indulgence) => (indulgence.score, indulgence.tip.clone()),
        None => (5, "Keep the portion small and pair it with vegetables".to_string()),
    };
    let main = recipe.name.split(' ').next().unwrap_or(&recipe.name).to_string();

    CheatSuggestion {
        name: recipe.name.clone(),
        description: format!("Indulgent {} to satisfy your cravings", recipe.name),
        calories: recipe
            .calories
            .min(remaining_calories.saturating_sub(BUDGET_MARGIN)),
        indulgence_score: score,
        why_it_works: format!(
            "Fits within your {} calorie budget while satisfying cravings",
            remaining_calories
        ),
        ingredients: vec![main, "seasonings".to_string(), "garnish".to_string()],
        quick_tip: tip,
        vegetarian: recipe.vegetarian,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calories_are_capped_by_budget() {
        let recipe = Recipe::new("Pav Bhaji", true)
            .with_macros(465, 0, 0, 0, 0)
            .with_indulgence(8, "Use whole wheat pav and extra vegetables");

        let roomy = to_suggestion(&recipe, 900);
        assert_eq!(roomy.calories, 465);
        assert_eq!(roomy.indulgence_score, 8);
        assert_eq!(roomy.ingredients, vec!["Pav", "seasonings", "garnish"]);

        let tight = to_suggestion(&recipe, 300);
        assert_eq!(tight.calories, 250);
        assert!(tight.why_it_works.contains("300"));
    }

    #[test]
    fn tiny_budget_never_underflows() {
        let recipe = Recipe::new("Loaded Nachos", true).with_macros(485, 0, 0, 0, 0);
        assert_eq!(to_suggestion(&recipe, 20).calories, 0);
    }
}
