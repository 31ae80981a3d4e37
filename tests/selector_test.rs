use std::collections::HashSet;
use std::sync::Arc;
use palate_planner_lib::catalog::{Catalog, MealType, Recipe};
use palate_planner_lib::metrics::Metrics;
use palate_planner_lib::planner::selector::{DietaryFilter, SelectionRequest};
use palate_planner_lib::planner::MealPlanner;
use palate_planner_lib::state::AppState;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn builtin_planner() -> MealPlanner {
    MealPlanner::with_builtin_catalog(AppState::new())
}

#[test]
fn test_returns_min_of_count_and_bucket_size() {
    let planner = builtin_planner();
    let mut rng = StdRng::seed_from_u64(11);

    for meal_type in MealType::ALL {
        let bucket = planner.catalog().bucket(meal_type).len();
        for count in [1, 3, bucket, bucket + 4] {
            let request = SelectionRequest::new(meal_type).count(count).avoid_recent(false);
            let meals = planner.select_meals_with_rng(&request, &mut rng);
            assert_eq!(meals.len(), count.min(bucket), "{} x{}", meal_type, count);

            let names: HashSet<&str> = meals.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(names.len(), meals.len(), "no repeats within one call");
        }
    }
}

#[test]
fn test_nutrition_matches_source_recipe() {
    let planner = builtin_planner();
    let mut rng = StdRng::seed_from_u64(5);
    let request = SelectionRequest::new(MealType::Dinner).count(6);

    for meal in planner.select_meals_with_rng(&request, &mut rng) {
        let recipe = planner.catalog().find(MealType::Dinner, &meal.name).unwrap();
        assert_eq!(meal.nutrition.calories, recipe.calories);
        assert_eq!(meal.nutrition.protein, recipe.protein);
        assert_eq!(meal.nutrition.carbs, recipe.carbs);
        assert_eq!(meal.nutrition.fat, recipe.fat);
        assert_eq!(meal.nutrition.fiber, recipe.fiber);
        assert_eq!(meal.vegetarian, recipe.vegetarian);
        assert!(!meal.ingredients.is_empty());
        assert!(!meal.preparation_steps.is_empty());
    }
}

#[test]
fn test_vegetarian_filter_holds_when_pool_is_non_empty() {
    let planner = builtin_planner();
    let mut rng = StdRng::seed_from_u64(21);

    for _ in 0..25 {
        let request = SelectionRequest::new(MealType::Lunch)
            .count(4)
            .dietary(DietaryFilter::Vegetarian);
        let meals = planner.select_meals_with_rng(&request, &mut rng);
        assert!(meals.iter().all(|m| m.vegetarian));

        let request = SelectionRequest::new(MealType::Lunch)
            .count(2)
            .dietary(DietaryFilter::NonVegetarian);
        let meals = planner.select_meals_with_rng(&request, &mut rng);
        assert!(meals.iter().all(|m| !m.vegetarian));
    }
}

#[test]
fn test_vegetarian_filter_fails_open_on_all_meat_bucket() {
    let catalog = Catalog::new().with_bucket(
        MealType::Dinner,
        vec![
            Recipe::new("Chicken Curry", false),
            Recipe::new("Fish Tikka", false),
            Recipe::new("Mutton Rogan Josh", false),
        ],
    );
    let planner = MealPlanner::new(Arc::new(catalog), AppState::new());

    let request = SelectionRequest::new(MealType::Dinner)
        .count(2)
        .dietary(DietaryFilter::Vegetarian);
    let meals = planner.select_meals(&request);

    assert_eq!(meals.len(), 2);
    assert!(meals.iter().all(|m| !m.vegetarian));
    assert_eq!(Metrics::get(&planner.state().metrics.dietary_relaxations), 1);
}

#[test]
fn test_consecutive_calls_do_not_repeat() {
    let planner = builtin_planner();
    let mut rng = StdRng::seed_from_u64(99);
    let request = SelectionRequest::new(MealType::Breakfast);

    let mut previous: HashSet<String> = HashSet::new();
    for _ in 0..50 {
        let current: HashSet<String> = planner
            .select_meals_with_rng(&request, &mut rng)
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(current.len(), 3);
        assert!(current.is_disjoint(&previous), "{:?} overlaps {:?}", current, previous);
        previous = current;
    }
}

#[test]
fn test_small_pool_ignores_recency() {
    let catalog = Catalog::new().with_bucket(
        MealType::Snack,
        vec![
            Recipe::new("Roasted Makhana", true),
            Recipe::new("Sprouts Chaat", true),
            Recipe::new("Cucumber Raita", true),
            Recipe::new("Masala Buttermilk", true),
        ],
    );
    let planner = MealPlanner::new(Arc::new(catalog), AppState::new());
    let request = SelectionRequest::new(MealType::Snack).count(2);

    // 4 is not more than twice the count, so history never shrinks the pool
    for _ in 0..10 {
        assert_eq!(planner.select_meals(&request).len(), 2);
    }
    assert_eq!(planner.state().recent_selections(MealType::Snack).len(), 5);
}

#[test]
fn test_recency_window_is_per_meal_type() {
    let planner = builtin_planner();
    let mut rng = StdRng::seed_from_u64(3);

    planner.select_meals_with_rng(&SelectionRequest::new(MealType::Snack), &mut rng);
    assert_eq!(planner.state().recent_selections(MealType::Snack).len(), 3);
    assert!(planner.state().recent_selections(MealType::Lunch).is_empty());
}
