use std::sync::Arc;
use palate_planner_lib::catalog::{Catalog, MealType};
use palate_planner_lib::metrics::Metrics;
use palate_planner_lib::planner::enrich::enrich;
use palate_planner_lib::planner::meal::Meal;
use palate_planner_lib::planner::selector::EnrichContext;
use palate_planner_lib::planner::targets::HealthProfile;
use palate_planner_lib::planner::week::{DayPlan, Slot, WeekPlan};
use palate_planner_lib::planner::MealPlanner;
use palate_planner_lib::state::AppState;
use palate_planner_lib::store::{
    today_key, FileStore, KeyValueStore, MemoryStore, NewUser, PlanFragment, PlanStore, UserStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn meal(meal_type: MealType, name: &str) -> Meal {
    let recipe = Catalog::builtin().find(meal_type, name).unwrap();
    enrich(recipe, meal_type, &EnrichContext::default(), &mut StdRng::seed_from_u64(1))
}

fn week(seed: u64) -> WeekPlan {
    MealPlanner::with_builtin_catalog(AppState::new())
        .assemble_week_plan_with_rng(&HealthProfile::default(), &mut StdRng::seed_from_u64(seed))
        .unwrap()
}

async fn store_with_user(backend: Arc<dyn KeyValueStore>, user_id: &str) -> PlanStore {
    let users = UserStore::new(backend);
    users
        .create_user(NewUser {
            id: Some(user_id.to_string()),
            email: format!("{}@example.com", user_id),
            name: "Meera".to_string(),
            ..NewUser::default()
        })
        .await
        .unwrap();
    PlanStore::new(users, Metrics::new())
}

#[tokio::test]
async fn test_today_merge_is_non_destructive() {
    let plans = store_with_user(Arc::new(MemoryStore::new()), "u1").await;
    let lunch = meal(MealType::Lunch, "Rajma Chawal");
    let breakfast = meal(MealType::Breakfast, "Idli with Sambar");
    let w = week(1);

    plans
        .merge_plan_fragment(
            "u1",
            PlanFragment::new()
                .with_week_plan(w.clone())
                .with_today(DayPlan::from([(Slot::Lunch, lunch.clone())])),
        )
        .await
        .unwrap();
    plans
        .merge_plan_fragment(
            "u1",
            PlanFragment::new().with_today(DayPlan::from([(Slot::Breakfast, breakfast.clone())])),
        )
        .await
        .unwrap();

    let plan = plans.get_plan("u1").await.unwrap().unwrap();
    let today = plan.today().unwrap();
    assert_eq!(today.len(), 2);
    assert_eq!(today[&Slot::Breakfast], breakfast);
    assert_eq!(today[&Slot::Lunch], lunch);
    assert_eq!(plan.week_plan, Some(w));
}

#[tokio::test]
async fn test_upsert_today_is_visible_under_date_key_and_alias() {
    let plans = store_with_user(Arc::new(MemoryStore::new()), "u2").await;
    let dinner = meal(MealType::Dinner, "Palak Paneer with Roti");

    plans.upsert_today_slot("u2", Slot::Dinner, dinner.clone()).await.unwrap();

    let plan = plans.get_plan("u2").await.unwrap().unwrap();
    assert_eq!(plan.day(&today_key()).unwrap()[&Slot::Dinner], dinner);
    assert_eq!(plan.today(), plan.day(&today_key()));

    let view = serde_json::to_value(plan.view(&today_key())).unwrap();
    assert_eq!(view["today"]["dinner"], view[today_key()]["dinner"]);
    assert_eq!(view["today"]["dinner"]["name"], "Palak Paneer with Roti");
}

#[tokio::test]
async fn test_two_upserts_build_up_today() {
    let plans = store_with_user(Arc::new(MemoryStore::new()), "u3").await;
    let m1 = meal(MealType::Breakfast, "Methi Thepla");
    let m2 = meal(MealType::Lunch, "Kadhi Chawal");

    assert!(plans.get_plan("u3").await.unwrap().is_none());
    plans.upsert_today_slot("u3", Slot::Breakfast, m1.clone()).await.unwrap();
    plans.upsert_today_slot("u3", Slot::Lunch, m2.clone()).await.unwrap();

    let plan = plans.get_plan("u3").await.unwrap().unwrap();
    let expected = DayPlan::from([(Slot::Breakfast, m1), (Slot::Lunch, m2)]);
    assert_eq!(plan.today(), Some(&expected));
    assert_eq!(plan.day(&today_key()), Some(&expected));
    assert!(plan.week_plan.is_none());
}

#[tokio::test]
async fn test_replace_week_plan_is_full_replace() {
    let plans = store_with_user(Arc::new(MemoryStore::new()), "u4").await;
    let snack = meal(MealType::Snack, "Sprouts Chaat");
    let (w1, w2) = (week(41), week(42));
    assert_ne!(w1, w2);

    plans.upsert_today_slot("u4", Slot::Snack, snack.clone()).await.unwrap();
    plans.replace_week_plan("u4", w1).await.unwrap();
    plans.replace_week_plan("u4", w2.clone()).await.unwrap();

    let plan = plans.get_plan("u4").await.unwrap().unwrap();
    assert_eq!(plan.week_plan, Some(w2));
    assert_eq!(plan.today().unwrap()[&Slot::Snack], snack);
}

#[tokio::test]
async fn test_missing_user_is_not_found() {
    let plans = PlanStore::new(UserStore::new(Arc::new(MemoryStore::new())), Metrics::new());
    let err = plans
        .upsert_today_slot("ghost", Slot::Lunch, meal(MealType::Lunch, "Rajma Chawal"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = plans.replace_week_plan("ghost", week(1)).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(plans.users().get_user("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn test_file_store_round_trips_plans() {
    let dir = tempfile::tempdir().unwrap();
    let dinner = meal(MealType::Dinner, "Dal Makhani with Roti");

    {
        let plans = store_with_user(Arc::new(FileStore::new(dir.path())), "u5").await;
        plans.upsert_today_slot("u5", Slot::Dinner, dinner.clone()).await.unwrap();
    }

    let reopened = PlanStore::new(
        UserStore::new(Arc::new(FileStore::new(dir.path()))),
        Metrics::new(),
    );
    let plan = reopened.get_plan("u5").await.unwrap().unwrap();
    assert_eq!(plan.today().unwrap()[&Slot::Dinner], dinner);
    assert_eq!(
        reopened.users().current_user_id().await.unwrap(),
        Some("u5".to_string())
    );
}

#[tokio::test]
async fn test_corrupt_file_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let backend = FileStore::new(dir.path());
    std::fs::write(backend.path_for("user_broken"), "{ not json").unwrap();

    assert!(backend.get("user_broken").await.unwrap().is_none());
    let users = UserStore::new(Arc::new(backend));
    assert!(users.get_user("broken").await.unwrap().is_none());
}

#[tokio::test]
async fn test_plan_writes_are_counted() {
    let metrics = Metrics::new();
    let users = UserStore::new(Arc::new(MemoryStore::new()));
    users.seed_demo_user().await.unwrap();
    let plans = PlanStore::new(users, metrics.clone());

    plans.replace_week_plan("demo_user", week(3)).await.unwrap();
    plans
        .merge_plan_fragment("demo_user", PlanFragment::new())
        .await
        .unwrap();
    assert_eq!(Metrics::get(&metrics.plan_writes), 2);
}

#[tokio::test]
async fn test_reserved_day_keys_keep_user_document_readable() {
    let users = UserStore::new(Arc::new(MemoryStore::new()));
    users.seed_demo_user().await.unwrap();
    let plans = PlanStore::new(users, Metrics::new());
    let w = week(5);
    let lunch = meal(MealType::Lunch, "Rajma Chawal");

    plans.replace_week_plan("demo_user", w.clone()).await.unwrap();
    plans
        .merge_plan_fragment(
            "demo_user",
            PlanFragment::new()
                .with_day("weekPlan", DayPlan::from([(Slot::Lunch, lunch.clone())]))
                .with_day("today", DayPlan::from([(Slot::Lunch, lunch.clone())])),
        )
        .await
        .unwrap();

    let user = plans.users().get_user("demo_user").await.unwrap().unwrap();
    let plan = user.weekly_plan.unwrap();
    assert_eq!(plan.week_plan, Some(w));
    assert_eq!(plan.today().unwrap()[&Slot::Lunch], lunch);
    assert!(plan.day("weekPlan").is_none());
}
