pub mod backend;
pub mod plan;
pub mod users;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use plan::{date_key, today_key, PersistedPlan, PlanFragment, PlanView};
pub use users::{MealLog, NewUser, UserRecord, UserStore};

use chrono::NaiveDate;
use crate::error::PlannerError;
use crate::metrics::Metrics;
use crate::planner::meal::Meal;
use crate::planner::week::{Slot, WeekPlan};

/// Non-destructive updates to a user's stored plan.
///
/// Every operation reads the whole user document, changes `weeklyPlan` and
/// writes the document back. A missing user is a not-found error; no record
/// is created implicitly.
#[derive(Clone)]
pub struct PlanStore {
    users: UserStore,
    metrics: Metrics,
}

impl PlanStore {
    pub fn new(users: UserStore, metrics: Metrics) -> Self {
        PlanStore { users, metrics }
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    async fn modify<F>(&self, user_id: &str, operation: &'static str, f: F) -> Result<(), PlannerError>
    where
        F: FnOnce(&mut PersistedPlan),
    {
        let mut user = self.users.require_user(user_id).await?;
        let mut plan = user.weekly_plan.take().unwrap_or_default();
        plan.normalize(&today_key());
        f(&mut plan);
        user.weekly_plan = Some(plan);
        self.users.put_user(&user).await?;

        self.metrics.record_plan_write();
        tracing::info!(user_id = user_id, operation = operation, "Plan updated");
        Ok(())
    }

    /// Store a freshly assembled week plan, keeping every dated day
    pub async fn replace_week_plan(&self, user_id: &str, week: WeekPlan) -> Result<(), PlannerError> {
        self.modify(user_id, "replace_week_plan", |plan| plan.replace_week(week))
            .await
    }

    /// Set one slot of the current day
    pub async fn upsert_today_slot(&self, user_id: &str, slot: Slot, meal: Meal) -> Result<(), PlannerError> {
        let today = today_key();
        self.modify(user_id, "upsert_today_slot", |plan| plan.upsert_slot(&today, slot, meal))
            .await
    }

    /// Set one slot of a given day
    pub async fn upsert_slot_on(
        &self,
        user_id: &str,
        date: NaiveDate,
        slot: Slot,
        meal: Meal,
    ) -> Result<(), PlannerError> {
        let key = date_key(date);
        self.modify(user_id, "upsert_slot", |plan| plan.upsert_slot(&key, slot, meal))
            .await
    }

    pub async fn merge_plan_fragment(&self, user_id: &str, fragment: PlanFragment) -> Result<(), PlannerError> {
        let today = today_key();
        self.modify(user_id, "merge_plan_fragment", |plan| plan.merge(fragment, &today))
            .await
    }

    /// `None` when the user is unknown or has no plan yet
    pub async fn get_plan(&self, user_id: &str) -> Result<Option<PersistedPlan>, PlannerError> {
        Ok(self.users.get_user(user_id).await?.and_then(|user| {
            user.weekly_plan.map(|mut plan| {
                plan.normalize(&today_key());
                plan
            })
        }))
    }
}
