use std::collections::BTreeMap;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::PlannerError;
use crate::planner::meal::Meal;
use crate::planner::week::{DayPlan, Slot, WeekPlan};

/// Key under which older documents and incoming fragments carry the current day
pub const TODAY_ALIAS: &str = "today";
pub const WEEK_PLAN_KEY: &str = "weekPlan";

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date key for the current UTC day
pub fn today_key() -> String {
    date_key(Utc::now().date_naive())
}

/// A user's stored plan: an optional week plan plus day plans keyed by date.
///
/// The current day is not stored twice; `today` reads the entry for the
/// current date key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedPlan {
    #[serde(rename = "weekPlan", default, skip_serializing_if = "Option::is_none")]
    pub week_plan: Option<WeekPlan>,
    #[serde(flatten)]
    pub days: BTreeMap<String, DayPlan>,
}

impl PersistedPlan {
    pub fn day(&self, key: &str) -> Option<&DayPlan> {
        self.days.get(key)
    }

    pub fn today(&self) -> Option<&DayPlan> {
        self.day(&today_key())
    }

    pub fn is_empty(&self) -> bool {
        self.week_plan.is_none() && self.days.is_empty()
    }

    /// Fold a legacy `today` entry into the given date when that date has no entry yet
    pub fn normalize(&mut self, today: &str) {
        if let Some(alias) = self.days.remove(TODAY_ALIAS) {
            self.days.entry(today.to_string()).or_insert(alias);
        }
    }

    pub fn replace_week(&mut self, week: WeekPlan) {
        self.week_plan = Some(week);
    }

    /// Set one slot of one day, leaving the day's other slots alone
    pub fn upsert_slot(&mut self, date: &str, slot: Slot, meal: Meal) {
        self.days.entry(date.to_string()).or_default().insert(slot, meal);
    }

    /// Apply a fragment: the week plan and dated days replace, `today` merges slot by slot.
    /// Dated entries are applied before `today`.
    pub fn merge(&mut self, fragment: PlanFragment, today: &str) {
        if let Some(week) = fragment.week_plan {
            self.week_plan = Some(week);
        }
        let mut today_slots = fragment.today;
        for (key, day) in fragment.days {
            match key.as_str() {
                TODAY_ALIAS => today_slots.get_or_insert_with(DayPlan::new).extend(day),
                WEEK_PLAN_KEY => {
                    tracing::warn!(key = %key, "Ignoring day plan under reserved key");
                }
                _ => {
                    self.days.insert(key, day);
                }
            }
        }
        if let Some(today_plan) = today_slots {
            self.days
                .entry(today.to_string())
                .or_default()
                .extend(today_plan);
        }
    }

    pub fn view(&self, today: &str) -> PlanView {
        PlanView {
            today: self.day(today).cloned(),
            plan: self.clone(),
        }
    }
}

/// A stored plan together with the resolved `today` entry, as handed to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    #[serde(flatten)]
    pub plan: PersistedPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub today: Option<DayPlan>,
}

/// Plan-shaped partial update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanFragment {
    pub week_plan: Option<WeekPlan>,
    pub today: Option<DayPlan>,
    pub days: BTreeMap<String, DayPlan>,
}

impl PlanFragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_week_plan(mut self, week: WeekPlan) -> Self {
        self.week_plan = Some(week);
        self
    }

    pub fn with_today(mut self, day: DayPlan) -> Self {
        self.today = Some(day);
        self
    }

    /// Add a dated day plan. `today` merges into the today slots; `weekPlan` is not a day and is ignored.
    pub fn with_day<S: Into<String>>(mut self, key: S, day: DayPlan) -> Self {
        let key = key.into();
        match key.as_str() {
            TODAY_ALIAS => self.today.get_or_insert_with(DayPlan::new).extend(day),
            WEEK_PLAN_KEY => {
                tracing::warn!(key = %key, "Ignoring day plan under reserved key");
            }
            _ => {
                self.days.insert(key, day);
            }
        }
        self
    }

    /// Parse a fragment from a JSON object. Entries whose value is not an object are skipped.
    pub fn from_json(value: Value) -> Result<Self, PlannerError> {
        let Value::Object(entries) = value else {
            return Err(PlannerError::new("Plan fragment must be a JSON object", "json_parse"));
        };

        let mut fragment = PlanFragment::new();
        for (key, entry) in entries {
            if !entry.is_object() {
                tracing::debug!(key = %key, "Skipping non-object plan fragment entry");
                continue;
            }
            match key.as_str() {
                WEEK_PLAN_KEY => fragment.week_plan = Some(parse_entry(&key, entry)?),
                TODAY_ALIAS => fragment.today = Some(parse_entry(&key, entry)?),
                _ => {
                    let day = parse_entry(&key, entry)?;
                    fragment.days.insert(key, day);
                }
            }
        }
        Ok(fragment)
    }
}

fn parse_entry<T: for<'de> Deserialize<'de>>(key: &str, entry: Value) -> Result<T, PlannerError> {
    serde_json::from_value(entry).map_err(|e| {
        PlannerError::new(format!("Invalid plan fragment entry: {}", e), "json_parse")
            .with_context(format!("key: {}", key))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, MealType};
    use crate::planner::enrich::enrich;
    use crate::planner::selector::EnrichContext;
    use crate::planner::week::Weekday;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    fn meal(meal_type: MealType, name: &str) -> Meal {
        let recipe = Catalog::builtin().find(meal_type, name).unwrap();
        enrich(recipe, meal_type, &EnrichContext::default(), &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn date_keys_are_iso_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(date_key(date), "2024-03-09");
    }

    #[test]
    fn today_merge_keeps_untouched_slots_and_week() {
        let today = "2024-03-09";
        let lunch = meal(MealType::Lunch, "Rajma Chawal");
        let breakfast = meal(MealType::Breakfast, "Poha with Peanuts");

        let mut week = WeekPlan::new();
        week.insert(Weekday::Monday, DayPlan::from([(Slot::Lunch, lunch.clone())]));

        let mut plan = PersistedPlan::default();
        plan.replace_week(week.clone());
        plan.upsert_slot(today, Slot::Lunch, lunch.clone());

        plan.merge(
            PlanFragment::new().with_today(DayPlan::from([(Slot::Breakfast, breakfast.clone())])),
            today,
        );

        let day = plan.day(today).unwrap();
        assert_eq!(day.get(&Slot::Breakfast), Some(&breakfast));
        assert_eq!(day.get(&Slot::Lunch), Some(&lunch));
        assert_eq!(plan.week_plan, Some(week));
    }

    #[test]
    fn dated_entries_replace_whole_day() {
        let lunch = meal(MealType::Lunch, "Rajma Chawal");
        let dinner = meal(MealType::Dinner, "Palak Paneer with Roti");

        let mut plan = PersistedPlan::default();
        plan.upsert_slot("2024-03-08", Slot::Lunch, lunch);
        plan.merge(
            PlanFragment::new().with_day("2024-03-08", DayPlan::from([(Slot::Dinner, dinner.clone())])),
            "2024-03-09",
        );

        let day = plan.day("2024-03-08").unwrap();
        assert_eq!(day.len(), 1);
        assert_eq!(day.get(&Slot::Dinner), Some(&dinner));
        assert!(plan.day("2024-03-09").is_none());
    }

    #[test]
    fn legacy_alias_folds_into_date_key() {
        let snack = meal(MealType::Snack, "Roasted Makhana (Fox Nuts)");
        let mut plan: PersistedPlan = serde_json::from_value(json!({
            "today": { "snack": serde_json::to_value(&snack).unwrap() }
        }))
        .unwrap();

        plan.normalize("2024-03-09");
        assert!(plan.day(TODAY_ALIAS).is_none());
        assert_eq!(plan.day("2024-03-09").unwrap().get(&Slot::Snack), Some(&snack));
    }

    #[test]
    fn fragment_json_skips_scalars() {
        let snack = meal(MealType::Snack, "Roasted Makhana (Fox Nuts)");
        let fragment = PlanFragment::from_json(json!({
            "today": { "snack": serde_json::to_value(&snack).unwrap() },
            "note": "ignored",
            "2024-03-01": {}
        }))
        .unwrap();

        assert!(fragment.week_plan.is_none());
        assert_eq!(fragment.today.unwrap().len(), 1);
        assert_eq!(fragment.days.keys().collect::<Vec<_>>(), vec!["2024-03-01"]);
    }

    #[test]
    fn reserved_day_keys_never_shadow_plan_fields() {
        let today = "2024-03-09";
        let lunch = meal(MealType::Lunch, "Rajma Chawal");
        let breakfast = meal(MealType::Breakfast, "Poha with Peanuts");

        let mut week = WeekPlan::new();
        week.insert(Weekday::Monday, DayPlan::from([(Slot::Lunch, lunch.clone())]));
        let mut plan = PersistedPlan::default();
        plan.replace_week(week.clone());
        plan.upsert_slot(today, Slot::Lunch, lunch.clone());

        let fragment = PlanFragment::new()
            .with_day(WEEK_PLAN_KEY, DayPlan::from([(Slot::Lunch, lunch.clone())]))
            .with_day(TODAY_ALIAS, DayPlan::from([(Slot::Breakfast, breakfast.clone())]));
        assert!(fragment.days.is_empty());
        plan.merge(fragment, today);

        // Entries pushed straight into the map are routed the same way
        let mut direct = PlanFragment::new();
        direct.days.insert(WEEK_PLAN_KEY.to_string(), DayPlan::new());
        plan.merge(direct, today);

        assert_eq!(plan.week_plan, Some(week));
        assert!(plan.day(WEEK_PLAN_KEY).is_none());
        assert!(plan.day(TODAY_ALIAS).is_none());
        let day = plan.day(today).unwrap();
        assert_eq!(day.get(&Slot::Breakfast), Some(&breakfast));
        assert_eq!(day.get(&Slot::Lunch), Some(&lunch));

        let stored = serde_json::to_value(&plan).unwrap();
        let reloaded: PersistedPlan = serde_json::from_value(stored).unwrap();
        assert_eq!(reloaded, plan);
    }

    #[test]
    fn fragment_json_rejects_non_objects() {
        let err = PlanFragment::from_json(json!(["today"])).unwrap_err();
        assert_eq!(err.stage, "json_parse");
    }

    #[test]
    fn view_serializes_today_alongside_dates() {
        let snack = meal(MealType::Snack, "Roasted Makhana (Fox Nuts)");
        let mut plan = PersistedPlan::default();
        plan.upsert_slot("2024-03-09", Slot::Snack, snack);

        let value = serde_json::to_value(plan.view("2024-03-09")).unwrap();
        assert_eq!(value["today"], value["2024-03-09"]);
        assert!(value.get("weekPlan").is_none());
    }
}
