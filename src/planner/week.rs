use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::catalog::MealType;
use crate::planner::meal::Meal;

/// The four daily meal slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::Breakfast, Slot::Lunch, Slot::Snack, Slot::Dinner];

    pub fn meal_type(&self) -> MealType {
        match self {
            Slot::Breakfast => MealType::Breakfast,
            Slot::Lunch => MealType::Lunch,
            Slot::Snack => MealType::Snack,
            Slot::Dinner => MealType::Dinner,
        }
    }

    pub fn parse(value: &str) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|s| s.meal_type().as_str().eq_ignore_ascii_case(value.trim()))
    }
}

impl From<Slot> for MealType {
    fn from(slot: Slot) -> Self {
        slot.meal_type()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.meal_type().as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub type DayPlan = BTreeMap<Slot, Meal>;
pub type WeekPlan = BTreeMap<Weekday, DayPlan>;

/// True when every weekday has every slot filled
pub fn is_complete(plan: &WeekPlan) -> bool {
    plan.len() == Weekday::ALL.len()
        && plan.values().all(|day| Slot::ALL.iter().all(|slot| day.contains_key(slot)))
}
