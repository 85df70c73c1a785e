use crate::day_key::DayKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt};
use uuid::Uuid;

pub const PRESET_COLORS: [&str; 7] = [
    "#A855F7", "#22C55E", "#3B82F6", "#F97316", "#EF4444", "#EC4899", "#06B6D4",
];

pub const DEFAULT_COLOR: &str = PRESET_COLORS[0];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitId(String);

impl HabitId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for HabitId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for HabitId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for HabitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One tracked habit as it is persisted.
///
/// `completed_dates` is only ever written by [`crate::store::HabitStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: HabitId,
    pub name: String,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub completed_dates: BTreeSet<DayKey>,
}

impl Habit {
    pub(crate) fn new(name: String, color: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: HabitId::generate(),
            name,
            color,
            created_at,
            completed_dates: BTreeSet::new(),
        }
    }

    pub fn is_completed_on(&self, day: DayKey) -> bool {
        self.completed_dates.contains(&day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Toggle {
    Marked,
    Unmarked,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToggleRequest {
    #[serde(default)]
    pub day: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayPoint {
    pub date: DayKey,
    pub done: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitView {
    #[serde(flatten)]
    pub habit: Habit,
    pub streak: u32,
    pub completed_today: bool,
    pub last_7_days: Vec<DayPoint>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub date: DayKey,
    pub habit_count: usize,
    pub habit_limit: usize,
    pub active_streaks: usize,
    pub habits: Vec<HabitView>,
}
