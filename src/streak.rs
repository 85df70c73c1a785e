use crate::day_key::DayKey;
use crate::models::Habit;
use chrono::{DateTime, TimeZone};
use std::collections::BTreeSet;

/// Current streak of `habit` as seen at `now`.
///
/// Recomputed on every call: the same habit yields a different streak as
/// `now` moves forward, so nothing here is stored or memoized.
pub fn streak_for<Tz: TimeZone>(habit: &Habit, now: &DateTime<Tz>) -> u32 {
    streak_on(&habit.completed_dates, DayKey::from_instant(now))
}

/// Number of consecutive completed days ending at the anchor day.
///
/// The anchor is `today` when it is completed, otherwise `yesterday`; with
/// neither completed the streak is zero. Dates are walked newest first and
/// must match `anchor - i` exactly, so any gap ends the count. A completion
/// dated after the anchor is the newest entry and therefore ends it at once.
/// Keys that name no real day are not part of the walk.
pub fn streak_on(completed: &BTreeSet<DayKey>, today: DayKey) -> u32 {
    if completed.is_empty() {
        return 0;
    }

    let yesterday = today.pred();
    let anchor = if completed.contains(&today) {
        today
    } else if completed.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 0;
    let real_days = completed.iter().rev().filter(|day| day.date().is_some());
    for (offset, day) in real_days.enumerate() {
        if *day != anchor.shift(-(offset as i64)) {
            break;
        }
        streak += 1;
    }
    streak
}

pub fn is_active(completed: &BTreeSet<DayKey>, today: DayKey) -> bool {
    streak_on(completed, today) > 0
}
