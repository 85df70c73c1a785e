use crate::day_key::DayKey;
use crate::models::{DayPoint, Habit, HabitView, SummaryResponse};
use crate::streak::{is_active, streak_on};

pub fn build_summary(habits: &[Habit], habit_limit: usize) -> SummaryResponse {
    build_summary_at(DayKey::today(), habits, habit_limit)
}

pub fn build_summary_at(today: DayKey, habits: &[Habit], habit_limit: usize) -> SummaryResponse {
    let active_streaks = habits
        .iter()
        .filter(|habit| is_active(&habit.completed_dates, today))
        .count();

    SummaryResponse {
        date: today,
        habit_count: habits.len(),
        habit_limit,
        active_streaks,
        habits: habits.iter().map(|habit| habit_view_at(today, habit)).collect(),
    }
}

pub fn habit_view(habit: &Habit) -> HabitView {
    habit_view_at(DayKey::today(), habit)
}

pub fn habit_view_at(today: DayKey, habit: &Habit) -> HabitView {
    let last_7_days = (0..7)
        .rev()
        .map(|offset| {
            let date = today.shift(-offset);
            DayPoint {
                date,
                done: habit.is_completed_on(date),
            }
        })
        .collect();

    HabitView {
        habit: habit.clone(),
        streak: streak_on(&habit.completed_dates, today),
        completed_today: habit.is_completed_on(today),
        last_7_days,
    }
}
