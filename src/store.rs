use crate::day_key::DayKey;
use crate::errors::{HabitError, PersistenceError};
use crate::models::{Habit, HabitId, Toggle};
use crate::storage::PersistenceAdapter;
use crate::streak::streak_for;
use chrono::{DateTime, TimeZone, Utc};
use tracing::{error, info, warn};

/// Owns the habit collection and is the only writer of completion records.
///
/// Every mutation writes the full collection through the adapter before it
/// returns. A failed write leaves the mutation applied and the store dirty
/// until a later write succeeds.
#[derive(Debug)]
pub struct HabitStore<P> {
    habits: Vec<Habit>,
    adapter: P,
    dirty: bool,
}

impl<P: PersistenceAdapter> HabitStore<P> {
    /// Loads the stored collection, falling back to an empty one when the
    /// adapter cannot be read. The load failure is handed back as a warning.
    pub fn open(adapter: P) -> (Self, Option<PersistenceError>) {
        let (habits, warning) = match adapter.load() {
            Ok(habits) => (habits, None),
            Err(err) => {
                warn!("starting with no habits, stored data could not be read: {err}");
                (Vec::new(), Some(err))
            }
        };
        info!("loaded {} habit(s)", habits.len());

        let store = Self {
            habits,
            adapter,
            dirty: false,
        };
        (store, warning)
    }

    pub fn create(&mut self, name: &str, color: &str) -> Result<Habit, HabitError> {
        self.create_at(name, color, Utc::now())
    }

    pub fn create_at(
        &mut self,
        name: &str,
        color: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Habit, HabitError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitError::Validation);
        }

        let habit = Habit::new(name.to_string(), color.to_string(), created_at);
        info!(id = %habit.id, "created habit {name:?}");
        self.habits.push(habit.clone());
        self.persist()?;
        Ok(habit)
    }

    /// Removes the habit if present. Deleting an unknown id changes nothing.
    pub fn delete(&mut self, id: &HabitId) -> Result<Option<Habit>, HabitError> {
        let Some(index) = self.habits.iter().position(|habit| &habit.id == id) else {
            return Ok(None);
        };

        let removed = self.habits.remove(index);
        info!(id = %removed.id, "deleted habit {:?}", removed.name);
        self.persist()?;
        Ok(Some(removed))
    }

    /// Flips completion of `day` (today when `None`). Unknown ids are ignored
    /// and report `None`.
    pub fn toggle_completion(
        &mut self,
        id: &HabitId,
        day: Option<DayKey>,
    ) -> Result<Option<Toggle>, HabitError> {
        let day = day.unwrap_or_else(DayKey::today);
        let Some(habit) = self.habits.iter_mut().find(|habit| &habit.id == id) else {
            return Ok(None);
        };

        let toggle = if habit.completed_dates.remove(&day) {
            Toggle::Unmarked
        } else {
            habit.completed_dates.insert(day);
            Toggle::Marked
        };
        info!(id = %habit.id, %day, ?toggle, "toggled completion");

        self.persist()?;
        Ok(Some(toggle))
    }

    pub fn list(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: &HabitId) -> Option<&Habit> {
        self.habits.iter().find(|habit| &habit.id == id)
    }

    pub fn streak_for<Tz: TimeZone>(&self, id: &HabitId, now: &DateTime<Tz>) -> Option<u32> {
        self.get(id).map(|habit| streak_for(habit, now))
    }

    /// True while the last write failed and memory is ahead of storage.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Retries writing the current collection.
    pub fn flush(&mut self) -> Result<(), HabitError> {
        self.persist()
    }

    pub fn adapter(&self) -> &P {
        &self.adapter
    }

    pub fn into_adapter(self) -> P {
        self.adapter
    }

    fn persist(&mut self) -> Result<(), HabitError> {
        match self.adapter.save(&self.habits) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                error!("failed to save habits: {err}");
                self.dirty = true;
                Err(err.into())
            }
        }
    }
}
