pub mod app;
pub mod config;
pub mod day_key;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod stats;
pub mod storage;
pub mod store;
pub mod streak;
pub mod state;

pub use app::router;
pub use config::Config;
pub use day_key::DayKey;
pub use errors::{HabitError, PersistenceError};
pub use models::{Habit, HabitId, Toggle};
pub use state::AppState;
pub use storage::{JsonFileStore, MemoryStore, PersistenceAdapter};
pub use store::HabitStore;
pub use streak::streak_for;
