use crate::storage::JsonFileStore;
use crate::store::HabitStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<HabitStore<JsonFileStore>>>,
    pub habit_limit: usize,
}

impl AppState {
    pub fn new(store: HabitStore<JsonFileStore>, habit_limit: usize) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            habit_limit,
        }
    }
}
