use crate::day_key::DayKey;
use crate::errors::AppError;
use crate::models::{
    CreateHabitRequest, DEFAULT_COLOR, HabitId, HabitView, SummaryResponse, ToggleRequest,
};
use crate::state::AppState;
use crate::stats::{build_summary, habit_view};
use crate::storage::JsonFileStore;
use crate::store::HabitStore;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitView>> {
    let store = state.store.lock().await;
    Json(store.list().iter().map(habit_view).collect())
}

pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let store = state.store.lock().await;
    Json(build_summary(store.list(), state.habit_limit))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitView>), AppError> {
    let color = payload
        .color
        .as_deref()
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .unwrap_or(DEFAULT_COLOR)
        .to_string();
    let habit_limit = state.habit_limit;

    let habit = mutate(&state, move |store| {
        if store.list().len() >= habit_limit {
            return Err(AppError::conflict(format!(
                "habit limit of {habit_limit} reached"
            )));
        }
        Ok(store.create(&payload.name, &color)?)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(habit_view(&habit))))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = HabitId::from(id);
    mutate(&state, move |store| Ok(store.delete(&id)?)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn toggle_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Option<Json<ToggleRequest>>,
) -> Result<Json<HabitView>, AppError> {
    let request = payload.map(|Json(request)| request).unwrap_or_default();
    let day = request
        .day
        .as_deref()
        .map(DayKey::parse)
        .transpose()
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let id = HabitId::from(id);
    mutate(&state, move |store| {
        let missing = || AppError::not_found(format!("no habit with id {id}"));
        if store.toggle_completion(&id, day)?.is_none() {
            return Err(missing());
        }
        store.get(&id).map(|habit| Json(habit_view(habit))).ok_or_else(missing)
    })
    .await
}

/// Runs a store mutation on the blocking pool, since every mutation writes
/// the habit file before it returns.
async fn mutate<T, F>(state: &AppState, op: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&mut HabitStore<JsonFileStore>) -> Result<T, AppError> + Send + 'static,
{
    let store = Arc::clone(&state.store);
    tokio::task::spawn_blocking(move || {
        let mut store = store.blocking_lock();
        op(&mut *store)
    })
    .await
    .map_err(AppError::internal)?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_in(dir: &tempfile::TempDir, habit_limit: usize) -> AppState {
        let (store, _) = HabitStore::open(JsonFileStore::new(dir.path().join("habits.json")));
        AppState::new(store, habit_limit)
    }

    #[tokio::test]
    async fn mutations_write_through_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir, 3);

        let (status, Json(created)) = create_habit(
            State(state.clone()),
            Json(CreateHabitRequest {
                name: "Meditate".to_string(),
                color: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.habit.color, DEFAULT_COLOR);

        let request = ToggleRequest {
            day: Some("2024-06-01".to_string()),
        };
        let Json(toggled) = toggle_habit(
            State(state.clone()),
            Path(created.habit.id.to_string()),
            Some(Json(request)),
        )
        .await
        .unwrap();
        assert_eq!(toggled.habit.completed_dates.len(), 1);

        let (reopened, _) = HabitStore::open(JsonFileStore::new(dir.path().join("habits.json")));
        assert_eq!(reopened.list(), std::slice::from_ref(&toggled.habit));

        let status = delete_habit(State(state.clone()), Path(created.habit.id.to_string()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(state.store.lock().await.list().is_empty());
    }

    #[tokio::test]
    async fn limit_and_unknown_ids_surface_as_errors() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_in(&dir, 1);
        let request = || {
            Json(CreateHabitRequest {
                name: "Read".to_string(),
                color: Some("#22C55E".to_string()),
            })
        };

        create_habit(State(state.clone()), request()).await.unwrap();
        let err = create_habit(State(state.clone()), request()).await.unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err = toggle_habit(State(state), Path("missing".to_string()), None)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }
}
