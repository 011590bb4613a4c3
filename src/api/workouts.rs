//! `/workouts` handlers.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use super::{body, filter, ApiError, AppState, QueryParams};
use crate::models::{NewWorkout, Workout, WorkoutId, WorkoutPatch};
use crate::query::WorkoutFilter;
use crate::storage::WorkoutStore;

/// Workouts matching both `category` and `difficulty` when given.
pub async fn list(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<Vec<Workout>>, ApiError> {
    let filter = filter::<WorkoutFilter>(query)?;
    let workouts = state
        .db
        .with_connection(|conn| WorkoutStore::new(conn).list(&filter))?;
    Ok(Json(workouts))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewWorkout>, JsonRejection>,
) -> Result<(StatusCode, Json<Workout>), ApiError> {
    let workout = body(payload)?.into_workout(WorkoutId::generate());
    workout.validate()?;

    state
        .db
        .with_connection(|conn| WorkoutStore::new(conn).insert(&workout))?;

    info!(workout_id = %workout.id, title = %workout.title, "Created workout");
    Ok((StatusCode::CREATED, Json(workout)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<WorkoutId>,
) -> Result<Json<Workout>, ApiError> {
    let workout = state
        .db
        .with_connection(|conn| WorkoutStore::new(conn).get(&id))?
        .ok_or_else(|| ApiError::not_found(format!("Workout {id}")))?;
    Ok(Json(workout))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<WorkoutId>,
    payload: Result<Json<NewWorkout>, JsonRejection>,
) -> Result<Json<Workout>, ApiError> {
    let input = body(payload)?;
    save_changes(&state, &id, |workout| workout.replace_with(input)).map(Json)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<WorkoutId>,
    payload: Result<Json<WorkoutPatch>, JsonRejection>,
) -> Result<Json<Workout>, ApiError> {
    let patch = body(payload)?;
    save_changes(&state, &id, |workout| workout.apply(patch)).map(Json)
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<WorkoutId>,
) -> Result<StatusCode, ApiError> {
    state
        .db
        .with_connection(|conn| WorkoutStore::new(conn).delete(&id))?;
    Ok(StatusCode::NO_CONTENT)
}

fn save_changes(
    state: &AppState,
    id: &WorkoutId,
    change: impl FnOnce(&mut Workout),
) -> Result<Workout, ApiError> {
    state.db.with_transaction(|tx| {
        let store = WorkoutStore::new(tx);
        let mut workout = store
            .get(id)?
            .ok_or_else(|| ApiError::not_found(format!("Workout {id}")))?;

        change(&mut workout);
        workout.validate()?;

        store.update(&workout)?;
        Ok(workout)
    })
}
