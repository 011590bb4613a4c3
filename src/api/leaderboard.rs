//! `/leaderboard` handlers.
//!
//! Direct writes are accepted for parity with the other collections, but
//! points are always derived from `total_calories`.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use super::{body, filter, ApiError, AppState, QueryParams};
use crate::models::{
    LeaderboardEntry, LeaderboardId, LeaderboardPatch, NewLeaderboardEntry, UserId,
    ValidationError,
};
use crate::query::LeaderboardFilter;
use crate::storage::LeaderboardStore;

/// Rows in ranking order, optionally for one team.
pub async fn list(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let filter = filter::<LeaderboardFilter>(query)?;
    Ok(Json(state.leaderboard.list(&filter)?))
}

/// `GET /leaderboard/by_team?team_id=`
pub async fn by_team(
    state: State<AppState>,
    query: QueryParams,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    list(state, query).await
}

/// `POST /leaderboard/refresh`
pub async fn refresh_all(
    State(state): State<AppState>,
) -> Result<Json<Vec<LeaderboardEntry>>, ApiError> {
    let written = state.leaderboard.refresh_all(Utc::now())?;
    info!(rows = written.len(), "Leaderboard refreshed on request");

    Ok(Json(state.leaderboard.list(&LeaderboardFilter::default())?))
}

/// `POST /leaderboard/refresh/:user_id`
pub async fn refresh_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> Result<Json<LeaderboardEntry>, ApiError> {
    Ok(Json(state.leaderboard.refresh(&user_id, Utc::now())?))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewLeaderboardEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<LeaderboardEntry>), ApiError> {
    let entry = body(payload)?.into_entry(LeaderboardId::generate(), Utc::now());
    entry.validate()?;

    state.db.with_transaction(|tx| {
        let store = LeaderboardStore::new(tx);
        ensure_single_row(&store, &entry)?;
        store.insert(&entry)?;
        Ok::<_, ApiError>(())
    })?;

    info!(entry_id = %entry.id, user_id = %entry.user_id, "Created leaderboard row");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<LeaderboardId>,
) -> Result<Json<LeaderboardEntry>, ApiError> {
    let entry = state
        .db
        .with_connection(|conn| LeaderboardStore::new(conn).get(&id))?
        .ok_or_else(|| ApiError::not_found(format!("Leaderboard entry {id}")))?;
    Ok(Json(entry))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<LeaderboardId>,
    payload: Result<Json<NewLeaderboardEntry>, JsonRejection>,
) -> Result<Json<LeaderboardEntry>, ApiError> {
    let input = body(payload)?;
    save_changes(&state, &id, |entry| entry.replace_with(input)).map(Json)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<LeaderboardId>,
    payload: Result<Json<LeaderboardPatch>, JsonRejection>,
) -> Result<Json<LeaderboardEntry>, ApiError> {
    let patch = body(payload)?;
    save_changes(&state, &id, |entry| entry.apply(patch)).map(Json)
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<LeaderboardId>,
) -> Result<StatusCode, ApiError> {
    state
        .db
        .with_connection(|conn| LeaderboardStore::new(conn).delete(&id))?;
    Ok(StatusCode::NO_CONTENT)
}

fn save_changes(
    state: &AppState,
    id: &LeaderboardId,
    change: impl FnOnce(&mut LeaderboardEntry),
) -> Result<LeaderboardEntry, ApiError> {
    state.db.with_transaction(|tx| {
        let store = LeaderboardStore::new(tx);
        let mut entry = store
            .get(id)?
            .ok_or_else(|| ApiError::not_found(format!("Leaderboard entry {id}")))?;

        change(&mut entry);
        entry.last_updated = Utc::now();
        entry.validate()?;
        ensure_single_row(&store, &entry)?;

        store.update(&entry)?;
        Ok(entry)
    })
}

fn ensure_single_row(store: &LeaderboardStore<'_>, entry: &LeaderboardEntry) -> Result<(), ApiError> {
    let clash = store
        .get_for_user(&entry.user_id)?
        .is_some_and(|existing| existing.id != entry.id);
    if clash {
        return Err(ValidationError::new(
            "user_id",
            "leaderboard entry for this user already exists.",
        )
        .into());
    }
    Ok(())
}
