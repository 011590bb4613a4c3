//! `/activities` handlers.
//!
//! With `leaderboard.refresh_on_activity_write` enabled, every write also
//! refreshes the leaderboard rows of the users it touched, in the same
//! transaction.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use rusqlite::Connection;
use tracing::{debug, info};

use super::{body, filter, ApiError, AppState, QueryParams};
use crate::leaderboard::aggregation;
use crate::models::{Activity, ActivityId, ActivityPatch, NewActivity, UserId};
use crate::query::ActivityFilter;
use crate::storage::{ActivityStore, DatabaseError};

pub async fn list(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let filter = filter::<ActivityFilter>(query)?;
    let activities = state
        .db
        .with_connection(|conn| ActivityStore::new(conn).list(&filter))?;
    Ok(Json(activities))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewActivity>, JsonRejection>,
) -> Result<(StatusCode, Json<Activity>), ApiError> {
    let activity = body(payload)?.into_activity(ActivityId::generate());
    activity.validate()?;

    let refresh = state.refresh_on_activity_write();
    state.db.with_transaction(|tx| {
        ActivityStore::new(tx).insert(&activity)?;
        if refresh {
            refresh_users(tx, [&activity.user_id])?;
        }
        Ok::<_, ApiError>(())
    })?;

    info!(activity_id = %activity.id, user_id = %activity.user_id, "Logged activity");
    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
) -> Result<Json<Activity>, ApiError> {
    let activity = state
        .db
        .with_connection(|conn| ActivityStore::new(conn).get(&id))?
        .ok_or_else(|| ApiError::not_found(format!("Activity {id}")))?;
    Ok(Json(activity))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
    payload: Result<Json<NewActivity>, JsonRejection>,
) -> Result<Json<Activity>, ApiError> {
    let input = body(payload)?;
    save_changes(&state, &id, |activity| activity.replace_with(input)).map(Json)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
    payload: Result<Json<ActivityPatch>, JsonRejection>,
) -> Result<Json<Activity>, ApiError> {
    let patch = body(payload)?;
    save_changes(&state, &id, |activity| activity.apply(patch)).map(Json)
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<ActivityId>,
) -> Result<StatusCode, ApiError> {
    let refresh = state.refresh_on_activity_write();
    state.db.with_transaction(|tx| {
        let store = ActivityStore::new(tx);
        let activity = store
            .get(&id)?
            .ok_or_else(|| ApiError::not_found(format!("Activity {id}")))?;

        store.delete(&id)?;
        if refresh {
            refresh_users(tx, [&activity.user_id])?;
        }
        Ok::<_, ApiError>(())
    })?;

    info!(activity_id = %id, "Deleted activity");
    Ok(StatusCode::NO_CONTENT)
}

fn save_changes(
    state: &AppState,
    id: &ActivityId,
    change: impl FnOnce(&mut Activity),
) -> Result<Activity, ApiError> {
    let refresh = state.refresh_on_activity_write();

    state.db.with_transaction(|tx| {
        let store = ActivityStore::new(tx);
        let mut activity = store
            .get(id)?
            .ok_or_else(|| ApiError::not_found(format!("Activity {id}")))?;
        let previous_owner = activity.user_id.clone();

        change(&mut activity);
        activity.validate()?;
        store.update(&activity)?;

        // A reassigned activity changes the totals of both users.
        if refresh {
            refresh_users(tx, [&previous_owner, &activity.user_id])?;
        }
        Ok(activity)
    })
}

fn refresh_users<'u>(
    conn: &Connection,
    user_ids: impl IntoIterator<Item = &'u UserId>,
) -> Result<(), DatabaseError> {
    let entries = aggregation::refresh_users(conn, user_ids, Utc::now())?;
    debug!(users = entries.len(), "Refreshed leaderboard after activity write");
    Ok(())
}
