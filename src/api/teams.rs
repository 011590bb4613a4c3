//! `/teams` handlers.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use super::{body, ApiError, AppState};
use crate::models::{NewTeam, Team, TeamId, TeamPatch, User, ValidationError};
use crate::storage::TeamStore;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = state.db.with_connection(|conn| TeamStore::new(conn).list())?;
    Ok(Json(teams))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewTeam>, JsonRejection>,
) -> Result<(StatusCode, Json<Team>), ApiError> {
    let team = body(payload)?.into_team(TeamId::generate(), Utc::now());
    team.validate()?;

    state.db.with_transaction(|tx| {
        let store = TeamStore::new(tx);
        ensure_name_free(&store, &team)?;
        store.insert(&team)?;
        Ok::<_, ApiError>(())
    })?;

    info!(team_id = %team.id, name = %team.name, "Created team");
    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<Json<Team>, ApiError> {
    find(&state, &id).map(Json)
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    payload: Result<Json<NewTeam>, JsonRejection>,
) -> Result<Json<Team>, ApiError> {
    let input = body(payload)?;
    save_changes(&state, &id, |team| team.replace_with(input)).map(Json)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    payload: Result<Json<TeamPatch>, JsonRejection>,
) -> Result<Json<Team>, ApiError> {
    let patch = body(payload)?;
    save_changes(&state, &id, |team| team.apply(patch)).map(Json)
}

/// Members keep their `team_id` after the team is gone.
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<StatusCode, ApiError> {
    state
        .db
        .with_connection(|conn| TeamStore::new(conn).delete(&id))?;

    info!(team_id = %id, "Deleted team");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /teams/:id/members`
pub async fn members(
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<Json<Vec<User>>, ApiError> {
    find(&state, &id)?;
    Ok(Json(state.relations.members_of_team(&id)?))
}

fn find(state: &AppState, id: &TeamId) -> Result<Team, ApiError> {
    state
        .db
        .with_connection(|conn| TeamStore::new(conn).get(id))?
        .ok_or_else(|| ApiError::not_found(format!("Team {id}")))
}

fn save_changes(
    state: &AppState,
    id: &TeamId,
    change: impl FnOnce(&mut Team),
) -> Result<Team, ApiError> {
    state.db.with_transaction(|tx| {
        let store = TeamStore::new(tx);
        let mut team = store
            .get(id)?
            .ok_or_else(|| ApiError::not_found(format!("Team {id}")))?;

        change(&mut team);
        team.validate()?;
        ensure_name_free(&store, &team)?;

        store.update(&team)?;
        Ok(team)
    })
}

fn ensure_name_free(store: &TeamStore<'_>, team: &Team) -> Result<(), ApiError> {
    if store.name_taken(&team.name, Some(&team.id))? {
        return Err(ValidationError::new("name", "team with this name already exists.").into());
    }
    Ok(())
}
