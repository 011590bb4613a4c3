//! `/users` handlers.

use axum::{
    extract::rejection::JsonRejection,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use tracing::info;

use super::{body, filter, ApiError, AppState, QueryParams};
use crate::models::{Activity, NewUser, User, UserId, UserPatch, ValidationError};
use crate::query::UserFilter;
use crate::storage::UserStore;

pub async fn list(
    State(state): State<AppState>,
    query: QueryParams,
) -> Result<Json<Vec<User>>, ApiError> {
    let filter = filter::<UserFilter>(query)?;
    let users = state
        .db
        .with_connection(|conn| UserStore::new(conn).list(&filter))?;
    Ok(Json(users))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = body(payload)?.into_user(UserId::generate(), Utc::now());
    user.validate()?;

    state.db.with_transaction(|tx| {
        let store = UserStore::new(tx);
        ensure_email_free(&store, &user)?;
        store.insert(&user)?;
        Ok::<_, ApiError>(())
    })?;

    info!(user_id = %user.id, "Created user");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .db
        .with_connection(|conn| UserStore::new(conn).get(&id))?
        .ok_or_else(|| ApiError::not_found(format!("User {id}")))?;
    Ok(Json(user))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let input = body(payload)?;
    save_changes(&state, &id, |user| user.replace_with(input)).map(Json)
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let patch = body(payload)?;
    save_changes(&state, &id, |user| user.apply(patch)).map(Json)
}

pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    state
        .db
        .with_connection(|conn| UserStore::new(conn).delete(&id))?;

    info!(user_id = %id, "Deleted user");
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/:id/activities`
pub async fn activities(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<Activity>>, ApiError> {
    let exists = state
        .db
        .with_connection(|conn| UserStore::new(conn).get(&id))?
        .is_some();
    if !exists {
        return Err(ApiError::not_found(format!("User {id}")));
    }

    Ok(Json(state.relations.activities_for_user(&id)?))
}

fn save_changes(
    state: &AppState,
    id: &UserId,
    change: impl FnOnce(&mut User),
) -> Result<User, ApiError> {
    state.db.with_transaction(|tx| {
        let store = UserStore::new(tx);
        let mut user = store
            .get(id)?
            .ok_or_else(|| ApiError::not_found(format!("User {id}")))?;

        change(&mut user);
        user.validate()?;
        ensure_email_free(&store, &user)?;

        store.update(&user)?;
        Ok(user)
    })
}

fn ensure_email_free(store: &UserStore<'_>, user: &User) -> Result<(), ApiError> {
    if store.email_taken(&user.email, Some(&user.id))? {
        return Err(ValidationError::new("email", "user with this email already exists.").into());
    }
    Ok(())
}
