//! REST surface over the five collections.

pub mod activities;
pub mod error;
pub mod leaderboard;
pub mod root;
pub mod teams;
pub mod users;
pub mod workouts;

use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::Query,
    routing::{get, post},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::leaderboard::LeaderboardService;
use crate::models::ValidationError;
use crate::relations::RelationResolver;
use crate::storage::{AppConfig, Database};

pub use error::ApiError;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub leaderboard: LeaderboardService,
    pub relations: RelationResolver,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: Arc<Database>, config: AppConfig) -> Self {
        Self {
            leaderboard: LeaderboardService::new(db.clone()),
            relations: RelationResolver::new(db.clone()),
            config: Arc::new(config),
            db,
        }
    }

    /// Whether activity writes should refresh the affected leaderboard rows.
    pub fn refresh_on_activity_write(&self) -> bool {
        self.config.leaderboard.refresh_on_activity_write
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root::api_root))
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:id",
            get(users::retrieve)
                .put(users::replace)
                .patch(users::update)
                .delete(users::destroy),
        )
        .route("/users/:id/activities", get(users::activities))
        .route("/teams", get(teams::list).post(teams::create))
        .route(
            "/teams/:id",
            get(teams::retrieve)
                .put(teams::replace)
                .patch(teams::update)
                .delete(teams::destroy),
        )
        .route("/teams/:id/members", get(teams::members))
        .route("/activities", get(activities::list).post(activities::create))
        .route(
            "/activities/:id",
            get(activities::retrieve)
                .put(activities::replace)
                .patch(activities::update)
                .delete(activities::destroy),
        )
        .route("/leaderboard", get(leaderboard::list).post(leaderboard::create))
        .route("/leaderboard/by_team", get(leaderboard::by_team))
        .route("/leaderboard/refresh", post(leaderboard::refresh_all))
        .route("/leaderboard/refresh/:user_id", post(leaderboard::refresh_user))
        .route(
            "/leaderboard/:id",
            get(leaderboard::retrieve)
                .put(leaderboard::replace)
                .patch(leaderboard::update)
                .delete(leaderboard::destroy),
        )
        .route("/workouts", get(workouts::list).post(workouts::create))
        .route(
            "/workouts/:id",
            get(workouts::retrieve)
                .put(workouts::replace)
                .patch(workouts::update)
                .delete(workouts::destroy),
        )
        .with_state(state)
}

/// Unwrap a JSON body, reporting malformed input as a validation error.
pub(crate) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(value)| value).map_err(ApiError::from)
}

/// Raw query string pairs, in request order.
pub(crate) type QueryParams = Result<Query<Vec<(String, String)>>, QueryRejection>;

/// Decode a query string filter. A repeated parameter keeps its last value.
pub(crate) fn filter<T: DeserializeOwned>(query: QueryParams) -> Result<T, ApiError> {
    let Query(pairs) = query?;
    let params: Map<String, Value> = pairs
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    serde_json::from_value(Value::Object(params))
        .map_err(|err| ValidationError::new("query", err.to_string()).into())
}
