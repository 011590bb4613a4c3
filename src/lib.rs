//! OctoFit - fitness tracking backend
//!
//! A REST service over users, teams, activities, workouts and a leaderboard
//! derived from logged activities, stored in an embedded SQLite database.

pub mod api;
pub mod leaderboard;
pub mod models;
pub mod query;
pub mod relations;
pub mod seed;
pub mod server;
pub mod storage;

// Re-export commonly used types
pub use api::{router, ApiError, AppState};
pub use leaderboard::LeaderboardService;
pub use relations::RelationResolver;
pub use storage::{AppConfig, Database, DatabaseError};
