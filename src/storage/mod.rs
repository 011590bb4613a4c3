//! Storage module for database and configuration.

pub mod activity_store;
pub mod config;
pub mod database;
pub mod leaderboard_store;
pub mod schema;
pub mod team_store;
pub mod user_store;
pub mod workout_store;

pub use activity_store::ActivityStore;
pub use config::{AppConfig, ConfigError, DatabaseSettings, LeaderboardSettings, ServerSettings};
pub use database::{clear_tables, Database, DatabaseError};
pub use leaderboard_store::LeaderboardStore;
pub use team_store::TeamStore;
pub use user_store::UserStore;
pub use workout_store::WorkoutStore;
