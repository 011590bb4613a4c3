//! Leaderboard aggregation.
//!
//! Rows are derived from activities and only change when refreshed.

pub mod aggregation;
pub mod service;

pub use aggregation::{compute_totals, refresh_all, refresh_user, refresh_users, totals_for_user};
pub use service::LeaderboardService;
