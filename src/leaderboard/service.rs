//! Leaderboard service.
//!
//! Each refresh runs in its own transaction while holding the database lock,
//! so the activity snapshot it reads cannot change before its row is written.

use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::aggregation;
use crate::models::{LeaderboardEntry, LeaderboardTotals, UserId};
use crate::query::LeaderboardFilter;
use crate::storage::{Database, DatabaseError, LeaderboardStore};

/// Leaderboard service.
#[derive(Clone)]
pub struct LeaderboardService {
    db: Arc<Database>,
}

impl LeaderboardService {
    /// Create a new leaderboard service.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Totals a refresh would write for this user, without writing them.
    pub fn compute(&self, user_id: &UserId) -> Result<LeaderboardTotals, DatabaseError> {
        self.db
            .with_connection(|conn| aggregation::totals_for_user(conn, user_id))
    }

    /// Recompute and persist one user's row.
    pub fn refresh(
        &self,
        user_id: &UserId,
        now: DateTime<Utc>,
    ) -> Result<LeaderboardEntry, DatabaseError> {
        self.db
            .with_transaction(|tx| aggregation::refresh_user(tx, user_id, now))
    }

    /// Recompute and persist the row of every user.
    pub fn refresh_all(&self, now: DateTime<Utc>) -> Result<Vec<LeaderboardEntry>, DatabaseError> {
        self.db
            .with_transaction(|tx| aggregation::refresh_all(tx, now))
    }

    /// Rows in ranking order, optionally narrowed to one team.
    pub fn list(&self, filter: &LeaderboardFilter) -> Result<Vec<LeaderboardEntry>, DatabaseError> {
        self.db
            .with_connection(|conn| LeaderboardStore::new(conn).list(filter))
    }
}
