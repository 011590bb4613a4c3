//! Leaderboard row persistence.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};

use crate::models::{LeaderboardEntry, LeaderboardId, LeaderboardTotals, TeamId, UserId};
use crate::query::LeaderboardFilter;
use crate::storage::database::{parse_timestamp, query_error, write_error, DatabaseError};

const COLUMNS: &str =
    "id, user_id, team_id, total_points, total_activities, total_calories, last_updated";

/// Ranking order: points descending, ties by user id then row id.
const RANKING: &str = "ORDER BY total_points DESC, user_id ASC, id ASC";

/// Leaderboard store over a borrowed connection or transaction.
pub struct LeaderboardStore<'a> {
    conn: &'a Connection,
}

impl<'a> LeaderboardStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, entry: &LeaderboardEntry) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO leaderboard (id, user_id, team_id, total_points, total_activities,
                 total_calories, last_updated)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    entry.id,
                    entry.user_id,
                    entry.team_id,
                    entry.total_points,
                    entry.total_activities,
                    entry.total_calories,
                    entry.last_updated.to_rfc3339(),
                ],
            )
            .map_err(write_error)?;

        Ok(())
    }

    pub fn get(&self, id: &LeaderboardId) -> Result<Option<LeaderboardEntry>, DatabaseError> {
        self.query_one(&format!("SELECT {COLUMNS} FROM leaderboard WHERE id = ?1"), id.as_str())
    }

    /// The row belonging to a user, if one has been written.
    pub fn get_for_user(&self, user_id: &UserId) -> Result<Option<LeaderboardEntry>, DatabaseError> {
        self.query_one(
            &format!("SELECT {COLUMNS} FROM leaderboard WHERE user_id = ?1"),
            user_id.as_str(),
        )
    }

    fn query_one(&self, sql: &str, key: &str) -> Result<Option<LeaderboardEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(sql).map_err(query_error)?;

        match stmt.query_row(params![key], LeaderboardRow::from_row) {
            Ok(row) => Ok(Some(row.into_entry()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(query_error(e)),
        }
    }

    /// Rows matching the filter, always in ranking order.
    pub fn list(&self, filter: &LeaderboardFilter) -> Result<Vec<LeaderboardEntry>, DatabaseError> {
        let predicates = filter.predicates();
        let sql = format!(
            "SELECT {COLUMNS} FROM leaderboard{} {RANKING}",
            predicates.where_clause()
        );

        let mut stmt = self.conn.prepare(&sql).map_err(query_error)?;
        let rows = stmt
            .query_map(predicates.params().as_slice(), LeaderboardRow::from_row)
            .map_err(query_error)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(query_error)?.into_entry()?);
        }
        Ok(entries)
    }

    pub fn update(&self, entry: &LeaderboardEntry) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE leaderboard SET user_id = ?2, team_id = ?3, total_points = ?4,
                 total_activities = ?5, total_calories = ?6, last_updated = ?7 WHERE id = ?1",
                params![
                    entry.id,
                    entry.user_id,
                    entry.team_id,
                    entry.total_points,
                    entry.total_activities,
                    entry.total_calories,
                    entry.last_updated.to_rfc3339(),
                ],
            )
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Leaderboard entry {}", entry.id)));
        }
        Ok(())
    }

    pub fn delete(&self, id: &LeaderboardId) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM leaderboard WHERE id = ?1", params![id])
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Leaderboard entry {id}")));
        }
        Ok(())
    }

    pub fn count(&self, filter: &LeaderboardFilter) -> Result<usize, DatabaseError> {
        let predicates = filter.predicates();
        let count: i64 = self
            .conn
            .query_row(
                &format!("SELECT COUNT(*) FROM leaderboard{}", predicates.where_clause()),
                predicates.params().as_slice(),
                |row| row.get(0),
            )
            .map_err(query_error)?;

        Ok(count as usize)
    }

    /// Write totals for a user, updating their row in place or creating it.
    pub fn upsert_for_user(
        &self,
        user_id: &UserId,
        team_id: Option<TeamId>,
        totals: LeaderboardTotals,
        now: DateTime<Utc>,
    ) -> Result<LeaderboardEntry, DatabaseError> {
        match self.get_for_user(user_id)? {
            Some(mut entry) => {
                entry.team_id = team_id;
                entry.set_totals(totals);
                entry.last_updated = now;
                self.update(&entry)?;
                Ok(entry)
            }
            None => {
                let mut entry = LeaderboardEntry {
                    id: LeaderboardId::generate(),
                    user_id: user_id.clone(),
                    team_id,
                    total_points: 0,
                    total_activities: 0,
                    total_calories: 0,
                    last_updated: now,
                };
                entry.set_totals(totals);
                self.insert(&entry)?;
                Ok(entry)
            }
        }
    }
}

struct LeaderboardRow {
    id: LeaderboardId,
    user_id: UserId,
    team_id: Option<TeamId>,
    total_points: i64,
    total_activities: i64,
    total_calories: i64,
    last_updated: String,
}

impl LeaderboardRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            team_id: row.get(2)?,
            total_points: row.get(3)?,
            total_activities: row.get(4)?,
            total_calories: row.get(5)?,
            last_updated: row.get(6)?,
        })
    }

    fn into_entry(self) -> Result<LeaderboardEntry, DatabaseError> {
        Ok(LeaderboardEntry {
            last_updated: parse_timestamp(&self.last_updated, "last_updated")?,
            id: self.id,
            user_id: self.user_id,
            team_id: self.team_id,
            total_points: self.total_points,
            total_activities: self.total_activities,
            total_calories: self.total_calories,
        })
    }
}
