//! Per-user totals and their materialization into leaderboard rows.
//!
//! These functions take a borrowed connection so callers decide the
//! transaction boundary: the service wraps each call in its own transaction,
//! the seeding pass runs them inside its larger one.

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::models::{Activity, LeaderboardEntry, LeaderboardTotals, UserId};
use crate::query::UserFilter;
use crate::storage::{ActivityStore, DatabaseError, LeaderboardStore, UserStore};

/// Totals over a snapshot of one user's activities.
pub fn compute_totals(activities: &[Activity]) -> LeaderboardTotals {
    let total_calories = activities.iter().map(|a| i64::from(a.calories)).sum();
    LeaderboardTotals::new(activities.len() as i64, total_calories)
}

/// Current totals for a user. Unknown users have all-zero totals.
pub fn totals_for_user(conn: &Connection, user_id: &UserId) -> Result<LeaderboardTotals, DatabaseError> {
    let activities = ActivityStore::new(conn).list_for_user(user_id)?;
    Ok(compute_totals(&activities))
}

/// Recompute a user's totals and upsert their leaderboard row.
///
/// The row's team snapshot is copied from the user record, or cleared if the
/// user no longer exists.
pub fn refresh_user(
    conn: &Connection,
    user_id: &UserId,
    now: DateTime<Utc>,
) -> Result<LeaderboardEntry, DatabaseError> {
    let totals = totals_for_user(conn, user_id)?;
    let team_id = UserStore::new(conn).get(user_id)?.and_then(|u| u.team_id);

    let entry = LeaderboardStore::new(conn).upsert_for_user(user_id, team_id, totals, now)?;

    tracing::debug!(
        user_id = %user_id,
        activities = entry.total_activities,
        points = entry.total_points,
        "Refreshed leaderboard row"
    );
    Ok(entry)
}

/// Refresh each distinct user in `user_ids` once, in first-seen order.
pub fn refresh_users<'u>(
    conn: &Connection,
    user_ids: impl IntoIterator<Item = &'u UserId>,
    now: DateTime<Utc>,
) -> Result<Vec<LeaderboardEntry>, DatabaseError> {
    let mut seen: Vec<&UserId> = Vec::new();
    let mut entries = Vec::new();

    for user_id in user_ids {
        if seen.contains(&user_id) {
            continue;
        }
        entries.push(refresh_user(conn, user_id, now)?);
        seen.push(user_id);
    }
    Ok(entries)
}

/// Refresh every user's row, returning the written rows in user order.
pub fn refresh_all(conn: &Connection, now: DateTime<Utc>) -> Result<Vec<LeaderboardEntry>, DatabaseError> {
    let users = UserStore::new(conn).list(&UserFilter::default())?;

    let mut entries = Vec::with_capacity(users.len());
    for user in &users {
        entries.push(refresh_user(conn, &user.id, now)?);
    }

    tracing::info!(users = entries.len(), "Refreshed leaderboard");
    Ok(entries)
}
