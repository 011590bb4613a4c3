//! Derived per-user leaderboard rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{LeaderboardId, TeamId, UserId};
use super::validation::{
    blank_as_none, double_option, require_non_negative, require_text, ValidationError,
    MAX_REFERENCE_LEN,
};

/// One point is awarded per this many calories.
pub const CALORIES_PER_POINT: i64 = 10;

/// Points for a calorie total, truncating toward zero.
pub fn points_for_calories(total_calories: i64) -> i64 {
    total_calories / CALORIES_PER_POINT
}

/// Aggregate totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LeaderboardTotals {
    pub total_activities: i64,
    pub total_calories: i64,
    pub total_points: i64,
}

impl LeaderboardTotals {
    /// Totals for the given counts, deriving points from calories.
    pub fn new(total_activities: i64, total_calories: i64) -> Self {
        Self {
            total_activities,
            total_calories,
            total_points: points_for_calories(total_calories),
        }
    }
}

/// A user's standing, materialized from their activities.
///
/// `team_id` is a snapshot of the user's team taken when the row was last
/// written; it does not follow later team changes until the next refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// Unique identifier
    pub id: LeaderboardId,
    /// User the totals belong to
    pub user_id: UserId,
    /// Team of the user at computation time
    pub team_id: Option<TeamId>,
    /// floor(total_calories / 10)
    pub total_points: i64,
    /// Number of activities counted
    pub total_activities: i64,
    /// Sum of calories over the counted activities
    pub total_calories: i64,
    /// Time of the last write to this row
    pub last_updated: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn totals(&self) -> LeaderboardTotals {
        LeaderboardTotals {
            total_activities: self.total_activities,
            total_calories: self.total_calories,
            total_points: self.total_points,
        }
    }

    /// Overwrite the totals, keeping points consistent with calories.
    pub fn set_totals(&mut self, totals: LeaderboardTotals) {
        self.total_activities = totals.total_activities;
        self.total_calories = totals.total_calories;
        self.total_points = points_for_calories(totals.total_calories);
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("user_id", self.user_id.as_str(), MAX_REFERENCE_LEN)?;
        require_non_negative("total_activities", self.total_activities)?;
        require_non_negative("total_calories", self.total_calories)
    }

    pub fn replace_with(&mut self, input: NewLeaderboardEntry) {
        self.user_id = input.user_id;
        self.team_id = blank_as_none(input.team_id);
        self.set_totals(LeaderboardTotals::new(
            input.total_activities,
            input.total_calories,
        ));
    }

    pub fn apply(&mut self, patch: LeaderboardPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(team_id) = patch.team_id {
            self.team_id = blank_as_none(team_id);
        }
        let totals = LeaderboardTotals::new(
            patch.total_activities.unwrap_or(self.total_activities),
            patch.total_calories.unwrap_or(self.total_calories),
        );
        self.set_totals(totals);
    }
}

/// Payload for writing a leaderboard row directly.
///
/// Points are never accepted from the client; they are derived from
/// `total_calories`.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLeaderboardEntry {
    pub user_id: UserId,
    #[serde(default)]
    pub team_id: Option<TeamId>,
    #[serde(default)]
    pub total_activities: i64,
    #[serde(default)]
    pub total_calories: i64,
}

impl NewLeaderboardEntry {
    pub fn into_entry(self, id: LeaderboardId, last_updated: DateTime<Utc>) -> LeaderboardEntry {
        let totals = LeaderboardTotals::new(self.total_activities, self.total_calories);
        LeaderboardEntry {
            id,
            user_id: self.user_id,
            team_id: blank_as_none(self.team_id),
            total_points: totals.total_points,
            total_activities: totals.total_activities,
            total_calories: totals.total_calories,
            last_updated,
        }
    }
}

/// Partial update of a leaderboard row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardPatch {
    pub user_id: Option<UserId>,
    #[serde(default, deserialize_with = "double_option")]
    pub team_id: Option<Option<TeamId>>,
    pub total_activities: Option<i64>,
    pub total_calories: Option<i64>,
}
