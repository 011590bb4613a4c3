//! Per-collection filters decoded from query strings.
//!
//! Unknown query parameters are ignored by serde's default behaviour.

use serde::Deserialize;

use super::EqualityPredicates;
use crate::models::{TeamId, UserId};

/// `GET /activities?user_id=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ActivityFilter {
    pub user_id: Option<String>,
}

impl ActivityFilter {
    pub fn for_user(user_id: &UserId) -> Self {
        Self {
            user_id: Some(user_id.to_string()),
        }
    }

    pub fn predicates(&self) -> EqualityPredicates {
        EqualityPredicates::new().with("user_id", self.user_id.as_deref())
    }
}

/// `GET /users?team_id=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserFilter {
    pub team_id: Option<String>,
}

impl UserFilter {
    pub fn for_team(team_id: &TeamId) -> Self {
        Self {
            team_id: Some(team_id.to_string()),
        }
    }

    pub fn predicates(&self) -> EqualityPredicates {
        EqualityPredicates::new().with("team_id", self.team_id.as_deref())
    }
}

/// `GET /workouts?category=&difficulty=`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkoutFilter {
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

impl WorkoutFilter {
    pub fn predicates(&self) -> EqualityPredicates {
        EqualityPredicates::new()
            .with("category", self.category.as_deref())
            .with("difficulty", self.difficulty.as_deref())
    }
}

/// `GET /leaderboard?team_id=`. Results are always sorted by points, and an
/// empty `team_id` lists every team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LeaderboardFilter {
    pub team_id: Option<String>,
}

impl LeaderboardFilter {
    pub fn for_team(team_id: &TeamId) -> Self {
        Self {
            team_id: Some(team_id.to_string()),
        }
    }

    pub fn predicates(&self) -> EqualityPredicates {
        EqualityPredicates::new().with_non_empty("team_id", self.team_id.as_deref())
    }
}
