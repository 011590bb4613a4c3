//! Teams users can belong to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TeamId;
use super::validation::{check_length, require_text, ValidationError};

/// Maximum length of a team name.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of a team description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A team. Membership lives on [`User::team_id`](super::User::team_id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Team {
    /// Unique identifier
    pub id: TeamId,
    /// Team name, unique across all teams
    pub name: String,
    /// Free text, may be empty
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Team {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, MAX_NAME_LEN)?;
        check_length("description", &self.description, MAX_DESCRIPTION_LEN)
    }

    pub fn replace_with(&mut self, input: NewTeam) {
        self.name = input.name;
        self.description = input.description;
    }

    pub fn apply(&mut self, patch: TeamPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

/// Payload for creating or fully replacing a team.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewTeam {
    pub fn into_team(self, id: TeamId, created_at: DateTime<Utc>) -> Team {
        Team {
            id,
            name: self.name,
            description: self.description,
            created_at,
        }
    }
}

/// Partial update of a team.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}
