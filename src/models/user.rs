//! User accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{TeamId, UserId};
use super::validation::{
    blank_as_none, check_length, double_option, require_email, require_text, ValidationError,
    MAX_REFERENCE_LEN,
};

/// Maximum length of a user's display name.
pub const MAX_NAME_LEN: usize = 100;
/// Maximum length of a stored password.
pub const MAX_PASSWORD_LEN: usize = 128;

/// A registered user.
///
/// `password` is write-only: it is accepted on create and update but never
/// serialized back out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Email address, unique across all users
    pub email: String,
    /// Password as supplied by the client
    #[serde(skip_serializing)]
    pub password: String,
    /// Team membership, not checked against the teams collection
    pub team_id: Option<TeamId>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Check every field of the record.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name, MAX_NAME_LEN)?;
        require_email("email", &self.email)?;
        require_text("password", &self.password, MAX_PASSWORD_LEN)?;
        if let Some(team_id) = &self.team_id {
            check_length("team_id", team_id.as_str(), MAX_REFERENCE_LEN)?;
        }
        Ok(())
    }

    /// Replace every writable field, keeping id and creation time.
    pub fn replace_with(&mut self, input: NewUser) {
        self.name = input.name;
        self.email = input.email;
        self.password = input.password;
        self.team_id = blank_as_none(input.team_id);
    }

    /// Apply the fields present in a partial update.
    pub fn apply(&mut self, patch: UserPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(team_id) = patch.team_id {
            self.team_id = blank_as_none(team_id);
        }
    }
}

/// Payload for creating or fully replacing a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub team_id: Option<TeamId>,
}

impl NewUser {
    /// Build the stored record. Call [`User::validate`] on the result.
    pub fn into_user(self, id: UserId, created_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password: self.password,
            team_id: blank_as_none(self.team_id),
            created_at,
        }
    }
}

/// Partial update of a user; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    /// `null` clears the team, absent leaves it alone
    #[serde(default, deserialize_with = "double_option")]
    pub team_id: Option<Option<TeamId>>,
}
