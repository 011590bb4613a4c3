//! Logged exercise sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{ActivityId, UserId};
use super::validation::{
    check_length, double_option, optional_utc_timestamp, require_positive, require_text,
    utc_timestamp, ValidationError, MAX_REFERENCE_LEN,
};

/// Maximum length of an activity type label.
pub const MAX_TYPE_LEN: usize = 50;
/// Maximum length of free-text notes.
pub const MAX_NOTES_LEN: usize = 2000;

/// A single exercise session belonging to a user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    /// Unique identifier
    pub id: ActivityId,
    /// Owning user, not checked against the users collection
    pub user_id: UserId,
    /// Kind of exercise ("Running", "Yoga", ...)
    pub activity_type: String,
    /// Duration in minutes
    pub duration: u32,
    /// Distance in kilometres, when the exercise covers one
    pub distance: Option<f64>,
    /// Calories burned
    pub calories: u32,
    /// When the session took place
    pub date: DateTime<Utc>,
    /// Free text, may be empty
    pub notes: String,
}

impl Activity {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("user_id", self.user_id.as_str(), MAX_REFERENCE_LEN)?;
        require_text("activity_type", &self.activity_type, MAX_TYPE_LEN)?;
        require_positive("duration", self.duration)?;
        if let Some(distance) = self.distance {
            if !distance.is_finite() || distance <= 0.0 {
                return Err(ValidationError::new(
                    "distance",
                    "Ensure this value is greater than 0.",
                ));
            }
        }
        require_positive("calories", self.calories)?;
        check_length("notes", &self.notes, MAX_NOTES_LEN)
    }

    pub fn replace_with(&mut self, input: NewActivity) {
        self.user_id = input.user_id;
        self.activity_type = input.activity_type;
        self.duration = input.duration;
        self.distance = input.distance;
        self.calories = input.calories;
        self.date = input.date;
        self.notes = input.notes;
    }

    pub fn apply(&mut self, patch: ActivityPatch) {
        if let Some(user_id) = patch.user_id {
            self.user_id = user_id;
        }
        if let Some(activity_type) = patch.activity_type {
            self.activity_type = activity_type;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(distance) = patch.distance {
            self.distance = distance;
        }
        if let Some(calories) = patch.calories {
            self.calories = calories;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
    }
}

/// Payload for creating or fully replacing an activity.
#[derive(Debug, Clone, Deserialize)]
pub struct NewActivity {
    pub user_id: UserId,
    pub activity_type: String,
    pub duration: u32,
    #[serde(default)]
    pub distance: Option<f64>,
    pub calories: u32,
    #[serde(deserialize_with = "utc_timestamp")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub notes: String,
}

impl NewActivity {
    pub fn into_activity(self, id: ActivityId) -> Activity {
        Activity {
            id,
            user_id: self.user_id,
            activity_type: self.activity_type,
            duration: self.duration,
            distance: self.distance,
            calories: self.calories,
            date: self.date,
            notes: self.notes,
        }
    }
}

/// Partial update of an activity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityPatch {
    pub user_id: Option<UserId>,
    pub activity_type: Option<String>,
    pub duration: Option<u32>,
    #[serde(default, deserialize_with = "double_option")]
    pub distance: Option<Option<f64>>,
    pub calories: Option<u32>,
    #[serde(default, deserialize_with = "optional_utc_timestamp")]
    pub date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}
