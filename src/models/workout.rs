//! Suggested workouts.

use serde::{Deserialize, Serialize};

use super::ids::WorkoutId;
use super::validation::{check_length, require_text, ValidationError};

pub const MAX_TITLE_LEN: usize = 200;
pub const MAX_CATEGORY_LEN: usize = 50;
pub const MAX_DIFFICULTY_LEN: usize = 20;
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A workout suggestion users can browse by category and difficulty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workout {
    /// Unique identifier
    pub id: WorkoutId,
    pub title: String,
    pub description: String,
    /// e.g. "Cardio", "Strength"
    pub category: String,
    /// e.g. "Beginner", "Advanced"
    pub difficulty: String,
    /// Duration in minutes
    pub duration: u32,
    /// Estimated calories burned
    pub calories_estimate: u32,
}

impl Workout {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title, MAX_TITLE_LEN)?;
        check_length("description", &self.description, MAX_DESCRIPTION_LEN)?;
        require_text("category", &self.category, MAX_CATEGORY_LEN)?;
        require_text("difficulty", &self.difficulty, MAX_DIFFICULTY_LEN)
    }

    pub fn replace_with(&mut self, input: NewWorkout) {
        self.title = input.title;
        self.description = input.description;
        self.category = input.category;
        self.difficulty = input.difficulty;
        self.duration = input.duration;
        self.calories_estimate = input.calories_estimate;
    }

    pub fn apply(&mut self, patch: WorkoutPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(difficulty) = patch.difficulty {
            self.difficulty = difficulty;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(calories_estimate) = patch.calories_estimate {
            self.calories_estimate = calories_estimate;
        }
    }
}

/// Payload for creating or fully replacing a workout.
#[derive(Debug, Clone, Deserialize)]
pub struct NewWorkout {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: String,
    pub duration: u32,
    pub calories_estimate: u32,
}

impl NewWorkout {
    pub fn into_workout(self, id: WorkoutId) -> Workout {
        Workout {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            difficulty: self.difficulty,
            duration: self.duration,
            calories_estimate: self.calories_estimate,
        }
    }
}

/// Partial update of a workout.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkoutPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub duration: Option<u32>,
    pub calories_estimate: Option<u32>,
}
