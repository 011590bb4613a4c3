//! Database schema definitions for OctoFit.
//!
//! References between collections (`users.team_id`, `activities.user_id`,
//! `leaderboard.user_id`, `leaderboard.team_id`) are plain text columns with no
//! `REFERENCES` clause: nothing is checked and nothing cascades.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Teams table
CREATE TABLE IF NOT EXISTS teams (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    description TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL
);

-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    team_id TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_team_id ON users(team_id);

-- Activities table
CREATE TABLE IF NOT EXISTS activities (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    activity_type TEXT NOT NULL,
    duration INTEGER NOT NULL,
    distance REAL,
    calories INTEGER NOT NULL,
    date TEXT NOT NULL,
    notes TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_activities_user_id ON activities(user_id);

-- Leaderboard table (one derived row per user)
CREATE TABLE IF NOT EXISTS leaderboard (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL UNIQUE,
    team_id TEXT,
    total_points INTEGER NOT NULL DEFAULT 0,
    total_activities INTEGER NOT NULL DEFAULT 0,
    total_calories INTEGER NOT NULL DEFAULT 0,
    last_updated TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_leaderboard_points ON leaderboard(total_points DESC, user_id);
CREATE INDEX IF NOT EXISTS idx_leaderboard_team_id ON leaderboard(team_id);

-- Workouts table
CREATE TABLE IF NOT EXISTS workouts (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category TEXT NOT NULL,
    difficulty TEXT NOT NULL,
    duration INTEGER NOT NULL,
    calories_estimate INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_workouts_category_difficulty ON workouts(category, difficulty);
"#;

/// SQL for schema version tracking (migrations)
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;

/// Every data table, in an order safe for bulk deletion.
pub const TABLES: [&str; 5] = ["leaderboard", "activities", "workouts", "users", "teams"];
