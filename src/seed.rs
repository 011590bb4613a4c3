//! Demo data population.
//!
//! Wipes every collection and fills it with two superhero teams, their
//! members, a week of activities, the derived leaderboard and a set of
//! suggested workouts. Every value is derived from loop indexes, so two runs
//! with the same `now` write identical totals.

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;
use serde::Serialize;
use tracing::info;

use crate::leaderboard::aggregation;
use crate::models::{
    Activity, ActivityId, NewActivity, NewTeam, NewUser, NewWorkout, TeamId, User, UserId,
    WorkoutId,
};
use crate::storage::{
    clear_tables, ActivityStore, Database, DatabaseError, TeamStore, UserStore, WorkoutStore,
};

/// Days of activity history generated per user.
pub const HISTORY_DAYS: u32 = 7;

struct TeamSeed {
    name: &'static str,
    description: &'static str,
    heroes: [(&'static str, &'static str, &'static str); 5],
}

const TEAMS: [TeamSeed; 2] = [
    TeamSeed {
        name: "Team Marvel",
        description: "Earth's Mightiest Heroes united in fitness",
        heroes: [
            ("Tony Stark", "ironman@marvel.com", "stark123"),
            ("Steve Rogers", "cap@marvel.com", "shield123"),
            ("Natasha Romanoff", "blackwidow@marvel.com", "widow123"),
            ("Thor Odinson", "thor@marvel.com", "hammer123"),
            ("Bruce Banner", "hulk@marvel.com", "smash123"),
        ],
    },
    TeamSeed {
        name: "Team DC",
        description: "Justice League fitness warriors",
        heroes: [
            ("Bruce Wayne", "batman@dc.com", "gotham123"),
            ("Clark Kent", "superman@dc.com", "krypton123"),
            ("Diana Prince", "wonderwoman@dc.com", "themyscira123"),
            ("Barry Allen", "flash@dc.com", "speed123"),
            ("Arthur Curry", "aquaman@dc.com", "atlantis123"),
        ],
    },
];

/// Activity types; the first three record a distance at the given km/h.
const ACTIVITY_TYPES: [(&str, Option<f64>); 6] = [
    ("Running", Some(10.0)),
    ("Swimming", Some(2.5)),
    ("Cycling", Some(24.0)),
    ("Weight Training", None),
    ("Boxing", None),
    ("Yoga", None),
];

/// (title, description, category, difficulty, minutes, calories)
const WORKOUTS: [(&str, &str, &str, &str, u32, u32); 8] = [
    (
        "Superhero Strength Training",
        "Build strength like Thor with this intense weight training routine",
        "Strength",
        "Advanced",
        60,
        500,
    ),
    (
        "Speed Force Cardio",
        "High-intensity interval training inspired by The Flash",
        "Cardio",
        "Advanced",
        45,
        600,
    ),
    (
        "Warrior Yoga Flow",
        "Find your inner balance like Wonder Woman with this yoga sequence",
        "Flexibility",
        "Intermediate",
        30,
        200,
    ),
    (
        "Atlantean Swimming Challenge",
        "Swim like Aquaman with this endurance swimming workout",
        "Swimming",
        "Intermediate",
        40,
        400,
    ),
    (
        "Avenger Endurance Run",
        "Build stamina like Captain America with this distance running plan",
        "Cardio",
        "Intermediate",
        50,
        550,
    ),
    (
        "Spider Agility Training",
        "Improve agility and reflexes with plyometric drills",
        "Agility",
        "Beginner",
        25,
        250,
    ),
    (
        "Kryptonian Core Workout",
        "Develop core strength worthy of Superman",
        "Core",
        "Advanced",
        35,
        350,
    ),
    (
        "Gotham Night Patrol",
        "Full-body circuit training in the style of Batman",
        "Full Body",
        "Advanced",
        70,
        700,
    ),
];

/// Number of records written per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    pub teams: usize,
    pub users: usize,
    pub activities: usize,
    pub leaderboard: usize,
    pub workouts: usize,
}

/// Replace all data with the demo data set, atomically.
pub fn populate(db: &Database, now: DateTime<Utc>) -> Result<SeedSummary, DatabaseError> {
    let summary = db.with_transaction(|tx| populate_on(tx, now))?;

    info!(
        teams = summary.teams,
        users = summary.users,
        activities = summary.activities,
        leaderboard = summary.leaderboard,
        workouts = summary.workouts,
        "Database populated"
    );
    Ok(summary)
}

fn populate_on(conn: &Connection, now: DateTime<Utc>) -> Result<SeedSummary, DatabaseError> {
    clear_tables(conn)?;
    let mut summary = SeedSummary::default();

    let teams = TeamStore::new(conn);
    let users = UserStore::new(conn);
    let activities = ActivityStore::new(conn);

    let mut hero_index = 0;
    for seed in &TEAMS {
        let team = NewTeam {
            name: seed.name.to_string(),
            description: seed.description.to_string(),
        }
        .into_team(TeamId::generate(), now);
        teams.insert(&team)?;
        summary.teams += 1;

        for (name, email, password) in seed.heroes {
            let user = NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                team_id: Some(team.id.clone()),
            }
            .into_user(UserId::generate(), now);
            users.insert(&user)?;
            summary.users += 1;

            for activity in hero_history(&user, hero_index, now) {
                activities.insert(&activity)?;
                summary.activities += 1;
            }
            hero_index += 1;
        }
    }

    summary.leaderboard = aggregation::refresh_all(conn, now)?.len();

    let workouts = WorkoutStore::new(conn);
    for (title, description, category, difficulty, duration, calories_estimate) in WORKOUTS {
        let workout = NewWorkout {
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            difficulty: difficulty.to_string(),
            duration,
            calories_estimate,
        }
        .into_workout(WorkoutId::generate());
        workouts.insert(&workout)?;
        summary.workouts += 1;
    }

    Ok(summary)
}

/// One to three activities per day over the history window ending at `now`.
fn hero_history(user: &User, hero: u32, now: DateTime<Utc>) -> Vec<Activity> {
    let mut history = Vec::new();

    for day in 0..HISTORY_DAYS {
        let per_day = 1 + (hero + day) % 3;
        for slot in 0..per_day {
            let n = day * 31 + hero * 7 + slot * 13;
            let (activity_type, speed_kmh) = ACTIVITY_TYPES[((hero + day + slot) % 6) as usize];

            let duration = 30 + (n * 17) % 91;
            let calories = duration * (5 + n % 6);
            let distance =
                speed_kmh.map(|kmh| (f64::from(duration) / 60.0 * kmh * 10.0).round() / 10.0);
            let date = now - Duration::days(i64::from(day)) - Duration::hours(i64::from(slot) * 3);

            history.push(
                NewActivity {
                    user_id: user.id.clone(),
                    activity_type: activity_type.to_string(),
                    duration,
                    distance,
                    calories,
                    date,
                    notes: format!("{} crushing it with {}!", user.name, activity_type),
                }
                .into_activity(ActivityId::generate()),
            );
        }
    }

    history
}
