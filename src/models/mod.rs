//! Record types for the five stored collections.

pub mod activity;
pub mod ids;
pub mod leaderboard;
pub mod team;
pub mod user;
pub mod validation;
pub mod workout;

pub use activity::{Activity, ActivityPatch, NewActivity};
pub use ids::{ActivityId, LeaderboardId, TeamId, UserId, WorkoutId};
pub use leaderboard::{
    points_for_calories, LeaderboardEntry, LeaderboardPatch, LeaderboardTotals,
    NewLeaderboardEntry, CALORIES_PER_POINT,
};
pub use team::{NewTeam, Team, TeamPatch};
pub use user::{NewUser, User, UserPatch};
pub use validation::ValidationError;
pub use workout::{NewWorkout, Workout, WorkoutPatch};
