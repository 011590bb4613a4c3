//! Unit tests for leaderboard aggregation

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use octofit::leaderboard::{compute_totals, LeaderboardService};
use octofit::models::{
    Activity, ActivityId, LeaderboardTotals, NewActivity, NewUser, TeamId, UserId,
};
use octofit::query::LeaderboardFilter;
use octofit::storage::{ActivityStore, Database, UserStore};

fn activity(user_id: &UserId, calories: u32) -> Activity {
    NewActivity {
        user_id: user_id.clone(),
        activity_type: "Running".to_string(),
        duration: 30,
        distance: Some(5.0),
        calories,
        date: Utc::now(),
        notes: String::new(),
    }
    .into_activity(ActivityId::generate())
}

fn setup() -> (Arc<Database>, LeaderboardService) {
    let db = Arc::new(Database::open_in_memory().expect("Failed to create database"));
    let service = LeaderboardService::new(db.clone());
    (db, service)
}

fn add_user(db: &Database, name: &str, email: &str, team: &str) -> UserId {
    let user = NewUser {
        name: name.to_string(),
        email: email.to_string(),
        password: "secret".to_string(),
        team_id: Some(TeamId::from(team)),
    }
    .into_user(UserId::generate(), Utc::now());

    db.with_connection(|conn| UserStore::new(conn).insert(&user))
        .expect("insert user");
    user.id
}

fn log(db: &Database, user_id: &UserId, calories: u32) {
    let activity = activity(user_id, calories);
    db.with_connection(|conn| ActivityStore::new(conn).insert(&activity))
        .expect("insert activity");
}

/// Tony Stark's three sessions
#[test]
fn test_tony_stark_totals() {
    let (db, service) = setup();
    let tony = add_user(&db, "Tony Stark", "ironman@marvel.com", "marvel");
    for calories in [300, 250, 450] {
        log(&db, &tony, calories);
    }

    let totals = service.compute(&tony).unwrap();
    assert_eq!(
        totals,
        LeaderboardTotals {
            total_activities: 3,
            total_calories: 1000,
            total_points: 100,
        }
    );

    let row = service.refresh(&tony, Utc::now()).unwrap();
    assert_eq!(row.totals(), totals);
    assert_eq!(row.team_id, Some(TeamId::new("marvel")));
}

#[test]
fn test_compute_for_unknown_user_is_zero() {
    let (_db, service) = setup();
    let totals = service.compute(&UserId::new("nobody")).unwrap();
    assert_eq!(totals, LeaderboardTotals::default());
}

#[test]
fn test_compute_totals_sums_in_64_bits() {
    let user = UserId::new("marathoner");
    let activities: Vec<Activity> = (0..3).map(|_| activity(&user, u32::MAX)).collect();

    let totals = compute_totals(&activities);
    assert_eq!(totals.total_calories, 3 * i64::from(u32::MAX));
    assert_eq!(totals.total_points, 3 * i64::from(u32::MAX) / 10);
}

#[test]
fn test_refresh_twice_is_identical() {
    let (db, service) = setup();
    let user = add_user(&db, "Natasha Romanoff", "blackwidow@marvel.com", "marvel");
    log(&db, &user, 333);
    log(&db, &user, 444);

    let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
    let first = service.refresh(&user, now).unwrap();
    let second = service.refresh(&user, now).unwrap();

    assert_eq!(first, second);
    assert_eq!(service.list(&LeaderboardFilter::default()).unwrap(), vec![second]);
}

#[test]
fn test_refresh_follows_team_change() {
    let (db, service) = setup();
    let user = add_user(&db, "Bruce Banner", "hulk@marvel.com", "marvel");
    service.refresh(&user, Utc::now()).unwrap();

    db.with_connection(|conn| {
        let store = UserStore::new(conn);
        let mut record = store.get(&user)?.expect("user exists");
        record.team_id = Some(TeamId::new("dc"));
        store.update(&record)
    })
    .unwrap();

    // Snapshot is stale until the next refresh.
    let stale = service
        .list(&LeaderboardFilter::for_team(&TeamId::new("marvel")))
        .unwrap();
    assert_eq!(stale.len(), 1);

    service.refresh(&user, Utc::now()).unwrap();
    let moved = service
        .list(&LeaderboardFilter::for_team(&TeamId::new("dc")))
        .unwrap();
    assert_eq!(moved.len(), 1);
    assert!(service
        .list(&LeaderboardFilter::for_team(&TeamId::new("marvel")))
        .unwrap()
        .is_empty());
}

#[test]
fn test_refresh_all_ranks_by_points() {
    let (db, service) = setup();
    let heroes = [
        ("Steve Rogers", "cap@marvel.com", "marvel", 900),
        ("Bruce Wayne", "batman@dc.com", "dc", 1500),
        ("Thor Odinson", "thor@marvel.com", "marvel", 1200),
        ("Clark Kent", "superman@dc.com", "dc", 100),
    ];
    for (name, email, team, calories) in heroes {
        let id = add_user(&db, name, email, team);
        log(&db, &id, calories);
    }

    let written = service.refresh_all(Utc::now()).unwrap();
    assert_eq!(written.len(), 4);

    for filter in [
        LeaderboardFilter::default(),
        LeaderboardFilter::for_team(&TeamId::new("marvel")),
        LeaderboardFilter::for_team(&TeamId::new("dc")),
    ] {
        let rows = service.list(&filter).unwrap();
        assert!(!rows.is_empty());
        assert!(rows
            .windows(2)
            .all(|pair| pair[0].total_points >= pair[1].total_points));
    }

    let points: Vec<i64> = service
        .list(&LeaderboardFilter::default())
        .unwrap()
        .iter()
        .map(|row| row.total_points)
        .collect();
    assert_eq!(points, vec![150, 120, 90, 10]);
}
