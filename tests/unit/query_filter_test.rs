//! Unit tests for query filters

use octofit::models::{NewWorkout, WorkoutId};
use octofit::query::{ActivityFilter, EqualityPredicates, WorkoutFilter};
use octofit::storage::{Database, DatabaseError, WorkoutStore};

fn cardio(title: &str, difficulty: &str) -> NewWorkout {
    NewWorkout {
        title: title.to_string(),
        description: String::new(),
        category: "Cardio".to_string(),
        difficulty: difficulty.to_string(),
        duration: 30,
        calories_estimate: 300,
    }
}

fn filter(category: Option<&str>, difficulty: Option<&str>) -> WorkoutFilter {
    WorkoutFilter {
        category: category.map(str::to_string),
        difficulty: difficulty.map(str::to_string),
    }
}

#[test]
fn test_two_cardio_workouts() {
    let db = Database::open_in_memory().expect("Failed to create database");

    db.with_connection(|conn| {
        let store = WorkoutStore::new(conn);
        store.insert(&cardio("Easy Jog", "Beginner").into_workout(WorkoutId::generate()))?;
        store.insert(&cardio("Sprint Intervals", "Advanced").into_workout(WorkoutId::generate()))?;

        assert_eq!(store.list(&filter(Some("Cardio"), None))?.len(), 2);

        let advanced = store.list(&filter(Some("Cardio"), Some("Advanced")))?;
        assert_eq!(advanced.len(), 1);
        assert_eq!(advanced[0].title, "Sprint Intervals");
        assert_eq!(advanced[0].difficulty, "Advanced");

        assert!(store.list(&filter(Some("cardio"), None))?.is_empty());
        assert_eq!(store.list(&filter(None, None))?.len(), 2);
        Ok::<_, DatabaseError>(())
    })
    .unwrap();
}

#[test]
fn test_where_clause_rendering() {
    let predicates = EqualityPredicates::new()
        .with("category", Some("Cardio"))
        .with("difficulty", Some(""))
        .with_non_empty("team_id", Some(""))
        .with("user_id", None);

    assert_eq!(predicates.len(), 2);
    assert_eq!(
        predicates.where_clause(),
        " WHERE category = ?1 AND difficulty = ?2"
    );
    assert!(EqualityPredicates::new().where_clause().is_empty());
}

#[test]
fn test_filters_decode_from_query_strings() {
    let parsed: ActivityFilter = serde_json::from_value(serde_json::json!({
        "user_id": "u-42",
        "page": 3,
    }))
    .unwrap();
    assert_eq!(parsed.user_id.as_deref(), Some("u-42"));
    assert_eq!(parsed.predicates().value_for("user_id"), Some("u-42"));
}
