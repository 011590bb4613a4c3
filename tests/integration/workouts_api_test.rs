//! Integration tests for workout suggestions and demo population.

use axum::http::{Method, StatusCode};
use chrono::Utc;
use serde_json::{json, Value};

use crate::support::TestApp;

fn workout(title: &str, category: &str, difficulty: &str) -> Value {
    json!({
        "title": title,
        "description": "",
        "category": category,
        "difficulty": difficulty,
        "duration": 30,
        "calories_estimate": 300,
    })
}

fn titles(workouts: &Value) -> Vec<String> {
    workouts
        .as_array()
        .unwrap()
        .iter()
        .map(|w| w["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_workout_filters_combine() {
    let app = TestApp::new();
    app.create("/workouts", workout("Easy Jog", "Cardio", "Beginner")).await;
    app.create("/workouts", workout("Sprint Intervals", "Cardio", "Advanced")).await;
    app.create("/workouts", workout("Deadlift Day", "Strength", "Advanced")).await;

    let (status, cardio) = app.get("/workouts?category=Cardio").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&cardio), vec!["Easy Jog", "Sprint Intervals"]);

    let (_, advanced_cardio) = app.get("/workouts?category=Cardio&difficulty=Advanced").await;
    assert_eq!(titles(&advanced_cardio), vec!["Sprint Intervals"]);

    let (_, advanced) = app.get("/workouts?difficulty=Advanced").await;
    assert_eq!(titles(&advanced), vec!["Sprint Intervals", "Deadlift Day"]);

    let (_, none) = app.get("/workouts?category=cardio").await;
    assert!(none.as_array().unwrap().is_empty());

    let (status, empty_value) = app.get("/workouts?category=&difficulty=Beginner").await;
    assert_eq!(status, StatusCode::OK);
    assert!(empty_value.as_array().unwrap().is_empty());

    let (status, last_wins) = app
        .get("/workouts?category=Strength&category=Cardio&difficulty=Beginner")
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&last_wins), vec!["Easy Jog"]);
}

#[tokio::test]
async fn test_workout_update_and_validation() {
    let app = TestApp::new();
    let id = app.create("/workouts", workout("Core Blast", "Core", "Advanced")).await;

    let (status, updated) = app
        .send(Method::PATCH, &format!("/workouts/{id}"), Some(json!({"duration": 35})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["duration"], 35);
    assert_eq!(updated["title"], "Core Blast");

    let (status, body) = app
        .send(Method::PATCH, &format!("/workouts/{id}"), Some(json!({"category": " "})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "category");

    let (_, unchanged) = app.get(&format!("/workouts/{id}")).await;
    assert_eq!(unchanged["category"], "Core");

    let (status, _) = app.send(Method::DELETE, &format!("/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::DELETE, &format!("/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_populated_database_is_served() {
    let app = TestApp::new();
    let summary = octofit::seed::populate(&app.db, Utc::now()).unwrap();

    let (_, users) = app.get("/users").await;
    assert_eq!(users.as_array().unwrap().len(), summary.users);

    let (_, teams) = app.get("/teams").await;
    let team_names: Vec<&str> = teams
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(team_names, vec!["Team Marvel", "Team DC"]);

    let (_, board) = app.get("/leaderboard").await;
    let rows = board.as_array().unwrap();
    assert_eq!(rows.len(), 10);
    assert!(rows
        .windows(2)
        .all(|pair| pair[0]["total_points"].as_i64() >= pair[1]["total_points"].as_i64()));

    let (_, cardio) = app.get("/workouts?category=Cardio&difficulty=Advanced").await;
    assert_eq!(titles(&cardio), vec!["Speed Force Cardio"]);
}
