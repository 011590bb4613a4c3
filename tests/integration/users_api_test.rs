//! Integration tests for the users and teams endpoints.

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::support::{ids, TestApp};

#[tokio::test]
async fn test_api_root_lists_collections() {
    let app = TestApp::new();
    let (status, body) = app.get("/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], "http://testserver/users");
    assert_eq!(body["leaderboard"], "http://testserver/leaderboard");
    assert_eq!(body.as_object().unwrap().len(), 5);
}

#[tokio::test]
async fn test_user_crud_never_exposes_password() {
    let app = TestApp::new();
    let team = app
        .create("/teams", json!({"name": "Team Marvel", "description": "Avengers"}))
        .await;

    let (status, created) = app
        .post(
            "/users",
            json!({
                "name": "Tony Stark",
                "email": "ironman@marvel.com",
                "password": "stark123",
                "team_id": team,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());
    assert_eq!(created["team_id"], team.as_str());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = app.get(&format!("/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["email"], "ironman@marvel.com");
    assert!(fetched.get("password").is_none());

    let (status, patched) = app
        .send(
            Method::PATCH,
            &format!("/users/{id}"),
            Some(json!({"name": "Iron Man", "team_id": null})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["name"], "Iron Man");
    assert!(patched["team_id"].is_null());
    assert_eq!(patched["email"], "ironman@marvel.com");

    let (status, replaced) = app
        .send(
            Method::PUT,
            &format!("/users/{id}"),
            Some(json!({
                "name": "Anthony Stark",
                "email": "tony@starkindustries.com",
                "password": "jarvis",
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["email"], "tony@starkindustries.com");

    let (status, _) = app.send(Method::DELETE, &format!("/users/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/users/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let app = TestApp::new();
    let user = json!({"name": "Bruce Wayne", "email": "batman@dc.com", "password": "gotham123"});
    app.create("/users", user.clone()).await;

    let (status, body) = app.post("/users", user).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "email");

    let (_, all) = app.get("/users").await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_payloads_are_rejected_before_writing() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/users", json!({"name": "", "email": "x@y.com", "password": "pw"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "name");

    let (status, body) = app
        .post("/users", json!({"name": "No Email", "email": "nope", "password": "pw"}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "email");

    let (status, body) = app.post("/users", json!({"name": "Missing fields"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "body");

    let (_, all) = app.get("/users").await;
    assert!(all.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_users_filter_by_team_and_members_endpoint() {
    let app = TestApp::new();
    let marvel = app.create("/teams", json!({"name": "Team Marvel"})).await;
    let dc = app.create("/teams", json!({"name": "Team DC"})).await;

    let tony = app
        .create(
            "/users",
            json!({"name": "Tony Stark", "email": "ironman@marvel.com", "password": "a", "team_id": marvel}),
        )
        .await;
    app.create(
        "/users",
        json!({"name": "Bruce Wayne", "email": "batman@dc.com", "password": "b", "team_id": dc}),
    )
    .await;

    let (status, filtered) = app.get(&format!("/users?team_id={marvel}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&filtered), vec![tony.clone()]);

    let (status, members) = app.get(&format!("/teams/{marvel}/members")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&members), vec![tony]);

    let (_, no_team) = app.get("/users?team_id=").await;
    assert!(no_team.as_array().unwrap().is_empty());

    let (_, unknown_param) = app.get("/users?sort=name").await;
    assert_eq!(unknown_param.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_join_endpoints_on_missing_parent() {
    let app = TestApp::new();

    let (status, _) = app.get("/teams/no-such-team/members").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/users/no-such-user/activities").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_team_delete_leaves_members_dangling() {
    let app = TestApp::new();
    let team = app.create("/teams", json!({"name": "Team DC"})).await;
    let user = app
        .create(
            "/users",
            json!({"name": "Diana Prince", "email": "wonderwoman@dc.com", "password": "x", "team_id": team}),
        )
        .await;

    let (status, _) = app.send(Method::DELETE, &format!("/teams/{team}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = app.get(&format!("/users/{user}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["team_id"], team.as_str());

    let (_, filtered) = app.get(&format!("/users?team_id={team}")).await;
    assert_eq!(ids(&filtered), vec![user]);
}

#[tokio::test]
async fn test_duplicate_team_name_is_rejected() {
    let app = TestApp::new();
    app.create("/teams", json!({"name": "Team Marvel"})).await;

    let (status, body) = app.post("/teams", json!({"name": "Team Marvel"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "name");

    let (status, body) = app.send(Method::PATCH, "/teams/missing", Some(json!({"name": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}
