//! Unit tests for the relation resolver

use std::sync::Arc;

use chrono::Utc;
use octofit::models::{ActivityId, NewActivity, NewTeam, NewUser, TeamId, UserId};
use octofit::storage::{ActivityStore, Database, DatabaseError, TeamStore, UserStore};
use octofit::RelationResolver;

#[test]
fn test_members_and_activities_follow_references() {
    let db = Arc::new(Database::open_in_memory().expect("Failed to create database"));
    let resolver = RelationResolver::new(db.clone());

    let team = NewTeam {
        name: "Team DC".to_string(),
        description: "Justice League fitness warriors".to_string(),
    }
    .into_team(TeamId::generate(), Utc::now());

    let users: Vec<_> = [("Bruce Wayne", "batman@dc.com"), ("Clark Kent", "superman@dc.com")]
        .into_iter()
        .map(|(name, email)| {
            NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password: "secret".to_string(),
                team_id: Some(team.id.clone()),
            }
            .into_user(UserId::generate(), Utc::now())
        })
        .collect();

    db.with_connection(|conn| {
        TeamStore::new(conn).insert(&team)?;
        for user in &users {
            UserStore::new(conn).insert(user)?;
        }
        ActivityStore::new(conn).insert(
            &NewActivity {
                user_id: users[0].id.clone(),
                activity_type: "Boxing".to_string(),
                duration: 45,
                distance: None,
                calories: 500,
                date: Utc::now(),
                notes: "Bruce Wayne crushing it with Boxing!".to_string(),
            }
            .into_activity(ActivityId::generate()),
        )?;
        Ok::<_, DatabaseError>(())
    })
    .unwrap();

    let members = resolver.members_of_team(&team.id).unwrap();
    let names: Vec<&str> = members.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec!["Bruce Wayne", "Clark Kent"]);

    assert_eq!(resolver.activities_for_user(&users[0].id).unwrap().len(), 1);
    assert!(resolver.activities_for_user(&users[1].id).unwrap().is_empty());
}

#[test]
fn test_deleting_parent_does_not_cascade() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let resolver = RelationResolver::new(db.clone());

    let user = NewUser {
        name: "Arthur Curry".to_string(),
        email: "aquaman@dc.com".to_string(),
        password: "atlantis123".to_string(),
        team_id: None,
    }
    .into_user(UserId::generate(), Utc::now());

    let activity = NewActivity {
        user_id: user.id.clone(),
        activity_type: "Swimming".to_string(),
        duration: 60,
        distance: Some(2.5),
        calories: 600,
        date: Utc::now(),
        notes: String::new(),
    }
    .into_activity(ActivityId::generate());

    db.with_connection(|conn| {
        UserStore::new(conn).insert(&user)?;
        ActivityStore::new(conn).insert(&activity)?;
        UserStore::new(conn).delete(&user.id)
    })
    .unwrap();

    let orphaned = resolver.activities_for_user(&user.id).unwrap();
    assert_eq!(orphaned.len(), 1);
    assert_eq!(orphaned[0].id, activity.id);
}

#[test]
fn test_unknown_ids_resolve_to_nothing() {
    let resolver = RelationResolver::new(Arc::new(Database::open_in_memory().unwrap()));
    assert!(resolver.members_of_team(&TeamId::new("")).unwrap().is_empty());
    assert!(resolver
        .activities_for_user(&UserId::generate())
        .unwrap()
        .is_empty());
}
