//! Joins over the denormalized reference fields.
//!
//! References are never checked, so a join on an id that matches nothing
//! (including an id with no parent record) yields an empty list.

use std::sync::Arc;

use crate::models::{Activity, TeamId, User, UserId};
use crate::storage::{ActivityStore, Database, DatabaseError, UserStore};

/// Resolves a parent id to its dependents.
#[derive(Clone)]
pub struct RelationResolver {
    db: Arc<Database>,
}

impl RelationResolver {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Activities whose `user_id` equals the given id.
    pub fn activities_for_user(&self, user_id: &UserId) -> Result<Vec<Activity>, DatabaseError> {
        self.db
            .with_connection(|conn| ActivityStore::new(conn).list_for_user(user_id))
    }

    /// Users whose `team_id` equals the given id.
    pub fn members_of_team(&self, team_id: &TeamId) -> Result<Vec<User>, DatabaseError> {
        self.db
            .with_connection(|conn| UserStore::new(conn).list_for_team(team_id))
    }
}
