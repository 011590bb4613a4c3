//! User persistence.

use rusqlite::{params, Connection, Row};

use crate::models::{TeamId, User, UserId};
use crate::query::UserFilter;
use crate::storage::database::{parse_timestamp, query_error, write_error, DatabaseError};

const COLUMNS: &str = "id, name, email, password, team_id, created_at";

/// User store over a borrowed connection or transaction.
pub struct UserStore<'a> {
    conn: &'a Connection,
}

impl<'a> UserStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new user.
    pub fn insert(&self, user: &User) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO users (id, name, email, password, team_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    user.id,
                    user.name,
                    user.email,
                    user.password,
                    user.team_id,
                    user.created_at.to_rfc3339(),
                ],
            )
            .map_err(write_error)?;

        tracing::debug!(user_id = %user.id, "Inserted user");
        Ok(())
    }

    /// Get a user by ID.
    pub fn get(&self, id: &UserId) -> Result<Option<User>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM users WHERE id = ?1"))
            .map_err(query_error)?;

        let result = stmt.query_row(params![id], UserRow::from_row);

        match result {
            Ok(row) => Ok(Some(row.into_user()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(query_error(e)),
        }
    }

    /// List users matching the filter, in insertion order.
    pub fn list(&self, filter: &UserFilter) -> Result<Vec<User>, DatabaseError> {
        let predicates = filter.predicates();
        let sql = format!(
            "SELECT {COLUMNS} FROM users{} ORDER BY rowid",
            predicates.where_clause()
        );

        let mut stmt = self.conn.prepare(&sql).map_err(query_error)?;
        let rows = stmt
            .query_map(predicates.params().as_slice(), UserRow::from_row)
            .map_err(query_error)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row.map_err(query_error)?.into_user()?);
        }

        Ok(users)
    }

    /// Members of one team. Always an equality match, so an empty id matches nothing.
    pub fn list_for_team(&self, team_id: &TeamId) -> Result<Vec<User>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM users WHERE team_id = ?1 ORDER BY rowid"
            ))
            .map_err(query_error)?;
        let rows = stmt
            .query_map(params![team_id], UserRow::from_row)
            .map_err(query_error)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row.map_err(query_error)?.into_user()?);
        }

        Ok(users)
    }

    /// Update every writable column of an existing user.
    pub fn update(&self, user: &User) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE users SET name = ?2, email = ?3, password = ?4, team_id = ?5
                 WHERE id = ?1",
                params![user.id, user.name, user.email, user.password, user.team_id],
            )
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("User {}", user.id)));
        }

        Ok(())
    }

    /// Delete a user by ID. Activities and leaderboard rows are left in place.
    pub fn delete(&self, id: &UserId) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1", params![id])
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("User {id}")));
        }

        Ok(())
    }

    /// Count users matching the filter.
    pub fn count(&self, filter: &UserFilter) -> Result<usize, DatabaseError> {
        let predicates = filter.predicates();
        let count: i64 = self
            .conn
            .query_row(
                &format!("SELECT COUNT(*) FROM users{}", predicates.where_clause()),
                predicates.params().as_slice(),
                |row| row.get(0),
            )
            .map_err(query_error)?;

        Ok(count as usize)
    }

    /// Whether another user already holds this email.
    pub fn email_taken(&self, email: &str, except: Option<&UserId>) -> Result<bool, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM users WHERE email = ?1 AND id IS NOT ?2",
                params![email, except],
                |row| row.get(0),
            )
            .map_err(query_error)?;

        Ok(count > 0)
    }
}

/// Intermediate struct for reading user rows from database.
struct UserRow {
    id: UserId,
    name: String,
    email: String,
    password: String,
    team_id: Option<TeamId>,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
            team_id: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn into_user(self) -> Result<User, DatabaseError> {
        Ok(User {
            created_at: parse_timestamp(&self.created_at, "created_at")?,
            id: self.id,
            name: self.name,
            email: self.email,
            password: self.password,
            team_id: self.team_id,
        })
    }
}
