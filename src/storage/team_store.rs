//! Team persistence.

use rusqlite::{params, Connection, Row};

use crate::models::{Team, TeamId};
use crate::storage::database::{parse_timestamp, query_error, write_error, DatabaseError};

const COLUMNS: &str = "id, name, description, created_at";

/// Team store over a borrowed connection or transaction.
pub struct TeamStore<'a> {
    conn: &'a Connection,
}

impl<'a> TeamStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, team: &Team) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO teams (id, name, description, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![
                    team.id,
                    team.name,
                    team.description,
                    team.created_at.to_rfc3339()
                ],
            )
            .map_err(write_error)?;

        tracing::debug!(team_id = %team.id, "Inserted team");
        Ok(())
    }

    pub fn get(&self, id: &TeamId) -> Result<Option<Team>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM teams WHERE id = ?1"))
            .map_err(query_error)?;

        match stmt.query_row(params![id], TeamRow::from_row) {
            Ok(row) => Ok(Some(row.into_team()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(query_error(e)),
        }
    }

    /// All teams, in insertion order.
    pub fn list(&self) -> Result<Vec<Team>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM teams ORDER BY rowid"))
            .map_err(query_error)?;

        let rows = stmt
            .query_map([], TeamRow::from_row)
            .map_err(query_error)?;

        let mut teams = Vec::new();
        for row in rows {
            teams.push(row.map_err(query_error)?.into_team()?);
        }
        Ok(teams)
    }

    pub fn update(&self, team: &Team) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE teams SET name = ?2, description = ?3 WHERE id = ?1",
                params![team.id, team.name, team.description],
            )
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Team {}", team.id)));
        }
        Ok(())
    }

    /// Delete a team. Members keep their now-dangling `team_id`.
    pub fn delete(&self, id: &TeamId) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM teams WHERE id = ?1", params![id])
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Team {id}")));
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM teams", [], |row| row.get(0))
            .map_err(query_error)?;

        Ok(count as usize)
    }

    /// Whether another team already uses this name.
    pub fn name_taken(&self, name: &str, except: Option<&TeamId>) -> Result<bool, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM teams WHERE name = ?1 AND id IS NOT ?2",
                params![name, except],
                |row| row.get(0),
            )
            .map_err(query_error)?;

        Ok(count > 0)
    }
}

struct TeamRow {
    id: TeamId,
    name: String,
    description: String,
    created_at: String,
}

impl TeamRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn into_team(self) -> Result<Team, DatabaseError> {
        Ok(Team {
            created_at: parse_timestamp(&self.created_at, "created_at")?,
            id: self.id,
            name: self.name,
            description: self.description,
        })
    }
}
