//! Workout suggestion persistence.

use rusqlite::{params, Connection, Row};

use crate::models::{Workout, WorkoutId};
use crate::query::WorkoutFilter;
use crate::storage::database::{query_error, write_error, DatabaseError};

const COLUMNS: &str = "id, title, description, category, difficulty, duration, calories_estimate";

/// Workout store over a borrowed connection or transaction.
pub struct WorkoutStore<'a> {
    conn: &'a Connection,
}

impl<'a> WorkoutStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, workout: &Workout) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO workouts (id, title, description, category, difficulty, duration,
                 calories_estimate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    workout.id,
                    workout.title,
                    workout.description,
                    workout.category,
                    workout.difficulty,
                    workout.duration,
                    workout.calories_estimate,
                ],
            )
            .map_err(write_error)?;

        tracing::debug!(workout_id = %workout.id, "Inserted workout");
        Ok(())
    }

    pub fn get(&self, id: &WorkoutId) -> Result<Option<Workout>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM workouts WHERE id = ?1"))
            .map_err(query_error)?;

        match stmt.query_row(params![id], workout_from_row) {
            Ok(workout) => Ok(Some(workout)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(query_error(e)),
        }
    }

    /// Workouts matching every supplied filter parameter, in insertion order.
    pub fn list(&self, filter: &WorkoutFilter) -> Result<Vec<Workout>, DatabaseError> {
        let predicates = filter.predicates();
        let sql = format!(
            "SELECT {COLUMNS} FROM workouts{} ORDER BY rowid",
            predicates.where_clause()
        );

        let mut stmt = self.conn.prepare(&sql).map_err(query_error)?;
        let rows = stmt
            .query_map(predicates.params().as_slice(), workout_from_row)
            .map_err(query_error)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(query_error)
    }

    pub fn update(&self, workout: &Workout) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE workouts SET title = ?2, description = ?3, category = ?4,
                 difficulty = ?5, duration = ?6, calories_estimate = ?7 WHERE id = ?1",
                params![
                    workout.id,
                    workout.title,
                    workout.description,
                    workout.category,
                    workout.difficulty,
                    workout.duration,
                    workout.calories_estimate,
                ],
            )
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Workout {}", workout.id)));
        }
        Ok(())
    }

    pub fn delete(&self, id: &WorkoutId) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM workouts WHERE id = ?1", params![id])
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Workout {id}")));
        }
        Ok(())
    }

    pub fn count(&self, filter: &WorkoutFilter) -> Result<usize, DatabaseError> {
        let predicates = filter.predicates();
        let count: i64 = self
            .conn
            .query_row(
                &format!("SELECT COUNT(*) FROM workouts{}", predicates.where_clause()),
                predicates.params().as_slice(),
                |row| row.get(0),
            )
            .map_err(query_error)?;

        Ok(count as usize)
    }
}

// No timestamp columns, so rows map straight onto the model.
fn workout_from_row(row: &Row<'_>) -> rusqlite::Result<Workout> {
    Ok(Workout {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        difficulty: row.get(4)?,
        duration: row.get(5)?,
        calories_estimate: row.get(6)?,
    })
}
