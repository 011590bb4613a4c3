//! Activity persistence.

use rusqlite::{params, Connection, Row};

use crate::models::{Activity, ActivityId, UserId};
use crate::query::ActivityFilter;
use crate::storage::database::{parse_timestamp, query_error, write_error, DatabaseError};

const COLUMNS: &str = "id, user_id, activity_type, duration, distance, calories, date, notes";

/// Activity store over a borrowed connection or transaction.
pub struct ActivityStore<'a> {
    conn: &'a Connection,
}

impl<'a> ActivityStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn insert(&self, activity: &Activity) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO activities (id, user_id, activity_type, duration, distance,
                 calories, date, notes)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    activity.id,
                    activity.user_id,
                    activity.activity_type,
                    activity.duration,
                    activity.distance,
                    activity.calories,
                    activity.date.to_rfc3339(),
                    activity.notes,
                ],
            )
            .map_err(write_error)?;

        tracing::debug!(activity_id = %activity.id, user_id = %activity.user_id, "Inserted activity");
        Ok(())
    }

    pub fn get(&self, id: &ActivityId) -> Result<Option<Activity>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM activities WHERE id = ?1"))
            .map_err(query_error)?;

        match stmt.query_row(params![id], ActivityRow::from_row) {
            Ok(row) => Ok(Some(row.into_activity()?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(query_error(e)),
        }
    }

    /// List activities matching the filter, in insertion order.
    pub fn list(&self, filter: &ActivityFilter) -> Result<Vec<Activity>, DatabaseError> {
        let predicates = filter.predicates();
        let sql = format!(
            "SELECT {COLUMNS} FROM activities{} ORDER BY rowid",
            predicates.where_clause()
        );

        let mut stmt = self.conn.prepare(&sql).map_err(query_error)?;
        let rows = stmt
            .query_map(predicates.params().as_slice(), ActivityRow::from_row)
            .map_err(query_error)?;

        let mut activities = Vec::new();
        for row in rows {
            activities.push(row.map_err(query_error)?.into_activity()?);
        }
        Ok(activities)
    }

    /// All activities logged by one user.
    ///
    /// Always an equality match, so an empty id matches nothing.
    pub fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Activity>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT {COLUMNS} FROM activities WHERE user_id = ?1 ORDER BY rowid"
            ))
            .map_err(query_error)?;
        let rows = stmt
            .query_map(params![user_id], ActivityRow::from_row)
            .map_err(query_error)?;

        let mut activities = Vec::new();
        for row in rows {
            activities.push(row.map_err(query_error)?.into_activity()?);
        }
        Ok(activities)
    }

    pub fn update(&self, activity: &Activity) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE activities SET user_id = ?2, activity_type = ?3, duration = ?4,
                 distance = ?5, calories = ?6, date = ?7, notes = ?8 WHERE id = ?1",
                params![
                    activity.id,
                    activity.user_id,
                    activity.activity_type,
                    activity.duration,
                    activity.distance,
                    activity.calories,
                    activity.date.to_rfc3339(),
                    activity.notes,
                ],
            )
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Activity {}", activity.id)));
        }
        Ok(())
    }

    pub fn delete(&self, id: &ActivityId) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM activities WHERE id = ?1", params![id])
            .map_err(write_error)?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Activity {id}")));
        }
        Ok(())
    }

    pub fn count(&self, filter: &ActivityFilter) -> Result<usize, DatabaseError> {
        let predicates = filter.predicates();
        let count: i64 = self
            .conn
            .query_row(
                &format!("SELECT COUNT(*) FROM activities{}", predicates.where_clause()),
                predicates.params().as_slice(),
                |row| row.get(0),
            )
            .map_err(query_error)?;

        Ok(count as usize)
    }
}

struct ActivityRow {
    id: ActivityId,
    user_id: UserId,
    activity_type: String,
    duration: u32,
    distance: Option<f64>,
    calories: u32,
    date: String,
    notes: String,
}

impl ActivityRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            activity_type: row.get(2)?,
            duration: row.get(3)?,
            distance: row.get(4)?,
            calories: row.get(5)?,
            date: row.get(6)?,
            notes: row.get(7)?,
        })
    }

    fn into_activity(self) -> Result<Activity, DatabaseError> {
        Ok(Activity {
            date: parse_timestamp(&self.date, "date")?,
            id: self.id,
            user_id: self.user_id,
            activity_type: self.activity_type,
            duration: self.duration,
            distance: self.distance,
            calories: self.calories,
            notes: self.notes,
        })
    }
}
