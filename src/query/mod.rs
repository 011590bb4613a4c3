//! Query filter layer.
//!
//! Request parameters are decoded into per-collection filter structs, which
//! lower to a set of column equality predicates the stores turn into a SQL
//! `WHERE` clause. Predicates combine with `AND` and match exactly and
//! case-sensitively. An absent parameter imposes no constraint. A present but
//! empty one matches empty values, except for the leaderboard team filter,
//! where it means "every team".

pub mod filters;

pub use filters::{ActivityFilter, LeaderboardFilter, UserFilter, WorkoutFilter};

use rusqlite::ToSql;

/// Conjunction of `column = value` conditions.
///
/// Column names are `'static` so only identifiers written in this crate can
/// reach the SQL text; values are always bound as parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EqualityPredicates {
    clauses: Vec<(&'static str, String)>,
}

impl EqualityPredicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = value` when a value is present, even an empty one.
    pub fn with(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.clauses.push((column, value.to_string()));
        }
        self
    }

    /// Like [`with`](Self::with), but an empty value imposes no constraint.
    pub fn with_non_empty(self, column: &'static str, value: Option<&str>) -> Self {
        self.with(column, value.filter(|v| !v.is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Value bound for a column, if that column is constrained.
    pub fn value_for(&self, column: &str) -> Option<&str> {
        self.clauses
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, v)| v.as_str())
    }

    /// ` WHERE a = ?1 AND b = ?2`, or an empty string when unconstrained.
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            return String::new();
        }

        let conditions: Vec<String> = self
            .clauses
            .iter()
            .enumerate()
            .map(|(i, (column, _))| format!("{column} = ?{}", i + 1))
            .collect();

        format!(" WHERE {}", conditions.join(" AND "))
    }

    /// Bound values, in the order of the placeholders in [`where_clause`](Self::where_clause).
    pub fn params(&self) -> Vec<&dyn ToSql> {
        self.clauses
            .iter()
            .map(|(_, value)| value as &dyn ToSql)
            .collect()
    }
}
