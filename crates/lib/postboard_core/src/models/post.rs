//! Post domain model.

use chrono::{DateTime, Utc};

/// Row returned by post queries.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PostRow {
    pub id: i32,
    pub body: String,
    /// Creation time, assigned by the store on insert.
    pub date: DateTime<Utc>,
}
