//! Schema bootstrap.
//!
//! Embeds and runs SQL migrations from `postboard_core/migrations/`. The
//! migration SQL only creates tables that are absent and then widens
//! `posts.date` to `TIMESTAMPTZ`, so running it on every start is safe,
//! including against a database whose tables were created before
//! migrations were tracked.

use sqlx::PgPool;
use sqlx::migrate::Migrator;

/// Embedded migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run all embedded database migrations against the given pool.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_embedded() {
        assert!(MIGRATOR.iter().count() >= 1);
    }

    #[test]
    fn migrations_create_tables_idempotently() {
        for migration in MIGRATOR.iter() {
            let sql = migration.sql.to_uppercase();
            assert!(
                !sql.contains("CREATE TABLE ") || sql.contains("CREATE TABLE IF NOT EXISTS"),
                "migration {} must use CREATE TABLE IF NOT EXISTS",
                migration.version
            );
        }
    }

    #[test]
    fn legacy_naive_timestamps_are_widened() {
        let widened = MIGRATOR.iter().any(|m| {
            m.sql
                .to_uppercase()
                .contains("ALTER COLUMN DATE TYPE TIMESTAMPTZ")
        });
        assert!(widened);
    }
}
