use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

const SCHEMA_VERSION: i64 = 1;

/// Runs a single, consolidated migration for the current schema.
///
/// Creates the full schema (learners, completed sections, and the
/// single-slot local session table).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if version_applied(pool, SCHEMA_VERSION).await? {
        return Ok(());
    }

    let mut tx = pool.begin().await?;

    // password_hash is NULL for rows created by a profile write
    // before any password sign-up (seeded admins, for example).
    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS learners (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT,
                role TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
        ",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS completed_sections (
                learner_id TEXT NOT NULL,
                section_id TEXT NOT NULL,
                completed_at TEXT NOT NULL,
                PRIMARY KEY (learner_id, section_id),
                FOREIGN KEY (learner_id) REFERENCES learners(id) ON DELETE CASCADE
            );
        ",
    )
    .execute(&mut *tx)
    .await?;

    // One desktop, one session: slot 0 is the only row.
    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS local_sessions (
                slot INTEGER PRIMARY KEY CHECK (slot = 0),
                learner_id TEXT NOT NULL,
                signed_in_at TEXT NOT NULL,
                FOREIGN KEY (learner_id) REFERENCES learners(id) ON DELETE CASCADE
            );
        ",
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query("INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)")
        .bind(SCHEMA_VERSION)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

async fn version_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
    let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
        .bind(version)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}
