//! Idempotent schema bootstrap.
//!
//! The pipeline owns a single table; workers call [`ensure_schema`] on
//! startup so any of the three processes can run first.

use sqlx::PgPool;
use tracing::info;

use jobpilot_core::Result;

const CREATE_VACANCIES: &str = r#"
CREATE TABLE IF NOT EXISTS vacancies (
    id                  UUID PRIMARY KEY,
    hh_id               TEXT NOT NULL UNIQUE,
    name                TEXT NOT NULL DEFAULT '',
    company             TEXT NOT NULL DEFAULT '',
    salary_from         DOUBLE PRECISION,
    salary_to           DOUBLE PRECISION,
    salary_currency     TEXT,
    experience          TEXT NOT NULL DEFAULT '',
    employment          TEXT NOT NULL DEFAULT '',
    description         TEXT NOT NULL DEFAULT '',
    skills              TEXT NOT NULL DEFAULT '',
    url                 TEXT NOT NULL DEFAULT '',
    processed           BOOLEAN NOT NULL DEFAULT FALSE,
    letter_generated    BOOLEAN NOT NULL DEFAULT FALSE,
    cover_letter        TEXT,
    letter_generated_at TIMESTAMPTZ,
    applied             BOOLEAN NOT NULL DEFAULT FALSE,
    applied_at          TIMESTAMPTZ,
    created_at          TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Create the vacancies table if it does not exist yet. Safe to repeat.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_VACANCIES).execute(pool).await?;
    info!(
        subsystem = "db",
        component = "schema",
        op = "ensure",
        "Database schema ready"
    );
    Ok(())
}
