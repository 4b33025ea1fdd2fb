//! # jobpilot-db
//!
//! PostgreSQL dedup/state store for the jobpilot pipeline.
//!
//! This crate provides:
//! - Connection pool management
//! - The [`PgVacancyRepository`] implementation of
//!   [`jobpilot_core::VacancyRepository`]
//! - Idempotent schema bootstrap
//!
//! ## Example
//!
//! ```rust,ignore
//! use jobpilot_db::Database;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/jobpilot").await?;
//!     let counts = db.vacancies.status_counts().await?;
//!     println!("tracked vacancies: {}", counts.total);
//!     Ok(())
//! }
//! ```

pub mod pool;
pub mod schema;
pub mod vacancies;

// Re-export core types
pub use jobpilot_core::*;

pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use vacancies::PgVacancyRepository;

/// Combined database context.
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Vacancy repository for dedup and status transitions.
    pub vacancies: PgVacancyRepository,
}

impl Database {
    /// Connect with default pool configuration and ensure the schema exists.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = create_pool(database_url).await?;
        schema::ensure_schema(&pool).await?;
        Ok(Self {
            vacancies: PgVacancyRepository::new(pool.clone()),
            pool,
        })
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            vacancies: PgVacancyRepository::new(self.pool.clone()),
        }
    }
}
