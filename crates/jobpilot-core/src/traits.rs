//! Collaborator trait boundaries.
//!
//! These traits define the seams between the pipeline core and its external
//! collaborators (store, search source, letter generator, submission API),
//! enabling pluggable backends and testing with fakes.

use async_trait::async_trait;

use crate::error::{Result, SubmitError};
use crate::models::{NewVacancy, StatusCounts, Vacancy, VacancyTask};

/// Criteria for one discovery batch.
#[derive(Debug, Clone)]
pub struct SearchCriteria {
    /// Full-text search query.
    pub text: String,
    /// Region ids understood by the search source.
    pub areas: Vec<i64>,
    /// Page size.
    pub per_page: u32,
    /// Zero-based page index.
    pub page: u32,
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            text: crate::defaults::SEARCH_QUERY.to_string(),
            areas: crate::defaults::SEARCH_AREAS.to_vec(),
            per_page: crate::defaults::SEARCH_PER_PAGE,
            page: 0,
        }
    }
}

/// Authoritative dedup/state store for vacancies.
///
/// All operations are atomic with respect to concurrent callers on the same
/// `hh_id`; the pipeline itself only ever mutates an item from one stage at
/// a time.
#[async_trait]
pub trait VacancyRepository: Send + Sync {
    /// Insert the vacancy if its `hh_id` has never been seen.
    ///
    /// Returns `None` when the id already exists (duplicate, skip) — the
    /// existing record is left untouched.
    async fn upsert_if_new(&self, vacancy: NewVacancy) -> Result<Option<Vacancy>>;

    /// Look up a vacancy by its external id.
    async fn find_by_hh_id(&self, hh_id: &str) -> Result<Option<Vacancy>>;

    /// Record a generated letter: sets `processed` and `letter_generated`,
    /// stores the text. Returns `false` when no row matches `hh_id`.
    async fn mark_letter_generated(&self, hh_id: &str, cover_letter: &str) -> Result<bool>;

    /// Record a successful submission: sets `applied` and the submission
    /// timestamp. Returns `false` when no row matches `hh_id`.
    async fn mark_applied(&self, hh_id: &str) -> Result<bool>;

    /// Aggregate pipeline-progress counters.
    async fn status_counts(&self) -> Result<StatusCounts>;
}

/// External vacancy search source.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Fetch one batch of candidate vacancies. A failure here aborts the
    /// whole discovery batch.
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<NewVacancy>>;
}

/// Cover letter generator.
///
/// May veto independently of the worker's keyword predicate by returning
/// `Ok(None)` — "does not qualify" is not an error.
#[async_trait]
pub trait LetterGenerator: Send + Sync {
    async fn generate(&self, task: &VacancyTask) -> Result<Option<String>>;
}

/// External submission API.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    /// Submit an application for `vacancy_id` with the given letter text.
    ///
    /// The error distinguishes transient failures (retryable later) from
    /// permanent ones (never retryable).
    async fn submit(
        &self,
        vacancy_id: &str,
        cover_letter: &str,
    ) -> std::result::Result<(), SubmitError>;
}
