//! Data model and queue message contracts.
//!
//! The queue payloads are self-describing JSON records; field names are part
//! of the wire contract and must stay stable across versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A vacancy discovered from the external search source, before it has a
/// store identity. The dedup key is `hh_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVacancy {
    /// Stable external identifier, unique across the system's lifetime.
    pub hh_id: String,
    pub name: String,
    pub company: String,
    pub salary_from: Option<f64>,
    pub salary_to: Option<f64>,
    pub salary_currency: Option<String>,
    pub experience: String,
    pub employment: String,
    pub description: String,
    /// Comma-separated skill tags.
    pub skills: String,
    pub url: String,
}

impl NewVacancy {
    /// Snapshot this vacancy into a queue task. The task carries everything
    /// the filter/generate worker needs — no additional fetch required.
    pub fn to_task(&self) -> VacancyTask {
        VacancyTask {
            hh_id: self.hh_id.clone(),
            name: self.name.clone(),
            company: self.company.clone(),
            salary_from: self.salary_from,
            salary_to: self.salary_to,
            salary_currency: self.salary_currency.clone(),
            experience: self.experience.clone(),
            employment: self.employment.clone(),
            description: self.description.clone(),
            skills: self.skills.clone(),
            url: self.url.clone(),
        }
    }
}

/// Authoritative vacancy record owned by the store.
///
/// Never deleted by the pipeline; status flags are advanced by the
/// filter/generate worker (`processed`, `letter_generated`) and the submit
/// worker (`applied`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacancy {
    pub id: Uuid,
    pub hh_id: String,
    pub name: String,
    pub company: String,
    pub salary_from: Option<f64>,
    pub salary_to: Option<f64>,
    pub salary_currency: Option<String>,
    pub experience: String,
    pub employment: String,
    pub description: String,
    pub skills: String,
    pub url: String,
    /// A letter has been attempted for this vacancy.
    pub processed: bool,
    pub letter_generated: bool,
    pub cover_letter: Option<String>,
    pub letter_generated_at: Option<DateTime<Utc>>,
    pub applied: bool,
    pub applied_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// Queue message for the discovery → filter/generate hop
/// (`vacancies_to_process`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VacancyTask {
    pub hh_id: String,
    pub name: String,
    pub company: String,
    pub salary_from: Option<f64>,
    pub salary_to: Option<f64>,
    pub salary_currency: Option<String>,
    pub experience: String,
    pub employment: String,
    pub description: String,
    pub skills: String,
    pub url: String,
}

/// Queue message for the filter/generate → submit hop
/// (`cover_letters_to_send`). Invariant: `cover_letter` is never empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LetterTask {
    pub vacancy_id: String,
    pub vacancy_name: String,
    pub company: String,
    pub cover_letter: String,
    pub url: String,
}

/// Aggregate statistics for one discovery batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchStats {
    pub total_found: usize,
    pub new_saved: usize,
    pub duplicates: usize,
    pub sent_to_queue: usize,
    pub errors: usize,
}

/// Store counters surfaced by the CLI `status` command.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusCounts {
    pub total: i64,
    pub unprocessed: i64,
    pub with_letters: i64,
    pub applied: i64,
}
