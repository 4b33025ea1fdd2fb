//! # jobpilot-core
//!
//! Core types, traits, and configuration for the jobpilot pipeline.
//!
//! This crate provides the data model, the collaborator trait boundaries
//! (store, search, generation, submission), and the shared error type that
//! the other jobpilot crates depend on.

pub mod config;
pub mod defaults;
pub mod error;
pub mod ids;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use config::{BotMode, Settings};
pub use error::{Error, Result, SubmitError};
pub use ids::new_v7;
pub use models::{LetterTask, NewVacancy, SearchStats, StatusCounts, Vacancy, VacancyTask};
pub use traits::{
    LetterGenerator, SearchClient, SearchCriteria, SubmissionClient, VacancyRepository,
};
