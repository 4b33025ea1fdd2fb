//! Publish seam between the workers and the broker.
//!
//! Workers depend on [`TaskPublisher`] rather than on [`BrokerConnection`]
//! directly, so the filter/generate and discovery state machines can be
//! exercised in tests with an in-memory fake.

use async_trait::async_trait;

use jobpilot_core::{defaults, LetterTask, Result, VacancyTask};

use crate::connection::BrokerConnection;

/// Destination for the two pipeline task types.
#[async_trait]
pub trait TaskPublisher: Send {
    /// Publish a discovered vacancy to `vacancies_to_process`.
    async fn publish_vacancy(&mut self, task: &VacancyTask) -> Result<()>;

    /// Publish a generated letter to `cover_letters_to_send`. Callers must
    /// uphold the non-empty `cover_letter` invariant before publishing.
    async fn publish_letter(&mut self, task: &LetterTask) -> Result<()>;
}

#[async_trait]
impl TaskPublisher for BrokerConnection {
    async fn publish_vacancy(&mut self, task: &VacancyTask) -> Result<()> {
        self.publish(defaults::QUEUE_VACANCIES, task).await
    }

    async fn publish_letter(&mut self, task: &LetterTask) -> Result<()> {
        self.publish(defaults::QUEUE_COVER_LETTERS, task).await
    }
}
