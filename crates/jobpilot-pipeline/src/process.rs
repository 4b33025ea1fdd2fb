//! Filter/generate worker for the `vacancies_to_process` queue.
//!
//! Per message: decode, look up the store row, apply the keyword predicate,
//! generate a letter, record it, publish a `LetterTask`. Terminal conditions
//! (malformed payload, missing row, filtered out, generator veto, permanent
//! generation rejection) are acknowledged and dropped; recoverable failures
//! (store, transient generation, publish) are requeued for redelivery.
//!
//! Redelivered messages whose row already shows `letter_generated` are
//! acknowledged without regenerating or publishing again, which keeps letter
//! generation idempotent under at-least-once delivery.

use std::sync::Arc;

use tracing::{error, info, warn};

use jobpilot_broker::TaskPublisher;
use jobpilot_core::{Error, LetterGenerator, LetterTask, VacancyRepository, VacancyTask};

use crate::{KeywordFilter, Outcome};

/// State machine for one filter/generate worker.
pub struct ProcessWorker {
    repo: Arc<dyn VacancyRepository>,
    generator: Arc<dyn LetterGenerator>,
    filter: KeywordFilter,
    publisher: Box<dyn TaskPublisher>,
}

impl ProcessWorker {
    pub fn new(
        repo: Arc<dyn VacancyRepository>,
        generator: Arc<dyn LetterGenerator>,
        filter: KeywordFilter,
        publisher: Box<dyn TaskPublisher>,
    ) -> Self {
        Self {
            repo,
            generator,
            filter,
            publisher,
        }
    }

    /// Handle one delivery payload and decide its disposition.
    pub async fn handle(&mut self, payload: &[u8]) -> Outcome {
        let task: VacancyTask = match serde_json::from_slice(payload) {
            Ok(task) => task,
            Err(e) => {
                // A malformed payload can never succeed; drop it.
                error!(
                    subsystem = "pipeline",
                    component = "process",
                    error = %e,
                    "Dropping malformed vacancy payload"
                );
                return Outcome::Ack;
            }
        };

        let row = match self.repo.find_by_hh_id(&task.hh_id).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                warn!(
                    subsystem = "pipeline",
                    component = "process",
                    hh_id = %task.hh_id,
                    "No store row for queued vacancy, dropping"
                );
                return Outcome::Ack;
            }
            Err(e) => {
                warn!(
                    subsystem = "pipeline",
                    component = "process",
                    hh_id = %task.hh_id,
                    error = %e,
                    "Store lookup failed, requeueing"
                );
                return Outcome::Requeue;
            }
        };

        if row.letter_generated {
            info!(
                subsystem = "pipeline",
                component = "process",
                hh_id = %task.hh_id,
                "Letter already generated, skipping redelivery"
            );
            return Outcome::Ack;
        }

        if !self.filter.matches(&task) {
            info!(
                subsystem = "pipeline",
                component = "process",
                hh_id = %task.hh_id,
                name = %task.name,
                "Vacancy filtered out"
            );
            return Outcome::Ack;
        }

        let letter = match self.generator.generate(&task).await {
            Ok(Some(letter)) if !letter.trim().is_empty() => letter,
            Ok(_) => {
                info!(
                    subsystem = "pipeline",
                    component = "process",
                    hh_id = %task.hh_id,
                    "Generator vetoed vacancy"
                );
                return Outcome::Ack;
            }
            Err(Error::Permanent(reason)) => {
                // Retrying would re-spend the generation call on the same
                // rejection; drop the message instead.
                error!(
                    subsystem = "pipeline",
                    component = "process",
                    hh_id = %task.hh_id,
                    reason = %reason,
                    "Letter generation rejected permanently, dropping"
                );
                return Outcome::Ack;
            }
            Err(e) => {
                warn!(
                    subsystem = "pipeline",
                    component = "process",
                    hh_id = %task.hh_id,
                    error = %e,
                    "Letter generation failed, requeueing"
                );
                return Outcome::Requeue;
            }
        };

        match self.repo.mark_letter_generated(&task.hh_id, &letter).await {
            Ok(true) => {}
            Ok(false) => {
                error!(
                    subsystem = "pipeline",
                    component = "process",
                    hh_id = %task.hh_id,
                    "Store row disappeared before letter could be recorded"
                );
                return Outcome::Ack;
            }
            Err(e) => {
                warn!(
                    subsystem = "pipeline",
                    component = "process",
                    hh_id = %task.hh_id,
                    error = %e,
                    "Failed to record letter, requeueing"
                );
                return Outcome::Requeue;
            }
        }

        let letter_task = LetterTask {
            vacancy_id: task.hh_id.clone(),
            vacancy_name: task.name.clone(),
            company: task.company.clone(),
            cover_letter: letter,
            url: task.url.clone(),
        };

        if let Err(e) = self.publisher.publish_letter(&letter_task).await {
            warn!(
                subsystem = "pipeline",
                component = "process",
                hh_id = %task.hh_id,
                error = %e,
                "Failed to publish letter task, requeueing"
            );
            return Outcome::Requeue;
        }

        info!(
            subsystem = "pipeline",
            component = "process",
            hh_id = %task.hh_id,
            name = %task.name,
            "Cover letter generated and enqueued"
        );
        Outcome::Ack
    }
}
