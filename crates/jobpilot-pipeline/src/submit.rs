//! Submit worker for the `cover_letters_to_send` queue.
//!
//! Per message: decode, consult the submit policy, wait out the rate
//! limiter, submit. The outcome mapping is deliberate:
//!
//! - success: mark applied, ack
//! - transient failure: ack without marking; the vacancy stays eligible for
//!   a later re-attempt because the store never saw `applied`
//! - permanent failure: ack and log; retrying can never succeed
//! - deferred by policy: requeue
//!
//! A store failure after a successful submission cannot be rolled back (the
//! application is already out), so it is logged at error level and the
//! message is still acknowledged.

use std::sync::Arc;

use tracing::{error, info, warn};

use jobpilot_core::{LetterTask, SubmissionClient, SubmitError, VacancyRepository};

use crate::policy::{Decision, SubmitPolicy};
use crate::{Outcome, RateLimiter};

/// State machine for one submit worker.
pub struct SubmitWorker {
    repo: Arc<dyn VacancyRepository>,
    client: Arc<dyn SubmissionClient>,
    policy: Box<dyn SubmitPolicy>,
    limiter: RateLimiter,
}

impl SubmitWorker {
    pub fn new(
        repo: Arc<dyn VacancyRepository>,
        client: Arc<dyn SubmissionClient>,
        policy: Box<dyn SubmitPolicy>,
        limiter: RateLimiter,
    ) -> Self {
        Self {
            repo,
            client,
            policy,
            limiter,
        }
    }

    /// Handle one delivery payload and decide its disposition.
    pub async fn handle(&mut self, payload: &[u8]) -> Outcome {
        let task: LetterTask = match serde_json::from_slice(payload) {
            Ok(task) => task,
            Err(e) => {
                error!(
                    subsystem = "pipeline",
                    component = "submit",
                    error = %e,
                    "Dropping malformed letter payload"
                );
                return Outcome::Ack;
            }
        };

        if task.cover_letter.trim().is_empty() {
            error!(
                subsystem = "pipeline",
                component = "submit",
                hh_id = %task.vacancy_id,
                "Dropping letter task with empty cover letter"
            );
            return Outcome::Ack;
        }

        match self.policy.decide(&task) {
            Decision::Approve => {}
            Decision::Skip => {
                info!(
                    subsystem = "pipeline",
                    component = "submit",
                    hh_id = %task.vacancy_id,
                    "Submission skipped by policy"
                );
                return Outcome::Ack;
            }
            Decision::Defer => {
                info!(
                    subsystem = "pipeline",
                    component = "submit",
                    hh_id = %task.vacancy_id,
                    "Submission deferred by policy"
                );
                return Outcome::Requeue;
            }
        }

        self.limiter.wait_if_needed().await;

        match self.client.submit(&task.vacancy_id, &task.cover_letter).await {
            Ok(()) => {
                match self.repo.mark_applied(&task.vacancy_id).await {
                    Ok(true) => {}
                    Ok(false) => {
                        error!(
                            subsystem = "pipeline",
                            component = "submit",
                            hh_id = %task.vacancy_id,
                            "Application sent but no store row to mark applied"
                        );
                    }
                    Err(e) => {
                        // The submission went out and cannot be undone.
                        error!(
                            subsystem = "pipeline",
                            component = "submit",
                            hh_id = %task.vacancy_id,
                            error = %e,
                            "Application sent but the store update failed"
                        );
                    }
                }
                info!(
                    subsystem = "pipeline",
                    component = "submit",
                    hh_id = %task.vacancy_id,
                    name = %task.vacancy_name,
                    "Application submitted"
                );
                Outcome::Ack
            }
            Err(SubmitError::Transient(reason)) => {
                warn!(
                    subsystem = "pipeline",
                    component = "submit",
                    hh_id = %task.vacancy_id,
                    reason = %reason,
                    "Transient submission failure, leaving unmarked for re-attempt"
                );
                Outcome::Ack
            }
            Err(SubmitError::Permanent(reason)) => {
                error!(
                    subsystem = "pipeline",
                    component = "submit",
                    hh_id = %task.vacancy_id,
                    reason = %reason,
                    "Permanent submission failure, dropping"
                );
                Outcome::Ack
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{AutoApprove, DeferAll};
    use crate::support::{letter_task, new_vacancy, MemoryRepository};
    use jobpilot_clients::MockSubmission;
    use std::time::Duration;
    use tokio::time::Instant;

    struct SkipAll;
    impl SubmitPolicy for SkipAll {
        fn decide(&self, _task: &LetterTask) -> Decision {
            Decision::Skip
        }
    }

    fn seeded_repo(hh_id: &str) -> Arc<MemoryRepository> {
        let repo = Arc::new(MemoryRepository::new());
        repo.seed(MemoryRepository::row_from(&new_vacancy(
            hh_id,
            "Python Developer",
        )));
        repo
    }

    fn payload(task: &LetterTask) -> Vec<u8> {
        serde_json::to_vec(task).unwrap()
    }

    fn worker(
        repo: Arc<MemoryRepository>,
        client: Arc<MockSubmission>,
        policy: Box<dyn SubmitPolicy>,
    ) -> SubmitWorker {
        SubmitWorker::new(repo, client, policy, RateLimiter::new(5))
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_submission_marks_applied() {
        let repo = seeded_repo("1");
        let client = Arc::new(MockSubmission::accepting());
        let mut worker = worker(repo.clone(), client.clone(), Box::new(AutoApprove));

        let outcome = worker.handle(&payload(&letter_task("1"))).await;

        assert_eq!(outcome, Outcome::Ack);
        assert!(repo.get("1").unwrap().applied);
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_submission_respects_quota_interval() {
        let repo = seeded_repo("1");
        repo.seed(MemoryRepository::row_from(&new_vacancy(
            "2",
            "Python Developer",
        )));
        let client = Arc::new(MockSubmission::accepting());
        let mut worker = worker(repo, client, Box::new(AutoApprove));

        worker.handle(&payload(&letter_task("1"))).await;

        let before = Instant::now();
        worker.handle(&payload(&letter_task("2"))).await;
        // 5 per hour means the second send waits the full 720 seconds.
        assert_eq!(Instant::now() - before, Duration::from_secs(720));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transient_failure_acks_without_marking() {
        let repo = seeded_repo("1");
        let client = Arc::new(
            MockSubmission::accepting()
                .push_outcome(Err(SubmitError::Transient("HTTP 429".to_string()))),
        );
        let mut worker = worker(repo.clone(), client, Box::new(AutoApprove));

        let outcome = worker.handle(&payload(&letter_task("1"))).await;

        assert_eq!(outcome, Outcome::Ack);
        assert!(!repo.get("1").unwrap().applied);
        // The attempt consumed a quota slot; the failure adds nothing more.
        assert_eq!(worker.limiter.remaining(), Duration::from_secs(720));
    }

    #[tokio::test(start_paused = true)]
    async fn test_permanent_failure_acks_without_marking() {
        let repo = seeded_repo("1");
        let client = Arc::new(
            MockSubmission::accepting()
                .push_outcome(Err(SubmitError::Permanent("HTTP 403".to_string()))),
        );
        let mut worker = worker(repo.clone(), client, Box::new(AutoApprove));

        assert_eq!(worker.handle(&payload(&letter_task("1"))).await, Outcome::Ack);
        assert!(!repo.get("1").unwrap().applied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_skip_policy_acks_without_submitting() {
        let repo = seeded_repo("1");
        let client = Arc::new(MockSubmission::accepting());
        let mut worker = worker(repo.clone(), client.clone(), Box::new(SkipAll));

        assert_eq!(worker.handle(&payload(&letter_task("1"))).await, Outcome::Ack);
        assert!(client.calls().is_empty());
        assert!(!repo.get("1").unwrap().applied);
    }

    #[tokio::test(start_paused = true)]
    async fn test_defer_policy_requeues_without_consuming_quota() {
        let repo = seeded_repo("1");
        let client = Arc::new(MockSubmission::accepting());
        let mut worker = worker(repo, client.clone(), Box::new(DeferAll));

        assert_eq!(
            worker.handle(&payload(&letter_task("1"))).await,
            Outcome::Requeue
        );
        assert!(client.calls().is_empty());
        assert_eq!(worker.limiter.remaining(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_payload_is_dropped() {
        let client = Arc::new(MockSubmission::accepting());
        let mut worker = worker(
            Arc::new(MemoryRepository::new()),
            client.clone(),
            Box::new(AutoApprove),
        );

        assert_eq!(worker.handle(b"{not json").await, Outcome::Ack);
        assert!(client.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_letter_violates_invariant_and_is_dropped() {
        let client = Arc::new(MockSubmission::accepting());
        let mut worker = worker(
            seeded_repo("1"),
            client.clone(),
            Box::new(AutoApprove),
        );

        let mut task = letter_task("1");
        task.cover_letter = "   ".to_string();
        assert_eq!(worker.handle(&payload(&task)).await, Outcome::Ack);
        assert!(client.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_failure_after_success_still_acks() {
        let repo = seeded_repo("1");
        repo.fail_marks();
        let client = Arc::new(MockSubmission::accepting());
        let mut worker = worker(repo, client.clone(), Box::new(AutoApprove));

        // The application went out; losing the store write must not put the
        // message back on the queue for a duplicate submission.
        assert_eq!(worker.handle(&payload(&letter_task("1"))).await, Outcome::Ack);
        assert_eq!(client.calls().len(), 1);
    }
}
