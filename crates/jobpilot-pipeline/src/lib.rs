//! # jobpilot-pipeline
//!
//! The pipeline core: the three stages that move a vacancy from discovery
//! to a submitted application.
//!
//! - [`discovery`] — search, dedup against the store, enqueue new vacancies
//! - [`process`] — filter/generate worker for `vacancies_to_process`
//! - [`submit`] — rate-limited submit worker for `cover_letters_to_send`
//!
//! Worker state machines are plain structs over trait objects and return an
//! [`Outcome`] per message; [`worker`] owns the consumer loops that map
//! outcomes to broker acknowledgments. This split keeps every decision path
//! testable without a running broker.

pub mod discovery;
pub mod filter;
pub mod policy;
pub mod process;
pub mod rate_limiter;
pub mod submit;
pub mod worker;

#[cfg(test)]
pub(crate) mod support;

pub use discovery::DiscoveryService;
pub use filter::KeywordFilter;
pub use policy::{policy_for_mode, AutoApprove, Decision, DeferAll, SubmitPolicy};
pub use process::ProcessWorker;
pub use rate_limiter::RateLimiter;
pub use submit::SubmitWorker;
pub use worker::{run_discovery, run_process_worker, run_submit_worker, WorkerHandle};

/// Disposition of one consumed queue message.
///
/// `Ack` removes the message from the queue, whether the work succeeded or
/// was dropped as terminal. `Requeue` returns it for redelivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ack,
    Requeue,
}
