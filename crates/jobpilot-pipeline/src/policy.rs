//! Submission decision hook.
//!
//! The submit worker consults a [`SubmitPolicy`] before sending each
//! application. Automatic mode approves everything; interactive mode defers
//! everything, leaving the queue for a deliberate operator-driven drain
//! instead of blocking the consumer on console input.

use jobpilot_core::{BotMode, LetterTask};

/// What to do with one letter task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Send the application now.
    Approve,
    /// Drop the task without sending (acknowledged, never retried).
    Skip,
    /// Keep the task queued for later (negative acknowledgment, requeued).
    Defer,
}

/// Decision hook consulted once per letter task, before the rate limiter.
pub trait SubmitPolicy: Send + Sync {
    fn decide(&self, task: &LetterTask) -> Decision;
}

/// Approves every submission.
#[derive(Debug, Default)]
pub struct AutoApprove;

impl SubmitPolicy for AutoApprove {
    fn decide(&self, _task: &LetterTask) -> Decision {
        Decision::Approve
    }
}

/// Defers every submission.
#[derive(Debug, Default)]
pub struct DeferAll;

impl SubmitPolicy for DeferAll {
    fn decide(&self, _task: &LetterTask) -> Decision {
        Decision::Defer
    }
}

/// The shipped policy for a bot mode.
pub fn policy_for_mode(mode: BotMode) -> Box<dyn SubmitPolicy> {
    match mode {
        BotMode::Automatic => Box::new(AutoApprove),
        BotMode::Interactive => Box::new(DeferAll),
    }
}
