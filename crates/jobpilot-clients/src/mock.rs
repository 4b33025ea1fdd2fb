//! Deterministic fakes for pipeline tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use jobpilot_core::{Error, LetterGenerator, Result, SubmissionClient, SubmitError, VacancyTask};

/// Scripted [`LetterGenerator`]: returns a fixed letter, a veto, or a
/// failure, and records every task it was asked about.
#[derive(Default)]
pub struct MockGenerator {
    response: Option<String>,
    fail_with: Option<String>,
    fail_permanently: bool,
    calls: Mutex<Vec<String>>,
}

impl MockGenerator {
    /// Generator that always produces the given letter.
    pub fn with_fixed_response(letter: &str) -> Self {
        Self {
            response: Some(letter.to_string()),
            ..Self::default()
        }
    }

    /// Generator that vetoes every task.
    pub fn with_veto() -> Self {
        Self::default()
    }

    /// Generator that fails every call with a retryable error.
    pub fn with_failure(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Generator that fails every call with a permanent error.
    pub fn with_permanent_failure(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            fail_permanently: true,
            ..Self::default()
        }
    }

    /// Ids of the tasks passed to `generate`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LetterGenerator for MockGenerator {
    async fn generate(&self, task: &VacancyTask) -> Result<Option<String>> {
        self.calls.lock().unwrap().push(task.hh_id.clone());
        if let Some(message) = &self.fail_with {
            return Err(if self.fail_permanently {
                Error::Permanent(message.clone())
            } else {
                Error::Generation(message.clone())
            });
        }
        Ok(self.response.clone())
    }
}

/// Scripted [`SubmissionClient`]: pops one outcome per call, succeeding once
/// the script runs dry, and records every submission attempt.
#[derive(Default)]
pub struct MockSubmission {
    script: Mutex<VecDeque<std::result::Result<(), SubmitError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockSubmission {
    /// Submission client that accepts everything.
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Queue an outcome for the next unscripted call.
    pub fn push_outcome(self, outcome: std::result::Result<(), SubmitError>) -> Self {
        self.script.lock().unwrap().push_back(outcome);
        self
    }

    /// `(vacancy_id, cover_letter)` pairs passed to `submit`, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionClient for MockSubmission {
    async fn submit(
        &self,
        vacancy_id: &str,
        cover_letter: &str,
    ) -> std::result::Result<(), SubmitError> {
        self.calls
            .lock()
            .unwrap()
            .push((vacancy_id.to_string(), cover_letter.to_string()));
        self.script.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}
