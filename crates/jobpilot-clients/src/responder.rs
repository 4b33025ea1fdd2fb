//! Application submission against the HeadHunter negotiations API.
//!
//! The interesting part is failure classification: the submit worker treats
//! transient and permanent failures very differently (pending-retry versus
//! logged-and-dropped), so every response path here must land in exactly one
//! of those buckets.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{info, warn};

use jobpilot_core::{defaults, Settings, SubmissionClient, SubmitError};

const USER_AGENT: &str = "jobpilot/0.3 (job application bot)";

/// Submits applications on behalf of one authenticated user.
pub struct HhResponder {
    client: Client,
    base_url: String,
    access_token: String,
    resume_id: String,
}

impl HhResponder {
    pub fn new(base_url: String, access_token: String, resume_id: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            access_token,
            resume_id,
        }
    }

    /// Create a responder from settings. The negotiations endpoint lives
    /// next to the vacancies endpoint on the same API host.
    pub fn from_settings(settings: &Settings) -> Self {
        let base_url = settings
            .hh_api_url
            .trim_end_matches("/vacancies")
            .to_string();
        Self::new(
            base_url,
            settings.hh_access_token.clone(),
            settings.hh_resume_id.clone(),
        )
    }
}

#[async_trait]
impl SubmissionClient for HhResponder {
    async fn submit(
        &self,
        vacancy_id: &str,
        cover_letter: &str,
    ) -> std::result::Result<(), SubmitError> {
        if self.access_token.is_empty() {
            return Err(SubmitError::Permanent(
                "no access token configured".to_string(),
            ));
        }
        if self.resume_id.is_empty() {
            return Err(SubmitError::Permanent("no resume id configured".to_string()));
        }

        let url = format!("{}/negotiations", self.base_url);
        let form = [
            ("vacancy_id", vacancy_id),
            ("resume_id", self.resume_id.as_str()),
            ("message", cover_letter),
        ];

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .form(&form)
            .send()
            .await
            .map_err(classify_send_error)?;

        let status = response.status();
        match classify_status(status) {
            Classification::Success => {
                info!(
                    subsystem = "clients",
                    component = "responder",
                    hh_id = %vacancy_id,
                    "Application submitted"
                );
                Ok(())
            }
            Classification::Transient => {
                warn!(
                    subsystem = "clients",
                    component = "responder",
                    hh_id = %vacancy_id,
                    status = status.as_u16(),
                    "Transient submission failure"
                );
                Err(SubmitError::Transient(format!("HTTP {status}")))
            }
            Classification::Permanent => {
                let body = response.text().await.unwrap_or_default();
                warn!(
                    subsystem = "clients",
                    component = "responder",
                    hh_id = %vacancy_id,
                    status = status.as_u16(),
                    body = %body,
                    "Permanent submission failure"
                );
                Err(SubmitError::Permanent(format!("HTTP {status}: {body}")))
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Classification {
    Success,
    Transient,
    Permanent,
}

/// Transport-level failures never prove the application was rejected, so
/// they are always retryable.
fn classify_send_error(e: reqwest::Error) -> SubmitError {
    SubmitError::Transient(e.to_string())
}

/// Map a response status to a submission outcome.
///
/// 201 is the documented success. 429 means the upstream quota is exhausted
/// and 5xx means the service is unhealthy, both worth retrying. Any other
/// 4xx (403 archived posting, 400 bad request) will fail the same way on
/// every retry.
fn classify_status(status: StatusCode) -> Classification {
    if status.is_success() {
        Classification::Success
    } else if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        Classification::Transient
    } else {
        Classification::Permanent
    }
}
