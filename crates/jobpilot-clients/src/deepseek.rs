//! LLM-backed cover letter generation via the DeepSeek chat API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use jobpilot_core::{defaults, Error, LetterGenerator, Result, Settings, VacancyTask};

const MODEL: &str = "deepseek-chat";
const MAX_TOKENS: u32 = 700;
const TEMPERATURE: f64 = 0.7;

/// Letter generator backed by the DeepSeek chat-completions endpoint.
pub struct DeepSeekBackend {
    client: Client,
    api_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

impl DeepSeekBackend {
    pub fn new(api_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::GEN_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url,
            api_key,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            settings.deepseek_api_url.clone(),
            settings.deepseek_api_key.clone(),
        )
    }

    fn build_prompt(task: &VacancyTask) -> String {
        format!(
            "Напиши короткое сопроводительное письмо (до 150 слов) на вакансию.\n\
             Вакансия: {}\n\
             Компания: {}\n\
             Требования: {}\n\
             Ключевые навыки: {}\n\
             Пиши от первого лица, по-деловому, без воды.",
            task.name, task.company, task.description, task.skills
        )
    }
}

#[async_trait]
impl LetterGenerator for DeepSeekBackend {
    async fn generate(&self, task: &VacancyTask) -> Result<Option<String>> {
        if self.api_key.is_empty() {
            return Err(Error::Config("DEEPSEEK_API_KEY is not set".to_string()));
        }

        let request = ChatRequest {
            model: MODEL.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Self::build_prompt(task),
            }],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(
            subsystem = "clients",
            component = "deepseek",
            hh_id = %task.hh_id,
            "Requesting letter generation"
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_generation_failure(status));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Generation(e.to_string()))?;

        let letter = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        if letter.is_empty() {
            // An empty completion is a veto, not a failure.
            return Ok(None);
        }

        info!(
            subsystem = "clients",
            component = "deepseek",
            hh_id = %task.hh_id,
            chars = letter.len(),
            "Letter generated"
        );
        Ok(Some(letter))
    }
}

/// Map a failed chat-completions status to the error taxonomy.
///
/// 4xx means the request itself is rejected (expired key, malformed
/// payload) and will fail identically on every retry; 5xx is the service
/// misbehaving and worth retrying later.
fn classify_generation_failure(status: StatusCode) -> Error {
    if status.is_client_error() {
        Error::Permanent(format!("HTTP {status}"))
    } else {
        Error::Transient(format!("HTTP {status}"))
    }
}
