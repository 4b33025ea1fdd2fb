//! HeadHunter search client.
//!
//! Fetches a page of matching vacancies, then hydrates each with its full
//! description under bounded concurrency. A detail fetch that fails falls
//! back to the snippet from the list response rather than dropping the
//! vacancy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Semaphore;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use jobpilot_core::{
    defaults, Error, NewVacancy, Result, SearchClient, SearchCriteria, Settings,
};

/// HeadHunter vacancies API client.
pub struct HhClient {
    client: Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
    request_delay: Duration,
}

impl HhClient {
    /// Create a client for the given vacancies endpoint.
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(defaults::HTTP_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            semaphore: Arc::new(Semaphore::new(defaults::MAX_CONCURRENT_REQUESTS)),
            request_delay: Duration::from_millis(defaults::REQUEST_DELAY_MS),
        }
    }

    /// Create a client from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.hh_api_url.clone())
    }

    async fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        // Pace outgoing requests: bounded concurrency plus a fixed delay.
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;
        sleep(self.request_delay).await;

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Request(format!("HTTP {status} for {url}")));
        }
        Ok(response.json().await?)
    }

    /// Fetch one page of the vacancy list.
    async fn search_page(&self, criteria: &SearchCriteria) -> Result<Value> {
        let mut query: Vec<(String, String)> = vec![
            ("text".to_string(), criteria.text.clone()),
            ("per_page".to_string(), criteria.per_page.to_string()),
            ("page".to_string(), criteria.page.to_string()),
            ("order_by".to_string(), "publication_time".to_string()),
        ];
        for area in &criteria.areas {
            query.push(("area".to_string(), area.to_string()));
        }

        let page = self.get_json(&self.base_url, &query).await?;
        info!(
            subsystem = "clients",
            component = "hh",
            op = "search",
            found = page.get("found").and_then(serde_json::Value::as_u64).unwrap_or(0),
            items = page
                .get("items")
                .and_then(serde_json::Value::as_array)
                .map(Vec::len)
                .unwrap_or(0),
            "Search page fetched"
        );
        Ok(page)
    }

    /// Fetch full details for one vacancy id.
    async fn vacancy_details(&self, id: &str) -> Result<Value> {
        self.get_json(&format!("{}/{id}", self.base_url), &[]).await
    }

    /// Hydrate every list item with its detail record; fall back to the
    /// snippet on a failed detail fetch.
    async fn hydrate(&self, items: &[Value]) -> Vec<NewVacancy> {
        let fetches = items.iter().map(|item| async move {
            let id = item_id(item)?;
            match self.vacancy_details(&id).await {
                Ok(details) => parse_vacancy(&details),
                Err(e) => {
                    warn!(
                        subsystem = "clients",
                        component = "hh",
                        hh_id = %id,
                        error = %e,
                        "Detail fetch failed, using list snippet"
                    );
                    parse_vacancy(item)
                }
            }
        });

        futures::future::join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect()
    }
}

#[async_trait]
impl SearchClient for HhClient {
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<NewVacancy>> {
        let page = self.search_page(criteria).await?;
        let items = page
            .get("items")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        if items.is_empty() {
            debug!(
                subsystem = "clients",
                component = "hh",
                "No vacancies matched the search criteria"
            );
            return Ok(Vec::new());
        }

        Ok(self.hydrate(&items).await)
    }
}

fn item_id(raw: &Value) -> Option<String> {
    match raw.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a raw vacancy record (detail or list snippet) into the unified
/// model. Returns `None` when the record has no id.
pub fn parse_vacancy(raw: &Value) -> Option<NewVacancy> {
    let hh_id = item_id(raw)?;

    let salary = raw.get("salary").filter(|s| !s.is_null());
    let salary_from = salary.and_then(|s| s.get("from")).and_then(Value::as_f64);
    let salary_to = salary.and_then(|s| s.get("to")).and_then(Value::as_f64);
    let salary_currency = salary
        .and_then(|s| s.get("currency"))
        .and_then(Value::as_str)
        .map(String::from);

    let mut description = raw
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    if description.is_empty() {
        if let Some(snippet) = raw.get("snippet") {
            let requirement = snippet
                .get("requirement")
                .and_then(Value::as_str)
                .unwrap_or("");
            let responsibility = snippet
                .get("responsibility")
                .and_then(Value::as_str)
                .unwrap_or("");
            description = format!("Требования: {requirement}\nОбязанности: {responsibility}");
        }
    }

    let skills = raw
        .get("key_skills")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|s| s.get("name").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    let nested_name = |field: &str| {
        raw.get(field)
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };

    Some(NewVacancy {
        url: format!("https://hh.ru/vacancy/{hh_id}"),
        hh_id,
        name: raw
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        company: raw
            .get("employer")
            .and_then(|e| e.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        salary_from,
        salary_to,
        salary_currency,
        experience: nested_name("experience"),
        employment: nested_name("employment"),
        description,
        skills,
    })
}
