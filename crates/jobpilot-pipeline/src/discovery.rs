//! Discovery stage: search, dedup, enqueue.
//!
//! One batch fetches candidates from the search source, inserts the unseen
//! ones into the store, and publishes a `VacancyTask` for each new row.
//! Duplicates are counted and skipped without touching the queue, so
//! re-running discovery over an overlapping window is idempotent.

use std::sync::Arc;

use tracing::{error, info, warn};

use jobpilot_broker::TaskPublisher;
use jobpilot_core::{Result, SearchClient, SearchCriteria, SearchStats, VacancyRepository};

/// The discovery stage over pluggable collaborators.
pub struct DiscoveryService {
    search: Arc<dyn SearchClient>,
    repo: Arc<dyn VacancyRepository>,
    publisher: Box<dyn TaskPublisher>,
    criteria: SearchCriteria,
}

impl DiscoveryService {
    pub fn new(
        search: Arc<dyn SearchClient>,
        repo: Arc<dyn VacancyRepository>,
        publisher: Box<dyn TaskPublisher>,
        criteria: SearchCriteria,
    ) -> Self {
        Self {
            search,
            repo,
            publisher,
            criteria,
        }
    }

    /// Run one discovery batch.
    ///
    /// A search-source failure aborts the whole batch; store and publish
    /// failures are per-item, counted in `errors`, and do not stop the rest
    /// of the batch.
    pub async fn run_once(&mut self) -> Result<SearchStats> {
        let found = self.search.search(&self.criteria).await?;

        let mut stats = SearchStats {
            total_found: found.len(),
            ..SearchStats::default()
        };

        for vacancy in found {
            let hh_id = vacancy.hh_id.clone();
            let task = vacancy.to_task();

            match self.repo.upsert_if_new(vacancy).await {
                Ok(Some(_)) => {
                    stats.new_saved += 1;
                    match self.publisher.publish_vacancy(&task).await {
                        Ok(()) => stats.sent_to_queue += 1,
                        Err(e) => {
                            // The row is saved; only the queue hop failed.
                            stats.errors += 1;
                            warn!(
                                subsystem = "pipeline",
                                component = "discovery",
                                hh_id = %hh_id,
                                error = %e,
                                "Failed to enqueue new vacancy"
                            );
                        }
                    }
                }
                Ok(None) => stats.duplicates += 1,
                Err(e) => {
                    stats.errors += 1;
                    error!(
                        subsystem = "pipeline",
                        component = "discovery",
                        hh_id = %hh_id,
                        error = %e,
                        "Failed to save vacancy"
                    );
                }
            }
        }

        info!(
            subsystem = "pipeline",
            component = "discovery",
            total_found = stats.total_found,
            new_saved = stats.new_saved,
            duplicates = stats.duplicates,
            sent_to_queue = stats.sent_to_queue,
            errors = stats.errors,
            "Discovery batch finished"
        );
        Ok(stats)
    }
}
