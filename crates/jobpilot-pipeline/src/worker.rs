//! Consumer loops and worker lifecycle.
//!
//! Each worker runs in its own spawned task with an mpsc shutdown channel.
//! The loop consumes one delivery at a time (the channel has prefetch 1),
//! maps the handler's [`Outcome`] to an ack or a requeueing nack, and
//! reconnects when the consumer stream ends. A shutdown that lands while a
//! message is being handled abandons the delivery unacknowledged; the broker
//! redelivers it on the next start.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use lapin::options::{BasicAckOptions, BasicNackOptions};
use tokio::sync::mpsc;
use tokio::time::sleep;
use tracing::{error, info, warn};

use jobpilot_broker::BrokerConnection;
use jobpilot_core::{defaults, Error, Result};

use crate::{DiscoveryService, Outcome, ProcessWorker, SubmitWorker};

const RECONNECT_DELAY: Duration = Duration::from_secs(5);
const REQUEUE_PACING: Duration = Duration::from_millis(500);

/// How long to pause before the next fetch after settling a delivery.
///
/// With prefetch 1 a requeueing nack hands the same message straight back,
/// so fetching immediately turns a persistent failure (store down, deferred
/// policy) into a tight redeliver loop.
fn requeue_pacing(outcome: Outcome) -> Option<Duration> {
    match outcome {
        Outcome::Ack => None,
        Outcome::Requeue => Some(REQUEUE_PACING),
    }
}

/// Handle for controlling a running worker.
pub struct WorkerHandle {
    shutdown_tx: mpsc::Sender<()>,
    join: tokio::task::JoinHandle<()>,
}

impl WorkerHandle {
    /// Signal the worker to shut down and wait for it to finish.
    pub async fn shutdown(self) -> Result<()> {
        let _ = self.shutdown_tx.send(()).await;
        self.join
            .await
            .map_err(|e| Error::Internal(format!("worker task panicked: {e}")))
    }
}

/// Per-message handler driven by a consumer loop.
#[async_trait]
pub trait MessageHandler: Send {
    async fn handle(&mut self, payload: &[u8]) -> Outcome;
}

#[async_trait]
impl MessageHandler for ProcessWorker {
    async fn handle(&mut self, payload: &[u8]) -> Outcome {
        ProcessWorker::handle(self, payload).await
    }
}

#[async_trait]
impl MessageHandler for SubmitWorker {
    async fn handle(&mut self, payload: &[u8]) -> Outcome {
        SubmitWorker::handle(self, payload).await
    }
}

/// Start the filter/generate worker on `vacancies_to_process`.
pub fn run_process_worker(broker: BrokerConnection, worker: ProcessWorker) -> WorkerHandle {
    spawn_consumer(broker, defaults::QUEUE_VACANCIES, "process-worker", worker)
}

/// Start the submit worker on `cover_letters_to_send`.
pub fn run_submit_worker(broker: BrokerConnection, worker: SubmitWorker) -> WorkerHandle {
    spawn_consumer(
        broker,
        defaults::QUEUE_COVER_LETTERS,
        "submit-worker",
        worker,
    )
}

/// Start the periodic discovery loop.
pub fn run_discovery(mut service: DiscoveryService, interval: Duration) -> WorkerHandle {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

    let join = tokio::spawn(async move {
        info!(
            subsystem = "pipeline",
            component = "discovery",
            interval_secs = interval.as_secs(),
            "Discovery loop started"
        );
        loop {
            if let Err(e) = service.run_once().await {
                error!(
                    subsystem = "pipeline",
                    component = "discovery",
                    error = %e,
                    "Discovery batch failed"
                );
            }
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                _ = sleep(interval) => {}
            }
        }
        info!(
            subsystem = "pipeline",
            component = "discovery",
            "Discovery loop stopped"
        );
    });

    WorkerHandle { shutdown_tx, join }
}

fn spawn_consumer<H: MessageHandler + 'static>(
    mut broker: BrokerConnection,
    queue: &'static str,
    consumer_tag: &'static str,
    mut handler: H,
) -> WorkerHandle {
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel(1);

    let join = tokio::spawn(async move {
        info!(
            subsystem = "pipeline",
            component = "worker",
            queue,
            consumer_tag,
            "Worker started"
        );

        'reconnect: loop {
            let mut consumer = match broker.consume(queue, consumer_tag).await {
                Ok(consumer) => consumer,
                Err(e) => {
                    error!(
                        subsystem = "pipeline",
                        component = "worker",
                        queue,
                        error = %e,
                        "Failed to start consumer, retrying"
                    );
                    tokio::select! {
                        _ = shutdown_rx.recv() => break 'reconnect,
                        _ = sleep(RECONNECT_DELAY) => continue 'reconnect,
                    }
                }
            };

            loop {
                let delivery = tokio::select! {
                    _ = shutdown_rx.recv() => break 'reconnect,
                    delivery = consumer.next() => delivery,
                };

                let delivery = match delivery {
                    Some(Ok(delivery)) => delivery,
                    Some(Err(e)) => {
                        warn!(
                            subsystem = "pipeline",
                            component = "worker",
                            queue,
                            error = %e,
                            "Consumer stream error, reconnecting"
                        );
                        continue 'reconnect;
                    }
                    None => {
                        warn!(
                            subsystem = "pipeline",
                            component = "worker",
                            queue,
                            "Consumer stream ended, reconnecting"
                        );
                        continue 'reconnect;
                    }
                };

                // Racing the handler against shutdown leaves the delivery
                // unacknowledged; the broker redelivers it next start.
                let outcome = tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!(
                            subsystem = "pipeline",
                            component = "worker",
                            queue,
                            "Shutdown during handling, abandoning delivery"
                        );
                        break 'reconnect;
                    }
                    outcome = handler.handle(&delivery.data) => outcome,
                };

                let settled = match outcome {
                    Outcome::Ack => delivery.ack(BasicAckOptions::default()).await,
                    Outcome::Requeue => {
                        delivery
                            .nack(BasicNackOptions {
                                requeue: true,
                                ..BasicNackOptions::default()
                            })
                            .await
                    }
                };
                if let Err(e) = settled {
                    warn!(
                        subsystem = "pipeline",
                        component = "worker",
                        queue,
                        error = %e,
                        "Failed to settle delivery, reconnecting"
                    );
                    continue 'reconnect;
                }

                if let Some(pause) = requeue_pacing(outcome) {
                    tokio::select! {
                        _ = shutdown_rx.recv() => break 'reconnect,
                        _ = sleep(pause) => {}
                    }
                }
            }
        }

        info!(
            subsystem = "pipeline",
            component = "worker",
            queue,
            "Worker stopped"
        );
    });

    WorkerHandle { shutdown_tx, join }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support::{new_vacancy, MemoryRepository, RecordingPublisher};
    use jobpilot_core::{NewVacancy, SearchClient, SearchCriteria};
    use std::sync::Arc;

    struct OneResult;

    #[async_trait]
    impl SearchClient for OneResult {
        async fn search(&self, _criteria: &SearchCriteria) -> Result<Vec<NewVacancy>> {
            Ok(vec![new_vacancy("1", "Python Developer")])
        }
    }

    #[test]
    fn test_requeue_pacing_only_after_requeue() {
        assert_eq!(requeue_pacing(Outcome::Ack), None);
        assert_eq!(requeue_pacing(Outcome::Requeue), Some(REQUEUE_PACING));
    }

    #[tokio::test]
    async fn test_discovery_loop_runs_and_stops_on_shutdown() {
        let repo = Arc::new(MemoryRepository::new());
        let publisher = RecordingPublisher::new();
        let service = DiscoveryService::new(
            Arc::new(OneResult),
            repo.clone(),
            Box::new(publisher.clone()),
            SearchCriteria::default(),
        );

        let handle = run_discovery(service, Duration::from_secs(3600));
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.shutdown().await.unwrap();

        assert!(repo.get("1").is_some());
        assert_eq!(publisher.vacancies().len(), 1);
    }
}
