//! Purchase discovery polling
//!
//! An explicit loop over the discovery feed: each cycle scans a fixed
//! ordered list of statuses, pushes never-before-seen transactions into a
//! channel sink, and sleeps. Cancellation is cooperative - the stop flag is
//! checked only at the top of each cycle, so stop latency is bounded by the
//! poll interval plus any in-flight scan, never instantaneous.
//!
//! Deduplication is a membership set of seen transaction ids that lives as
//! long as the poller and is never evicted. A fresh poller starts with a
//! fresh set.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use agora_types::{Transaction, TransactionQuery, TransactionRole, TransactionStatus};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::feed::PurchaseFeed;

/// Polling parameters
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay between scan cycles
    pub interval: Duration,
    /// Statuses scanned each cycle, in this order
    pub statuses: Vec<TransactionStatus>,
    /// Page size per scan
    pub limit: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            statuses: vec![TransactionStatus::Escrowed, TransactionStatus::Pending],
            limit: 50,
        }
    }
}

/// Polls the discovery feed for purchases assigned to a seller
pub struct PurchasePoller<F: PurchaseFeed + 'static> {
    feed: Arc<F>,
    config: PollConfig,
}

/// Controls a spawned poller
pub struct PollHandle {
    running: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    /// Request a stop. Takes effect at the top of the next cycle; the
    /// in-flight scan and the inter-cycle delay are not interrupted.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// True until `stop` has been requested
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Wait for the loop to exit
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

impl<F: PurchaseFeed + 'static> PurchasePoller<F> {
    /// Create a poller over a feed
    pub fn new(feed: Arc<F>, config: PollConfig) -> Self {
        Self { feed, config }
    }

    /// Spawn the polling loop, yielding each new transaction into `sink`
    ///
    /// The loop exits when `stop` is requested or the receiving side of
    /// `sink` is dropped. Scan failures for one status are logged and do
    /// not abort the cycle for the remaining statuses.
    pub fn spawn(self, sink: mpsc::Sender<Transaction>) -> PollHandle {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();
        let PurchasePoller { feed, config } = self;

        let task = tokio::spawn(async move {
            let mut seen: HashSet<String> = HashSet::new();

            while flag.load(Ordering::Relaxed) {
                for status in &config.statuses {
                    let query = TransactionQuery {
                        role: TransactionRole::Seller,
                        status: *status,
                        limit: config.limit,
                    };
                    match feed.list(query).await {
                        Ok(page) => {
                            for tx in page.transactions {
                                if seen.insert(tx.id.clone()) {
                                    debug!(transaction_id = %tx.id, status = %status, "new purchase");
                                    if sink.send(tx).await.is_err() {
                                        // Receiver gone - nobody is listening
                                        return;
                                    }
                                }
                            }
                        }
                        Err(err) => {
                            warn!(status = %status, error = %err, "purchase scan failed");
                        }
                    }
                }

                tokio::time::sleep(config.interval).await;
            }
        });

        PollHandle { running, task }
    }
}
