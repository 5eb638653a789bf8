// File: src/refresh.rs
// Dispatches sequence-tagged fetches and drives the periodic timer
use crate::client::{FeedError, FeedSource};
use crate::feed::Snapshot;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug)]
pub enum RefreshEvent {
    Started(u64),
    Finished(u64, Result<Snapshot, FeedError>),
}

/// Hands out sequence numbers and runs each fetch on its own task.
/// Overlapping fetches are allowed; the receiver orders them by sequence.
pub struct Refresher {
    source: Arc<dyn FeedSource>,
    seq: Arc<AtomicU64>,
    tx: UnboundedSender<RefreshEvent>,
}

impl Clone for Refresher {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            seq: Arc::clone(&self.seq),
            tx: self.tx.clone(),
        }
    }
}

impl Refresher {
    pub fn new(source: Arc<dyn FeedSource>, tx: UnboundedSender<RefreshEvent>) -> Self {
        Self {
            source,
            seq: Arc::new(AtomicU64::new(0)),
            tx,
        }
    }

    /// Starts one fetch and returns its sequence number.
    pub fn trigger(&self) -> u64 {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        // Receiver gone means the view is shutting down; nothing to do
        let _ = self.tx.send(RefreshEvent::Started(seq));

        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = source.fetch().await;
            let _ = tx.send(RefreshEvent::Finished(seq, result));
        });
        seq
    }

    /// Fetches immediately, then once per `period`, until the handle is dropped.
    pub fn spawn_periodic(&self, period: Duration) -> RefreshHandle {
        let this = self.clone();
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if this.tx.is_closed() {
                    break;
                }
                let seq = this.trigger();
                log::debug!("Scheduled refresh #{}", seq);
            }
        });
        log::info!("Auto-refresh every {}s", period.as_secs());
        RefreshHandle { task }
    }
}

/// Cancels the periodic timer when dropped. In-flight fetches keep running.
pub struct RefreshHandle {
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
