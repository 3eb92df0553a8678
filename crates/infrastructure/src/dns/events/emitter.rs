use async_trait::async_trait;
use dnsfilter_application::ports::StatisticsSink;
use dnsfilter_domain::QueryEvent;
use tokio::sync::mpsc;
use tracing::warn;

/// Producer side of the statistics queue.
///
/// The queue is bounded: once `capacity` events are waiting, `emit` suspends
/// until the consumer catches up. Events are never dropped while the
/// consumer is alive.
#[derive(Clone)]
pub struct QueryEventEmitter {
    sender: Option<mpsc::Sender<QueryEvent>>,
}

impl QueryEventEmitter {
    pub fn new_disabled() -> Self {
        Self { sender: None }
    }

    pub fn new_enabled(capacity: usize) -> (Self, mpsc::Receiver<QueryEvent>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let emitter = Self { sender: Some(tx) };
        (emitter, rx)
    }

    pub fn is_enabled(&self) -> bool {
        self.sender.is_some()
    }
}

#[async_trait]
impl StatisticsSink for QueryEventEmitter {
    async fn emit(&self, event: QueryEvent) {
        if let Some(ref tx) = self.sender {
            if let Err(e) = tx.send(event).await {
                warn!(
                    domain = %e.0.requested_name,
                    "Statistics consumer has stopped, event discarded"
                );
            }
        }
    }
}

impl Default for QueryEventEmitter {
    fn default() -> Self {
        Self::new_disabled()
    }
}

impl std::fmt::Debug for QueryEventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEventEmitter")
            .field("enabled", &self.is_enabled())
            .finish()
    }
}
