use async_trait::async_trait;
use dnsfilter_application::ports::EventRecorder;
use dnsfilter_domain::QueryEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Single consumer of the statistics queue. Events reach the recorder one at
/// a time, in the order they were emitted.
pub struct QueryEventLogger {
    recorder: Arc<dyn EventRecorder>,
}

impl QueryEventLogger {
    pub fn new(recorder: Arc<dyn EventRecorder>) -> Self {
        Self { recorder }
    }

    pub fn start(self, mut rx: mpsc::Receiver<QueryEvent>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            debug!("QueryEventLogger: Starting sequential consumer");

            let mut count = 0u64;
            while let Some(event) = rx.recv().await {
                count += 1;
                self.recorder.record(event).await;
            }

            debug!(count, "QueryEventLogger: Consumer shutting down");
        })
    }
}

/// Writes one structured log line per delivered record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventRecorder;

#[async_trait]
impl EventRecorder for TracingEventRecorder {
    async fn record(&self, event: QueryEvent) {
        let address = event
            .resolved_address
            .map(|addr| addr.to_string())
            .unwrap_or_else(|| "-".to_string());

        info!(
            target: "dnsfilter::statistics",
            client = %event.client,
            domain = %event.requested_name,
            record_type = %event.record_type,
            address = %address,
            timestamp = %event.timestamp.to_rfc3339(),
            "Answer delivered"
        );
    }
}
