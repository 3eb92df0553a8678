use async_trait::async_trait;
use dnsfilter_domain::QueryEvent;

/// Final destination of statistics events, called by the single consumer in
/// arrival order.
#[async_trait]
pub trait EventRecorder: Send + Sync {
    async fn record(&self, event: QueryEvent);
}
