use async_trait::async_trait;
use dnsfilter_domain::QueryEvent;

#[async_trait]
pub trait StatisticsSink: Send + Sync {
    /// Queues one event. Waits while the consumer is behind.
    async fn emit(&self, event: QueryEvent);
}
