use async_trait::async_trait;
use dnsfilter_domain::{DomainError, DomainList};

#[async_trait]
pub trait DomainListLoader: Send + Sync {
    /// Merges every source into one deduplicated list. A single failing
    /// source fails the whole load.
    async fn load(&self, sources: &[String]) -> Result<DomainList, DomainError>;
}
