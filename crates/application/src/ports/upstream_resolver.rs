use async_trait::async_trait;
use dnsfilter_domain::{DnsHeader, DnsQuestion, DomainError, ResourceRecord};

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Forwards `questions` under the client's header (same ID, same flags)
    /// and returns the upstream answer section verbatim.
    ///
    /// Fails with `UpstreamTimeout` when no reply arrives before the deadline
    /// and `UpstreamNetwork` for socket errors or unusable replies.
    async fn resolve(
        &self,
        questions: &[DnsQuestion],
        header: &DnsHeader,
    ) -> Result<Vec<ResourceRecord>, DomainError>;
}
