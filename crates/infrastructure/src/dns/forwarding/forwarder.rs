use crate::dns::codec::{decode_message, encode_message};
use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use dnsfilter_application::ports::UpstreamResolver;
use dnsfilter_domain::{DnsHeader, DnsMessage, DnsQuestion, DomainError, ResourceRecord};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Forwards allowed questions to the single configured upstream resolver.
pub struct UpstreamForwarder {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl UpstreamForwarder {
    pub fn new(transport: Arc<dyn DnsTransport>) -> Self {
        Self {
            transport,
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn network_error(&self, reason: String) -> DomainError {
        DomainError::UpstreamNetwork {
            server: self.transport.server_addr().to_string(),
            reason,
        }
    }
}

#[async_trait]
impl UpstreamResolver for UpstreamForwarder {
    async fn resolve(
        &self,
        questions: &[DnsQuestion],
        header: &DnsHeader,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        let query = DnsMessage {
            header: *header,
            questions: questions.to_vec(),
            answers: Vec::new(),
        };
        let query_bytes = encode_message(&query)?;

        let reply_bytes = self.transport.send(&query_bytes, self.timeout).await?;

        let reply = decode_message(&reply_bytes)
            .map_err(|e| self.network_error(format!("undecodable reply: {}", e)))?;

        if reply.header.id != header.id {
            return Err(self.network_error(format!(
                "reply ID {} does not match query ID {}",
                reply.header.id, header.id
            )));
        }

        debug!(
            id = header.id,
            server = %self.transport.server_addr(),
            protocol = self.transport.protocol_name(),
            questions = questions.len(),
            answers = reply.answers.len(),
            "Upstream answered"
        );

        Ok(reply.answers)
    }
}
