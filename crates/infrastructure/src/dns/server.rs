use crate::dns::codec::{decode_message, encode_message};
use dnsfilter_application::use_cases::HandleDnsQueryUseCase;
use dnsfilter_domain::{DnsMessage, DomainError};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, warn};

/// An encoded reply together with the message it was built from.
#[derive(Debug, Clone)]
pub struct PreparedReply {
    pub bytes: Vec<u8>,
    pub response: DnsMessage,
}

/// Runs one datagram through decode, filtering, resolution and encode.
/// Every failure is contained here: the request is logged and dropped.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Returns `None` when no reply must be sent.
    pub async fn handle_raw_udp(&self, query_buf: &[u8], client: SocketAddr) -> Option<PreparedReply> {
        let request = match decode_message(query_buf) {
            Ok(request) => request,
            Err(e) => {
                warn!(client = %client, error = %e, "Dropping malformed request");
                return None;
            }
        };

        let response = match self.use_case.execute(&request).await {
            Ok(response) => response,
            Err(DomainError::EmptyQuery) => {
                warn!(client = %client, id = request.header.id, "Dropping request without questions");
                return None;
            }
            Err(e) => {
                warn!(
                    client = %client,
                    id = request.header.id,
                    error = %e,
                    "Dropping request, resolution failed"
                );
                return None;
            }
        };

        match encode_message(&response) {
            Ok(bytes) => {
                debug!(
                    client = %client,
                    id = response.header.id,
                    answers = response.answers.len(),
                    "Sending response"
                );
                Some(PreparedReply { bytes, response })
            }
            Err(e) => {
                warn!(client = %client, id = response.header.id, error = %e, "Dropping unencodable response");
                None
            }
        }
    }

    /// Statistics for a reply that reached the socket.
    pub async fn record_delivery(&self, client: SocketAddr, reply: &PreparedReply) {
        self.use_case
            .record_delivery(client.ip(), &reply.response)
            .await;
    }
}
