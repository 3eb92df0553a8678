pub mod udp;

use async_trait::async_trait;
use dnsfilter_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

pub use udp::UdpTransport;

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// One request, one reply, bounded by `timeout`.
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, DomainError>;

    fn server_addr(&self) -> SocketAddr;

    fn protocol_name(&self) -> &'static str;
}
