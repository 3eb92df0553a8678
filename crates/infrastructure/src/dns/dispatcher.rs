use crate::dns::codec::MAX_UDP_MESSAGE_SIZE;
use crate::dns::server::DnsServerHandler;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Receive loop for the listening socket.
///
/// The loop only reads datagrams; each one is handled by its own task, so a
/// slow upstream never delays the next receive.
pub struct UdpDispatcher {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
    limiter: Option<Arc<Semaphore>>,
}

impl UdpDispatcher {
    pub fn new(socket: Arc<UdpSocket>, handler: Arc<DnsServerHandler>) -> Self {
        Self {
            socket,
            handler,
            limiter: None,
        }
    }

    /// Drops datagrams that arrive while `max` requests are in flight.
    /// Zero means unbounded.
    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.limiter = (max > 0).then(|| Arc::new(Semaphore::new(max)));
        self
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Runs until `shutdown` fires (`Ok`) or the listening socket fails (`Err`).
    pub async fn run(self, shutdown: CancellationToken) -> io::Result<()> {
        let mut recv_buf = [0u8; MAX_UDP_MESSAGE_SIZE];

        info!(
            bind_address = %self.local_addr()?,
            max_concurrent = self.limiter.as_ref().map(|s| s.available_permits()),
            "DNS dispatcher ready"
        );

        loop {
            let (len, from) = tokio::select! {
                _ = shutdown.cancelled() => {
                    info!("DNS dispatcher shutting down");
                    return Ok(());
                }
                result = self.socket.recv_from(&mut recv_buf) => match result {
                    Ok(received) => received,
                    Err(e) if is_transient(&e) => {
                        debug!(error = %e, "Transient UDP receive error");
                        continue;
                    }
                    Err(e) => {
                        error!(error = %e, "UDP listener failed");
                        return Err(e);
                    }
                },
            };

            let permit = match &self.limiter {
                Some(limiter) => match Arc::clone(limiter).try_acquire_owned() {
                    Ok(permit) => Some(permit),
                    Err(_) => {
                        warn!(client = %from, "Too many requests in flight, dropping datagram");
                        continue;
                    }
                },
                None => None,
            };

            let query = recv_buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let handler = Arc::clone(&self.handler);

            tokio::spawn(async move {
                let _permit = permit;
                let Some(reply) = handler.handle_raw_udp(&query, from).await else {
                    return;
                };
                match socket.send_to(&reply.bytes, from).await {
                    Ok(_) => handler.record_delivery(from, &reply).await,
                    Err(e) => warn!(client = %from, error = %e, "Failed to send response"),
                }
            });
        }
    }
}

fn is_transient(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::Interrupted | io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionRefused
    )
}
