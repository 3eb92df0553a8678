use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Reply with the configured A record for the first question, if any.
    Answer,
    /// Never reply.
    Silent,
    /// Reply with the query ID plus one.
    WrongId,
    /// Reply with bytes that are not a DNS message.
    Garbage,
}

/// In-process upstream resolver bound to an ephemeral loopback port.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

pub struct MockDnsServerBuilder {
    behavior: MockBehavior,
    answers: HashMap<String, Vec<Ipv4Addr>>,
    delays: HashMap<String, Duration>,
}

impl MockDnsServerBuilder {
    pub fn answer(mut self, name: &str, addr: Ipv4Addr) -> Self {
        self.answers.entry(name.to_string()).or_default().push(addr);
        self
    }

    /// Answers `name` with `count` A records, addresses 10.0.0.1 upward.
    pub fn answers(mut self, name: &str, count: u8) -> Self {
        let records = self.answers.entry(name.to_string()).or_default();
        records.extend((1..=count).map(|i| Ipv4Addr::new(10, 0, 0, i)));
        self
    }

    pub fn delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    pub async fn start(self) -> Result<MockDnsServer, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await?);
        let addr = socket.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let behavior = self.behavior;
        let answers = Arc::new(self.answers);
        let delays = Arc::new(self.delays);
        let log = received.clone();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        let Ok((len, peer)) = result else { continue };
                        let query = buf[..len].to_vec();
                        log.lock().unwrap().push(query.clone());

                        if behavior == MockBehavior::Silent {
                            continue;
                        }

                        let socket = socket.clone();
                        let answers = answers.clone();
                        let delays = delays.clone();
                        tokio::spawn(async move {
                            let name = first_question_name(&query);
                            if let Some(delay) = name.as_deref().and_then(|n| delays.get(n)) {
                                tokio::time::sleep(*delay).await;
                            }
                            let response = build_mock_response(&query, behavior, &answers);
                            let _ = socket.send_to(&response, peer).await;
                        });
                    }
                }
            }
        });

        Ok(MockDnsServer {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }
}

impl MockDnsServer {
    pub fn builder(behavior: MockBehavior) -> MockDnsServerBuilder {
        MockDnsServerBuilder {
            behavior,
            answers: HashMap::new(),
            delays: HashMap::new(),
        }
    }

    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        Self::builder(behavior).start().await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Raw datagrams received so far, in arrival order.
    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Reads the uncompressed first QNAME of a query.
pub fn first_question_name(query: &[u8]) -> Option<String> {
    if query.len() < 12 || u16::from_be_bytes([query[4], query[5]]) == 0 {
        return None;
    }
    let mut pos = 12;
    let mut labels = Vec::new();
    loop {
        let len = *query.get(pos)? as usize;
        if len == 0 {
            break;
        }
        labels.push(String::from_utf8_lossy(query.get(pos + 1..pos + 1 + len)?).into_owned());
        pos += 1 + len;
    }
    Some(labels.join("."))
}

fn build_mock_response(
    query: &[u8],
    behavior: MockBehavior,
    answers: &HashMap<String, Vec<Ipv4Addr>>,
) -> Vec<u8> {
    if behavior == MockBehavior::Garbage || query.len() < 12 {
        return vec![0xde, 0xad, 0xbe, 0xef];
    }

    let mut id = u16::from_be_bytes([query[0], query[1]]);
    if behavior == MockBehavior::WrongId {
        id = id.wrapping_add(1);
    }

    let records = first_question_name(query)
        .and_then(|name| answers.get(&name).cloned())
        .unwrap_or_default();

    let mut response = Vec::with_capacity(512);
    response.extend_from_slice(&id.to_be_bytes());
    response.push(0x81);
    response.push(0x80);
    response.extend_from_slice(&query[4..6]);
    response.extend_from_slice(&(records.len() as u16).to_be_bytes());
    response.extend_from_slice(&[0x00, 0x00]);
    response.extend_from_slice(&[0x00, 0x00]);

    if query.len() > 12 {
        response.extend_from_slice(&query[12..]);
    }

    for addr in records {
        response.extend_from_slice(&[
            0xc0, 0x0c, //
            0x00, 0x01, //
            0x00, 0x01, //
            0x00, 0x00, 0x00, 0x3c, //
            0x00, 0x04,
        ]);
        response.extend_from_slice(&addr.octets());
    }

    response
}
