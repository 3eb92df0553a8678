use async_trait::async_trait;
use dnsfilter_application::ports::EventRecorder;
use dnsfilter_application::use_cases::HandleDnsQueryUseCase;
use dnsfilter_domain::{DomainList, DomainName, FilterLists, QueryEvent};
use dnsfilter_infrastructure::dns::{
    DnsServerHandler, QueryEventEmitter, QueryEventLogger, UdpDispatcher, UdpTransport,
    UpstreamForwarder,
};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio_util::sync::CancellationToken;

/// Raw client query, built byte by byte so the codec under test is not
/// involved in producing its own input.
pub struct QueryBuilder {
    id: u16,
    flags: u16,
    questions: Vec<(String, u16)>,
}

impl QueryBuilder {
    pub fn new(id: u16) -> Self {
        Self {
            id,
            flags: 0x0100,
            questions: Vec::new(),
        }
    }

    pub fn question(mut self, name: &str, qtype: u16) -> Self {
        self.questions.push((name.to_string(), qtype));
        self
    }

    pub fn a(self, name: &str) -> Self {
        self.question(name, 1)
    }

    pub fn aaaa(self, name: &str) -> Self {
        self.question(name, 28)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&(self.questions.len() as u16).to_be_bytes());
        buf.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        for (name, qtype) in &self.questions {
            for label in name.split('.').filter(|l| !l.is_empty()) {
                buf.push(label.len() as u8);
                buf.extend_from_slice(label.as_bytes());
            }
            buf.push(0);
            buf.extend_from_slice(&qtype.to_be_bytes());
            buf.extend_from_slice(&1u16.to_be_bytes());
        }
        buf
    }
}

#[derive(Default)]
pub struct RecordingRecorder {
    events: Mutex<Vec<QueryEvent>>,
}

impl RecordingRecorder {
    pub fn events(&self) -> Vec<QueryEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRecorder for RecordingRecorder {
    async fn record(&self, event: QueryEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Full request pipeline on a loopback port, forwarding to `upstream`.
pub struct TestServer {
    pub addr: SocketAddr,
    pub lists: Arc<FilterLists>,
    pub recorder: Arc<RecordingRecorder>,
    shutdown: CancellationToken,
}

impl TestServer {
    pub async fn start(upstream: SocketAddr, whitelist: &[&str], blacklist: &[&str]) -> Self {
        Self::start_with_limit(upstream, whitelist, blacklist, 0).await
    }

    pub async fn start_with_limit(
        upstream: SocketAddr,
        whitelist: &[&str],
        blacklist: &[&str],
        max_concurrent: usize,
    ) -> Self {
        let lists = Arc::new(FilterLists::new(to_list(whitelist), to_list(blacklist)));

        let forwarder = UpstreamForwarder::new(Arc::new(UdpTransport::new(upstream)))
            .with_timeout(Duration::from_millis(500));

        let recorder = Arc::new(RecordingRecorder::default());
        let (emitter, rx) = QueryEventEmitter::new_enabled(16);
        QueryEventLogger::new(recorder.clone()).start(rx);

        let use_case = Arc::new(HandleDnsQueryUseCase::new(
            lists.clone(),
            Arc::new(forwarder),
            Arc::new(emitter),
        ));

        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await.unwrap());
        let addr = socket.local_addr().unwrap();
        let dispatcher = UdpDispatcher::new(socket, Arc::new(DnsServerHandler::new(use_case)))
            .with_max_concurrent_requests(max_concurrent);

        let shutdown = CancellationToken::new();
        let token = shutdown.clone();
        tokio::spawn(async move {
            let _ = dispatcher.run(token).await;
        });

        Self {
            addr,
            lists,
            recorder,
            shutdown,
        }
    }

    /// Sends `query` from a fresh client socket; `None` if nothing comes back
    /// within `wait`.
    pub async fn exchange(&self, query: &[u8], wait: Duration) -> Option<Vec<u8>> {
        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        client.send_to(query, self.addr).await.unwrap();

        let mut buf = vec![0u8; 512];
        match tokio::time::timeout(wait, client.recv_from(&mut buf)).await {
            Ok(Ok((len, _))) => {
                buf.truncate(len);
                Some(buf)
            }
            _ => None,
        }
    }

    /// Waits until the statistics consumer has recorded `count` events.
    pub async fn wait_for_events(&self, count: usize) -> Vec<QueryEvent> {
        for _ in 0..100 {
            let events = self.recorder.events();
            if events.len() >= count {
                return events;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.recorder.events()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn to_list(names: &[&str]) -> DomainList {
    names.iter().map(|n| DomainName::new(n)).collect()
}
