use async_trait::async_trait;
use dnsfilter_application::ports::{DomainListLoader, StatisticsSink, UpstreamResolver};
use dnsfilter_domain::{
    DnsHeader, DnsQuestion, DomainError, DomainList, DomainName, QueryEvent, RecordClass,
    ResourceRecord,
};
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Mutex;

/// Answers each forwarded question with the records registered for its name.
#[derive(Default)]
pub struct MockUpstreamResolver {
    answers: Mutex<HashMap<String, Vec<ResourceRecord>>>,
    failure: Mutex<Option<DomainError>>,
    calls: Mutex<Vec<(Vec<DnsQuestion>, DnsHeader)>>,
}

impl MockUpstreamResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_a(&self, name: &str, addr: Ipv4Addr, ttl: u32) {
        self.answers.lock().unwrap().entry(name.to_string()).or_default().push(
            ResourceRecord::a(DomainName::new(name), RecordClass::In, ttl, addr),
        );
    }

    pub fn set_answers(&self, name: &str, records: Vec<ResourceRecord>) {
        self.answers.lock().unwrap().insert(name.to_string(), records);
    }

    pub fn fail_with(&self, error: DomainError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    pub fn calls(&self) -> Vec<(Vec<DnsQuestion>, DnsHeader)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamResolver for MockUpstreamResolver {
    async fn resolve(
        &self,
        questions: &[DnsQuestion],
        header: &DnsHeader,
    ) -> Result<Vec<ResourceRecord>, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((questions.to_vec(), *header));

        if let Some(error) = self.failure.lock().unwrap().clone() {
            return Err(error);
        }

        let answers = self.answers.lock().unwrap();
        Ok(questions
            .iter()
            .flat_map(|q| answers.get(q.name.as_str()).cloned().unwrap_or_default())
            .collect())
    }
}

#[derive(Default)]
pub struct RecordingStatisticsSink {
    events: Mutex<Vec<QueryEvent>>,
}

impl RecordingStatisticsSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<QueryEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatisticsSink for RecordingStatisticsSink {
    async fn emit(&self, event: QueryEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Serves lists keyed by source identifier; unknown sources fail.
#[derive(Default)]
pub struct MockDomainListLoader {
    sources: Mutex<HashMap<String, Vec<String>>>,
}

impl MockDomainListLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_source(&self, source: &str, names: &[&str]) {
        self.sources.lock().unwrap().insert(
            source.to_string(),
            names.iter().map(|n| n.to_string()).collect(),
        );
    }

    pub fn remove_source(&self, source: &str) {
        self.sources.lock().unwrap().remove(source);
    }
}

#[async_trait]
impl DomainListLoader for MockDomainListLoader {
    async fn load(&self, sources: &[String]) -> Result<DomainList, DomainError> {
        let known = self.sources.lock().unwrap();
        let mut list = DomainList::new();
        for source in sources {
            let names = known.get(source).ok_or_else(|| DomainError::ListSourceFailed {
                origin: source.clone(),
                reason: "not found".to_string(),
            })?;
            for name in names {
                list.insert(DomainName::new(name));
            }
        }
        Ok(list)
    }
}
