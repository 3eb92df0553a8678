use async_trait::async_trait;
use dnsfilter_application::ports::DomainListLoader;
use dnsfilter_domain::{DomainError, DomainList, DomainName};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Serves canned lists keyed by source string and counts loads.
#[derive(Default)]
pub struct MockDomainListLoader {
    sources: Mutex<HashMap<String, Vec<String>>>,
    load_calls: AtomicUsize,
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

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DomainListLoader for MockDomainListLoader {
    async fn load(&self, sources: &[String]) -> Result<DomainList, DomainError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);

        let mut list = DomainList::new();
        for source in sources {
            let names = self
                .sources
                .lock()
                .unwrap()
                .get(source)
                .cloned()
                .ok_or_else(|| DomainError::ListSourceFailed {
                    origin: source.clone(),
                    reason: "unreachable".to_string(),
                })?;
            for name in names {
                list.insert(DomainName::new(&name));
            }
        }
        Ok(list)
    }
}
