use super::hosts::parse_hosts;
use async_trait::async_trait;
use dnsfilter_application::ports::DomainListLoader;
use dnsfilter_domain::{DomainError, DomainList};
use futures::future::join_all;
use std::time::Duration;
use tracing::{debug, info};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Loads hosts-format lists from `http(s)://` URLs or local files.
pub struct HostsListLoader {
    client: reqwest::Client,
}

impl HostsListLoader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    async fn fetch_source(&self, source: &str) -> Result<String, DomainError> {
        if is_remote(source) {
            fetch_url(source, &self.client).await
        } else {
            tokio::fs::read_to_string(source)
                .await
                .map_err(|e| DomainError::ListSourceFailed {
                    origin: source.to_string(),
                    reason: e.to_string(),
                })
        }
    }
}

impl Default for HostsListLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DomainListLoader for HostsListLoader {
    async fn load(&self, sources: &[String]) -> Result<DomainList, DomainError> {
        let texts = join_all(sources.iter().map(|source| self.fetch_source(source))).await;

        let mut list = DomainList::new();
        for (source, text) in sources.iter().zip(texts) {
            let parsed = parse_hosts(&text?);
            info!(source = %source, names = parsed.len(), "Loaded domain list source");
            for name in parsed {
                list.insert(name);
            }
        }

        debug!(sources = sources.len(), unique = list.len(), "Merged domain list sources");
        Ok(list)
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

async fn fetch_url(url: &str, client: &reqwest::Client) -> Result<String, DomainError> {
    let failed = |reason: String| DomainError::ListSourceFailed {
        origin: url.to_string(),
        reason,
    };

    let response = client
        .get(url)
        .timeout(FETCH_TIMEOUT)
        .send()
        .await
        .map_err(|e| failed(format!("fetch error: {}", e)))?;

    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status().as_u16())));
    }

    response
        .text()
        .await
        .map_err(|e| failed(format!("read error: {}", e)))
}
