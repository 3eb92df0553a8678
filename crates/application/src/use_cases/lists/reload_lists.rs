use crate::ports::DomainListLoader;
use dnsfilter_domain::{DomainError, FilterLists};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListCounts {
    pub whitelisted: usize,
    pub blacklisted: usize,
}

/// Loads both lists from their sources and swaps them in together. Nothing is
/// swapped unless both loads succeed.
pub struct ReloadDomainListsUseCase {
    loader: Arc<dyn DomainListLoader>,
    lists: Arc<FilterLists>,
    whitelist_sources: Vec<String>,
    blacklist_sources: Vec<String>,
}

impl ReloadDomainListsUseCase {
    pub fn new(
        loader: Arc<dyn DomainListLoader>,
        lists: Arc<FilterLists>,
        whitelist_sources: Vec<String>,
        blacklist_sources: Vec<String>,
    ) -> Self {
        Self {
            loader,
            lists,
            whitelist_sources,
            blacklist_sources,
        }
    }

    pub async fn execute(&self) -> Result<ListCounts, DomainError> {
        let whitelist = self.loader.load(&self.whitelist_sources).await?;
        let blacklist = self.loader.load(&self.blacklist_sources).await?;

        let counts = ListCounts {
            whitelisted: whitelist.len(),
            blacklisted: blacklist.len(),
        };

        self.lists.replace_both(whitelist, blacklist);

        info!(
            whitelisted = counts.whitelisted,
            blacklisted = counts.blacklisted,
            "Domain lists replaced"
        );

        Ok(counts)
    }
}
