use crate::domain_name::{normalize, DomainName};
use rustc_hash::FxHashSet;
use std::sync::{Arc, RwLock};

/// Set of blocked or force-allowed names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainList {
    names: FxHashSet<DomainName>,
}

impl DomainList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the name was already present.
    pub fn insert(&mut self, name: DomainName) -> bool {
        self.names.insert(name)
    }

    /// Exact membership test after stripping a trailing dot from `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(normalize(name))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<DomainName> for DomainList {
    fn from_iter<I: IntoIterator<Item = DomainName>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

/// A consistent view of both lists taken under the read lock.
#[derive(Debug, Clone)]
pub struct ListSnapshot {
    pub whitelist: Arc<DomainList>,
    pub blacklist: Arc<DomainList>,
}

#[derive(Debug)]
struct ListPair {
    whitelist: Arc<DomainList>,
    blacklist: Arc<DomainList>,
}

/// The filter's shared state: whitelist and blacklist behind one
/// reader/writer lock. Lists are only ever replaced wholesale.
#[derive(Debug)]
pub struct FilterLists {
    inner: RwLock<ListPair>,
}

impl FilterLists {
    pub fn new(whitelist: DomainList, blacklist: DomainList) -> Self {
        Self {
            inner: RwLock::new(ListPair {
                whitelist: Arc::new(whitelist),
                blacklist: Arc::new(blacklist),
            }),
        }
    }

    pub fn empty() -> Self {
        Self::new(DomainList::new(), DomainList::new())
    }

    pub fn snapshot(&self) -> ListSnapshot {
        let pair = self
            .inner
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        ListSnapshot {
            whitelist: Arc::clone(&pair.whitelist),
            blacklist: Arc::clone(&pair.blacklist),
        }
    }

    pub fn replace_whitelist(&self, whitelist: DomainList) {
        let whitelist = Arc::new(whitelist);
        let mut pair = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pair.whitelist = whitelist;
    }

    pub fn replace_blacklist(&self, blacklist: DomainList) {
        let blacklist = Arc::new(blacklist);
        let mut pair = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pair.blacklist = blacklist;
    }

    /// Swaps both lists under a single exclusive acquisition.
    pub fn replace_both(&self, whitelist: DomainList, blacklist: DomainList) {
        let whitelist = Arc::new(whitelist);
        let blacklist = Arc::new(blacklist);
        let mut pair = self
            .inner
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        pair.whitelist = whitelist;
        pair.blacklist = blacklist;
    }
}

impl Default for FilterLists {
    fn default() -> Self {
        Self::empty()
    }
}
