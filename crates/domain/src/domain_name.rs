use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// A domain name with the trailing root-label dot removed.
///
/// Comparison is an exact byte match. Case is preserved and not folded, so
/// `Ads.Example.com` and `ads.example.com` are different names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainName(Arc<str>);

impl DomainName {
    pub fn new(name: &str) -> Self {
        Self(Arc::from(normalize(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

/// Strips exactly one trailing dot.
pub fn normalize(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DomainName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for DomainName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DomainName {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}
