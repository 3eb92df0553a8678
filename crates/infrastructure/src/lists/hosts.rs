//! Hosts-file syntax: `<address> <name> [<name>...]`, `#` starts a comment.

use dnsfilter_domain::DomainName;
use rustc_hash::FxHashSet;
use std::net::IpAddr;
use tracing::warn;

/// Names on one line, or `None` for blank, comment-only, single-field and
/// bad-address lines.
pub fn parse_hosts_line(line: &str) -> Option<Vec<DomainName>> {
    let content = match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    };

    let mut fields = content.split_whitespace();
    let address = fields.next()?;
    let names: Vec<DomainName> = fields.map(DomainName::new).collect();
    if names.is_empty() {
        return None;
    }

    if parse_address(address).is_none() {
        warn!(address, "Skipping hosts line with invalid IP address");
        return None;
    }

    Some(names)
}

/// Parses a whole document. Names keep first-seen order, duplicates dropped.
pub fn parse_hosts(text: &str) -> Vec<DomainName> {
    let mut seen = FxHashSet::default();
    let mut names = Vec::new();
    for line in text.lines() {
        for name in parse_hosts_line(line).unwrap_or_default() {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }
    names
}

/// Interface scope (`fe80::1%lo0`) is accepted and ignored.
fn parse_address(field: &str) -> Option<IpAddr> {
    let address = field.split('%').next().unwrap_or(field);
    address.parse().ok()
}
