use dnsfilter_domain::{DnsQuestion, DomainList};

/// Questions split by policy. Each side keeps the input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub allowed: Vec<DnsQuestion>,
    pub blocked: Vec<DnsQuestion>,
}

/// Whitelisted names are always allowed; otherwise blacklisted names are blocked.
pub fn is_allowed(name: &str, whitelist: &DomainList, blacklist: &DomainList) -> bool {
    whitelist.contains(name) || !blacklist.contains(name)
}

pub fn filter_questions(
    questions: &[DnsQuestion],
    whitelist: &DomainList,
    blacklist: &DomainList,
) -> FilterOutcome {
    let mut outcome = FilterOutcome::default();
    for question in questions {
        if is_allowed(question.name.as_str(), whitelist, blacklist) {
            outcome.allowed.push(question.clone());
        } else {
            outcome.blocked.push(question.clone());
        }
    }
    outcome
}
