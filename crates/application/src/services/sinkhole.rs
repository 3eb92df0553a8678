use dnsfilter_domain::{DnsQuestion, RecordType, ResourceRecord};
use std::net::{Ipv4Addr, Ipv6Addr};

pub const SINKHOLE_TTL: u32 = 0;

/// Null address for a blocked A or AAAA question. Other types get nothing.
pub fn sinkhole_answer(question: &DnsQuestion) -> Option<ResourceRecord> {
    match question.record_type {
        RecordType::A => Some(ResourceRecord::a(
            question.name.clone(),
            question.class,
            SINKHOLE_TTL,
            Ipv4Addr::UNSPECIFIED,
        )),
        RecordType::AAAA => Some(ResourceRecord::aaaa(
            question.name.clone(),
            question.class,
            SINKHOLE_TTL,
            Ipv6Addr::UNSPECIFIED,
        )),
        _ => None,
    }
}

pub fn synthesize_blocked_answers(blocked: &[DnsQuestion]) -> Vec<ResourceRecord> {
    blocked.iter().filter_map(sinkhole_answer).collect()
}
