use crate::{DomainName, RecordClass, RecordType, ResourceRecord};

/// Fixed DNS header minus the section counts, which are derived from the
/// message body when encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DnsHeader {
    pub id: u16,
    pub response: bool,
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: u8,
}

impl DnsHeader {
    pub fn query(id: u16) -> Self {
        Self {
            id,
            recursion_desired: true,
            ..Self::default()
        }
    }

    /// Header for a reply to `request`: same ID, Response and Authoritative
    /// set, every other flag cleared.
    pub fn reply_to(request: &DnsHeader) -> Self {
        Self {
            id: request.id,
            response: true,
            authoritative: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsQuestion {
    pub name: DomainName,
    pub record_type: RecordType,
    pub class: RecordClass,
}

impl DnsQuestion {
    pub fn new(name: impl Into<DomainName>, record_type: RecordType) -> Self {
        Self {
            name: name.into(),
            record_type,
            class: RecordClass::In,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DnsMessage {
    pub header: DnsHeader,
    pub questions: Vec<DnsQuestion>,
    pub answers: Vec<ResourceRecord>,
}

impl DnsMessage {
    pub fn query(id: u16, questions: Vec<DnsQuestion>) -> Self {
        Self {
            header: DnsHeader::query(id),
            questions,
            answers: Vec::new(),
        }
    }
}
