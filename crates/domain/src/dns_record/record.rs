use super::{RecordClass, RecordType};
use crate::DomainName;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// One answer-section record.
///
/// `rdata` always holds the uncompressed payload, so a record decoded from
/// one message can be written into another verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: DomainName,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub rdata: Vec<u8>,
}

impl ResourceRecord {
    pub fn a(name: DomainName, class: RecordClass, ttl: u32, addr: Ipv4Addr) -> Self {
        Self {
            name,
            record_type: RecordType::A,
            class,
            ttl,
            rdata: addr.octets().to_vec(),
        }
    }

    pub fn aaaa(name: DomainName, class: RecordClass, ttl: u32, addr: Ipv6Addr) -> Self {
        Self {
            name,
            record_type: RecordType::AAAA,
            class,
            ttl,
            rdata: addr.octets().to_vec(),
        }
    }

    /// The address carried by an A or AAAA record with a well-sized payload.
    pub fn address(&self) -> Option<IpAddr> {
        match self.record_type {
            RecordType::A => {
                let octets: [u8; 4] = self.rdata.as_slice().try_into().ok()?;
                Some(IpAddr::V4(Ipv4Addr::from(octets)))
            }
            RecordType::AAAA => {
                let octets: [u8; 16] = self.rdata.as_slice().try_into().ok()?;
                Some(IpAddr::V6(Ipv6Addr::from(octets)))
            }
            _ => None,
        }
    }
}
