use crate::{DomainName, RecordType, ResourceRecord};
use chrono::{DateTime, Utc};
use std::net::IpAddr;

/// One record delivered to one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryEvent {
    pub client: IpAddr,
    pub requested_name: DomainName,
    pub record_type: RecordType,
    /// Absent for records that carry no address (CNAME, MX, ...).
    pub resolved_address: Option<IpAddr>,
    pub timestamp: DateTime<Utc>,
}

impl QueryEvent {
    pub fn from_record(client: IpAddr, record: &ResourceRecord, timestamp: DateTime<Utc>) -> Self {
        Self {
            client,
            requested_name: record.name.clone(),
            record_type: record.record_type,
            resolved_address: record.address(),
            timestamp,
        }
    }
}
