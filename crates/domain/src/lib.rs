//! DnsFilter Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod domain_list;
pub mod domain_name;
pub mod errors;
pub mod query_event;

pub use config::{CliOverrides, Config, ConfigError, LogFormat};
pub use dns_message::{DnsHeader, DnsMessage, DnsQuestion};
pub use dns_record::{RecordClass, RecordType, ResourceRecord};
pub use domain_list::{DomainList, FilterLists, ListSnapshot};
pub use domain_name::DomainName;
pub use errors::DomainError;
pub use query_event::QueryEvent;
