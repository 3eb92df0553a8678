#![allow(dead_code)]

mod builders;
mod dns_server_mock;

pub use builders::{QueryBuilder, RecordingRecorder, TestServer};
pub use dns_server_mock::{MockBehavior, MockDnsServer};
