#![allow(dead_code)]

mod mocks;

pub use mocks::{MockDomainListLoader, MockUpstreamResolver, RecordingStatisticsSink};
