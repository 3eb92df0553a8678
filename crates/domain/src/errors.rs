use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("DNS query carries no questions")]
    EmptyQuery,

    #[error("Failed to encode DNS message: {0}")]
    EncodeFailed(String),

    #[error("Upstream {server} did not answer before the deadline")]
    UpstreamTimeout { server: String },

    #[error("Upstream {server} failed: {reason}")]
    UpstreamNetwork { server: String, reason: String },

    #[error("Failed to load domain list from {origin}: {reason}")]
    ListSourceFailed { origin: String, reason: String },
}

