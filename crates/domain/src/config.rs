pub mod errors;
pub mod lists;
pub mod logging;
pub mod root;
pub mod server;
pub mod statistics;
pub mod upstream;

pub use errors::ConfigError;
pub use lists::ListsConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use statistics::StatisticsConfig;
pub use upstream::UpstreamConfig;
