pub mod hosts;
pub mod loader;

pub use hosts::{parse_hosts, parse_hosts_line};
pub use loader::HostsListLoader;
