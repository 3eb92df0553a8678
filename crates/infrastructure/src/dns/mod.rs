pub mod codec;
pub mod dispatcher;
pub mod events;
pub mod forwarding;
pub mod query_logger;
pub mod server;
pub mod transport;

pub use dispatcher::UdpDispatcher;
pub use events::QueryEventEmitter;
pub use forwarding::UpstreamForwarder;
pub use query_logger::{QueryEventLogger, TracingEventRecorder};
pub use server::{DnsServerHandler, PreparedReply};
pub use transport::{DnsTransport, UdpTransport};
