mod domain_list_loader;
mod event_recorder;
mod statistics_sink;
mod upstream_resolver;

pub use domain_list_loader::DomainListLoader;
pub use event_recorder::EventRecorder;
pub use statistics_sink::StatisticsSink;
pub use upstream_resolver::UpstreamResolver;
