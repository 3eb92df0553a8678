use anyhow::Context;
use dnsfilter_application::ports::{StatisticsSink, UpstreamResolver};
use dnsfilter_application::use_cases::{HandleDnsQueryUseCase, ReloadDomainListsUseCase};
use dnsfilter_domain::{Config, FilterLists};
use dnsfilter_infrastructure::dns::{
    DnsServerHandler, QueryEventEmitter, QueryEventLogger, TracingEventRecorder, UdpTransport,
    UpstreamForwarder,
};
use dnsfilter_infrastructure::lists::HostsListLoader;
use std::sync::Arc;
use tracing::info;

pub struct ListServices {
    pub filter_lists: Arc<FilterLists>,
    pub reload: Arc<ReloadDomainListsUseCase>,
}

impl ListServices {
    /// Builds the shared lists and performs the initial load. A source that
    /// cannot be loaded at startup is fatal.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let filter_lists = Arc::new(FilterLists::empty());
        let reload = Arc::new(ReloadDomainListsUseCase::new(
            Arc::new(HostsListLoader::new()),
            filter_lists.clone(),
            config.lists.whitelist.clone(),
            config.lists.blacklist.clone(),
        ));

        reload
            .execute()
            .await
            .context("failed to load domain lists")?;

        Ok(Self {
            filter_lists,
            reload,
        })
    }
}

pub struct DnsServices {
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn new(config: &Config, filter_lists: Arc<FilterLists>) -> anyhow::Result<Self> {
        let upstream_addr = config.upstream.socket_addr()?;
        let resolver: Arc<dyn UpstreamResolver> = Arc::new(
            UpstreamForwarder::new(Arc::new(UdpTransport::new(upstream_addr)))
                .with_timeout(config.upstream.timeout()),
        );
        info!(
            server = %upstream_addr,
            timeout_secs = config.upstream.query_timeout,
            "Upstream resolver configured"
        );

        let statistics: Arc<dyn StatisticsSink> = if config.statistics.enabled {
            let (emitter, rx) = QueryEventEmitter::new_enabled(config.statistics.queue_capacity);
            QueryEventLogger::new(Arc::new(TracingEventRecorder)).start(rx);
            info!(
                queue_capacity = config.statistics.queue_capacity,
                "Statistics consumer started"
            );
            Arc::new(emitter)
        } else {
            info!("Statistics disabled");
            Arc::new(QueryEventEmitter::new_disabled())
        };

        let use_case = Arc::new(
            HandleDnsQueryUseCase::new(filter_lists, resolver, statistics)
                .with_skip_empty_queries(config.upstream.skip_empty_queries),
        );

        Ok(Self {
            handler: Arc::new(DnsServerHandler::new(use_case)),
        })
    }
}
