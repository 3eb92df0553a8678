use dnsfilter_application::use_cases::ReloadDomainListsUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 86400;

/// Periodically reloads the whitelist and blacklist from their sources.
///
/// The first tick is consumed immediately since the lists are loaded once at
/// startup. A failed reload leaves the current lists in place.
pub struct ListRefreshJob {
    reload: Arc<ReloadDomainListsUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl ListRefreshJob {
    pub fn new(reload: Arc<ReloadDomainListsUseCase>) -> Self {
        Self {
            reload,
            interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting list refresh job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ListRefreshJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        info!("ListRefreshJob: reloading domain lists");
                        match self.reload.execute().await {
                            Ok(counts) => info!(
                                whitelisted = counts.whitelisted,
                                blacklisted = counts.blacklisted,
                                "ListRefreshJob: reload completed"
                            ),
                            Err(e) => error!(
                                error = %e,
                                "ListRefreshJob: reload failed, keeping current lists"
                            ),
                        }
                    }
                }
            }
        });
    }
}
