use clap::Parser;
use dnsfilter_domain::CliOverrides;
use dnsfilter_jobs::ListRefreshJob;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "dnsfilter")]
#[command(version)]
#[command(about = "DnsFilter - DNS forwarding proxy with hosts-list ad-blocking")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver (host:port)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Blacklist source (URL or file path); repeatable
    #[arg(long, value_name = "SOURCE")]
    blacklist: Vec<String>,

    /// Whitelist source (URL or file path); repeatable
    #[arg(long, value_name = "SOURCE")]
    whitelist: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        upstream: cli.upstream,
        log_level: cli.log_level,
        blacklist: cli.blacklist,
        whitelist: cli.whitelist,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting DnsFilter v{}", env!("CARGO_PKG_VERSION"));

    let shutdown = CancellationToken::new();

    let lists = di::ListServices::new(&config).await?;
    let dns_services = di::DnsServices::new(&config, lists.filter_lists.clone())?;

    if config.lists.refresh_interval > 0 {
        let refresh_job = Arc::new(
            ListRefreshJob::new(lists.reload.clone())
                .with_interval(config.lists.refresh_interval)
                .with_cancellation(shutdown.clone()),
        );
        refresh_job.start().await;
    }

    let listen_addr: SocketAddr = config.server.listen_address().parse()?;

    tokio::select! {
        result = server::start_dns_server(
            listen_addr,
            dns_services.handler,
            config.server.max_concurrent_requests,
            shutdown.clone(),
        ) => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server error");
            }
            result?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Interrupt received, shutting down");
            shutdown.cancel();
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
