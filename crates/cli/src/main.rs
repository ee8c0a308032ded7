//! CLI binary for the searchwatch readiness sidecar.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use searchwatch_health::{
    ClusterMonitor, HttpProber, HttpProberOptions, NodeDirectory, NodeDirectoryOptions,
};
use searchwatch_server::{Context, HealthcheckServer, PageConfig, build_router};
use tracing::info;

/// Exit code for configuration errors (EX_CONFIG).
const EXIT_CODE_CONFIGURATION_ERROR: i32 = 78;

/// CLI-specific error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Health library error
    #[error(transparent)]
    Health(#[from] searchwatch_health::Error),

    /// Server library error
    #[error(transparent)]
    Server(#[from] searchwatch_server::Error),
}

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// API key presented on member status queries
    #[arg(long, env = "SEARCHWATCH_API_KEY", required = true)]
    api_key: String,

    /// Member API port
    #[arg(long, default_value_t = 8108, env = "SEARCHWATCH_API_PORT")]
    api_port: u16,

    /// Resolve members to cluster-internal service names
    #[arg(long, env = "SEARCHWATCH_IN_CLUSTER")]
    in_cluster: bool,

    /// Log level
    #[arg(long, default_value = "info", env = "SEARCHWATCH_LOG_LEVEL")]
    log_level: tracing::Level,

    /// Status page logo URL
    #[arg(long, default_value = "", env = "SEARCHWATCH_LOGO")]
    logo: String,

    /// Namespace used for in-cluster name resolution
    #[arg(long, default_value = "default", env = "SEARCHWATCH_CLUSTER_NAMESPACE")]
    namespace: String,

    /// Path to the mounted member list
    #[arg(
        long,
        default_value = "/usr/share/search/nodes",
        env = "SEARCHWATCH_NODES"
    )]
    nodes_path: PathBuf,

    /// Port to serve the sidecar endpoints on
    #[arg(long, default_value_t = 8808, env = "SEARCHWATCH_PORT")]
    port: u16,

    /// Member peering port
    #[arg(long, default_value_t = 8107, env = "SEARCHWATCH_PEERING_PORT")]
    peering_port: u16,

    /// Transport scheme for member probes (http or https)
    #[arg(long, default_value = "http", env = "SEARCHWATCH_PROTOCOL")]
    protocol: String,

    /// Status page title
    #[arg(long, default_value = "Cluster Health", env = "SEARCHWATCH_TITLE")]
    title: String,
}

/// Waits for SIGTERM/SIGINT (or ctrl-c on non-unix platforms).
async fn wait_for_termination_signal() {
    if cfg!(unix) {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = signal(SignalKind::terminate()).expect("SIGTERM handler failed");
        let mut sigint = signal(SignalKind::interrupt()).expect("SIGINT handler failed");

        tokio::select! {
            _ = sigterm.recv() => info!("Received SIGTERM"),
            _ = sigint.recv() => info!("Received SIGINT"),
        }
    } else {
        let _ = tokio::signal::ctrl_c().await;
        info!("Received interrupt signal");
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            std::process::exit(EXIT_CODE_CONFIGURATION_ERROR);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    let prober = HttpProber::new(HttpProberOptions {
        api_key: args.api_key,
        protocol: args.protocol,
        api_port: args.api_port,
    })?;

    let directory = NodeDirectory::new(NodeDirectoryOptions {
        nodes_path: args.nodes_path,
        peering_port: args.peering_port,
        api_port: args.api_port,
        namespace: args.namespace,
        in_cluster: args.in_cluster,
    });

    let router = build_router(Context {
        monitor: Arc::new(ClusterMonitor::new(directory, prober)),
        page: PageConfig {
            title: args.title,
            logo: args.logo,
        },
    });

    let server = HealthcheckServer::new(SocketAddr::from((Ipv4Addr::UNSPECIFIED, args.port)));
    let _handle = server.start(router).await?;

    wait_for_termination_signal().await;

    info!("termination signal received, shutting down gracefully...");
    server.shutdown().await;

    Ok(())
}
