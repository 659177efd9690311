//! ocsight - read-only OpenShift cluster introspection server
//!
//! Runs either as an HTTP server (`serve`, the default) or as an MCP server
//! on stdio (`mcp`) for agent integration.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};

use ocsight_api::config::OcsightConfig;
use ocsight_api::kubernetes::{ConnectionProvider, KubeInspector};
use ocsight_api::logging::LoggingConfig;
use ocsight_api::mcp::McpServer;
use ocsight_api::routes::build_router;
use ocsight_api::AppState;

#[derive(Parser, Debug)]
#[command(name = "ocsight", version, about = "Read-only OpenShift cluster introspection", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (default mode)
    Serve,
    /// Run the MCP server on stdio for agent integration
    Mcp,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            OcsightConfig::load_from_file(path).map_err(|e| anyhow::anyhow!("{}", e))?
        }
        None => OcsightConfig::load(),
    };
    if let Err(e) = config.validate() {
        return Err(anyhow::anyhow!("Invalid configuration: {}", e));
    }

    match cli.command {
        Some(Commands::Mcp) => run_mcp(config).await,
        Some(Commands::Serve) | None => run_server(config).await,
    }
}

fn build_inspector(config: &OcsightConfig) -> KubeInspector {
    let provider = ConnectionProvider::new(
        config.cluster.kubeconfig.clone(),
        config.cluster.context.clone(),
        config.cluster.in_cluster,
    );
    KubeInspector::new(provider)
}

/// Run the HTTP server: health probes plus the cluster info passthrough.
async fn run_server(config: OcsightConfig) -> anyhow::Result<()> {
    let _guard = LoggingConfig::new(&config.logging.level, config.logging.log_dir.clone())
        .init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    let inspector = Arc::new(build_inspector(&config));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, inspector);

    let app = build_router(state);

    info!("ocsight API listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Run the MCP server over stdio. Logging goes to stderr because stdout
/// carries the protocol stream.
async fn run_mcp(config: OcsightConfig) -> anyhow::Result<()> {
    let _guard = LoggingConfig::new(&config.logging.level, config.logging.log_dir.clone())
        .to_stderr()
        .init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting ocsight MCP server...");

    let inspector = build_inspector(&config);
    McpServer::new(inspector)
        .serve_stdio()
        .await
        .map_err(|e| anyhow::anyhow!("MCP server error: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install ctrl-c handler: {}", e);
    }
}
