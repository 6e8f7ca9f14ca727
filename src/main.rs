use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use quickstart::config::Config;
use quickstart::logging::init_logging;
use quickstart::qds::QdsClient;
use quickstart::rest::{self, ApiState};

/// Guided wizard for provisioning Qubole demo infrastructure
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the configuration file
    #[arg(long)]
    config: Option<String>,

    /// Override the configured listen port
    #[arg(long)]
    port: Option<u16>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let logging = init_logging(&config, cli.debug)?;
    if let Some(path) = &logging.log_file_path {
        eprintln!("Logging to {}", path.display());
    }

    if config.qubole.api_token.is_empty() {
        tracing::warn!("No Qubole API token configured; platform calls will be rejected");
    }

    let port = cli.port.unwrap_or(config.server.port);
    let platform = Arc::new(QdsClient::new(&config.qubole));
    let state = ApiState::new(config, platform);

    rest::serve(state, port).await
}
