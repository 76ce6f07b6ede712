//! YouChat CLI
//!
//! Commands:
//! - ask:      free-text question, reply shown with a copy action
//! - refactor: selection rewritten, reply shown in a panel
//! - explain:  selection explained, reply shown in a panel

use clap::Parser;
use tracing::{debug, info};

use youchat::cli::{apply_cli_overrides, run_cli, Cli, EXIT_CONFIG_ERROR};
use youchat::config::AppConfig;
use youchat::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(c) => apply_cli_overrides(c, &cli),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(EXIT_CONFIG_ERROR);
        }
    };

    let filter = logging::build_filter(cli.log_level.as_deref(), &config.log_level);
    let guard = logging::init(&config.log_dir, filter, cli.log_level.is_some());
    info!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "starting"
    );
    // Config is read before the subscriber exists; report what was loaded now
    match config.source {
        Some(ref path) => info!("Loaded configuration from {:?}", path),
        None => info!("No configuration file found, using defaults"),
    }
    for var in &config.env_overrides {
        debug!(var = *var, "Applied env override");
    }

    let code = run_cli(cli, &config).await;
    // exit() skips destructors; flush the file writer first
    drop(guard);
    std::process::exit(code);
}
