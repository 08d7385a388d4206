// HaulHub server entrypoint
//!
//! The heavy lifting (state restore, route wiring, graceful shutdown) lives
//! in dedicated modules so this file remains a thin orchestrator.

use anyhow::Result;
use haulhub::config::ServerConfig;
use haulhub::lifecycle::{bootstrap, run};
use haulhub::logging;
use log::info;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load configuration (config.toml, with env overrides)
    let config_path = "config.toml";
    let config = match ServerConfig::from_file(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("FATAL: failed to load {}: {}", config_path, e);
            std::process::exit(1);
        }
    };

    // Logging before any other side effects
    logging::init_logging(
        &config.logging.level,
        &config.logging.file_path,
        config.logging.log_to_console,
        &config.logging.format,
    )?;

    info!("HaulHub v{}", env!("CARGO_PKG_VERSION"));
    info!("Host: {}  Port: {}", config.server.host, config.server.port);

    let (state, stores) = bootstrap(&config)?;

    run(&config, state, stores).await
}
