//! ignition-staticnet
//!
//! Serves Ignition configs for bootstrap, master and worker machines, each
//! extended with static network configuration for the calling host.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /{role}/nic/...            ┌──────────────┐     ┌───────────────┐
//!     GET /{role}/bond/...  ───────▶ │   handlers   │────▶│   templates   │
//!                                    │ (peer IP +   │     │  (Tera, from  │
//!                                    │  path vars)  │     │   --templates)│
//!                                    └──────┬───────┘     └───────┬───────┘
//!                                           │                     │ bytes
//!                                           ▼                     ▼
//!     JSON Ignition config   ◀─────  ┌──────────────┐     ┌───────────────┐
//!                                    │  role store  │◀────│   embedder    │
//!                                    │ (copy+append)│     │  (data URLs)  │
//!                                    └──────────────┘     └───────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use ignition_staticnet::config::{load_config, validate_config, ConfigError, ServiceConfig};
use ignition_staticnet::lifecycle::{self, Shutdown};
use ignition_staticnet::observability::logging;

#[derive(Parser, Debug)]
#[command(name = "ignition-staticnet")]
#[command(version, about = "Serve Ignition configs with static network files for the caller", long_about = None)]
struct Args {
    /// Settings file (TOML). Flags below override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server port
    #[arg(short, long)]
    port: Option<u16>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Bootstrap Ignition file to patch
    #[arg(long)]
    bootstrap: Option<PathBuf>,

    /// Master Ignition file to patch
    #[arg(long)]
    master: Option<PathBuf>,

    /// Worker Ignition file to patch
    #[arg(long)]
    worker: Option<PathBuf>,

    /// Directory containing nic.tmpl, bond.tmpl and bond-slave.tmpl
    #[arg(long)]
    templates: Option<PathBuf>,

    /// Compile templates once at startup
    #[arg(long)]
    template_cache: bool,

    /// Write the startup profile to `file`
    #[arg(long, value_name = "file")]
    cpuprofile: Option<PathBuf>,

    /// Log output format (text or json)
    #[arg(long)]
    log_format: Option<String>,
}

impl Args {
    fn into_config(self) -> Result<ServiceConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(host) = self.host {
            config.listener.host = host;
        }
        if let Some(path) = self.bootstrap {
            config.ignition.bootstrap = path;
        }
        if let Some(path) = self.master {
            config.ignition.master = path;
        }
        if let Some(path) = self.worker {
            config.ignition.worker = path;
        }
        if let Some(dir) = self.templates {
            config.templates.dir = dir;
        }
        if self.template_cache {
            config.templates.cache = true;
        }
        if let Some(path) = self.cpuprofile {
            config.profiling.output = Some(path);
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ignition-staticnet: invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);
    tracing::info!("ignition-staticnet v{} starting", env!("CARGO_PKG_VERSION"));

    let (server, listener) = match lifecycle::start(config).await {
        Ok(started) => started,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    if let Err(e) = server.run(listener, shutdown.subscribe()).await {
        tracing::error!(error = %e, "Server error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
