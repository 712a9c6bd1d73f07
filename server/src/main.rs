//! PortMonitor - Dashboard of listening ports
//!
//! Serves a web page listing the host's listening sockets and lets the
//! user name ports; `list` prints the same table on the terminal.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use portmonitor::config::{DEFAULT_HOST, DEFAULT_NAME, DEFAULT_PORT};
use portmonitor::ServerConfig;
use portmonitor_core::MappingStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "portmonitor")]
#[command(author, version, about = "Dashboard of listening ports with custom application names")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Port mapping file [default: ~/.portmonitor/port_mappings.json]
    #[arg(long, global = true, env = "PORT_MONITOR_MAPPINGS")]
    mappings_file: Option<PathBuf>,

    /// Port the dashboard listens on; named after the dashboard in the default mapping
    #[arg(long, global = true, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Label for the dashboard's own port in the default mapping
    #[arg(long, global = true, default_value = DEFAULT_NAME)]
    name: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web dashboard (default)
    Serve {
        /// Address to bind
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
    },

    /// Print listening ports on the terminal
    #[command(alias = "ls")]
    List {
        /// Case-insensitive text to search for
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort key: laddr.port, application_name, display_laddr_ip or status
        #[arg(long, default_value = "laddr.port")]
        sort_by: String,

        /// Sort order: asc or desc
        #[arg(long, default_value = "asc")]
        sort_order: String,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mappings_file = match cli.mappings_file {
        Some(path) => path,
        None => MappingStore::default_path()?,
    };

    match cli.command {
        Some(Commands::List {
            search,
            sort_by,
            sort_order,
            json,
        }) => {
            let config = ServerConfig::new(DEFAULT_HOST, cli.port, cli.name, mappings_file);
            commands::list::run(&config, &search, &sort_by, &sort_order, json).await?;
        }
        Some(Commands::Serve { host }) => {
            let config = ServerConfig::new(host, cli.port, cli.name, mappings_file);
            commands::serve::run(config).await?;
        }
        None => {
            let config = ServerConfig::new(DEFAULT_HOST, cli.port, cli.name, mappings_file);
            commands::serve::run(config).await?;
        }
    }

    Ok(())
}
