//! vpnstat CLI
//!
//! Command-line interface for polling and controlling VPN services

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vpnstat_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "vpnstat")]
#[command(about = "vpnstat - VPN service status poller", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll continuously, printing changes and periodic summaries
    Watch(commands::watch::WatchArgs),
    /// Poll once and print the status table
    Status(commands::status::StatusArgs),
    /// Start one VPN service
    On(commands::control::ServiceArgs),
    /// Stop one VPN service
    Off(commands::control::ServiceArgs),
    /// Start every discovered VPN service
    AllOn(commands::control::BulkArgs),
    /// Stop every discovered VPN service
    AllOff(commands::control::BulkArgs),
}

fn main() {
    let cli = Cli::parse();

    init(match cli.log_format {
        LogFormat::Pretty => Profile::Development,
        LogFormat::Json => Profile::Production,
    });

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Watch(args) => commands::watch::execute(config, args),
        Commands::Status(args) => commands::status::execute(config, args),
        Commands::On(args) => commands::control::execute_on(config, args),
        Commands::Off(args) => commands::control::execute_off(config, args),
        Commands::AllOn(args) => commands::control::execute_all_on(config, args),
        Commands::AllOff(args) => commands::control::execute_all_off(config, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
