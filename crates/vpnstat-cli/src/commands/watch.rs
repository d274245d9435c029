//! Continuous polling command

use std::path::{Path, PathBuf};

use clap::Args;
use vpnstat_core::StdoutSink;
use vpnstat_engine::Poller;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Directory holding one `<name>.<ext>` file per VPN
    #[arg(long)]
    pub conf_dir: Option<PathBuf>,

    /// Seconds between polls
    #[arg(long)]
    pub interval: Option<u64>,

    /// Minimum seconds between unconditional status tables
    #[arg(long)]
    pub summary_interval: Option<u64>,

    /// Stop after this many polls
    #[arg(long)]
    pub ticks: Option<u64>,
}

pub fn execute(config: Option<&Path>, args: WatchArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = super::load_config(config)?;
    if let Some(interval) = args.interval {
        config.poll_interval_seconds = interval;
    }
    if let Some(summary) = args.summary_interval {
        config.status.summary_interval_seconds = summary;
    }
    let config = super::with_conf_dir(config, args.conf_dir)?;

    tracing::info!(
        conf_dir = %config.conf_dir.display(),
        poll_interval_seconds = config.poll_interval_seconds,
        summary_interval_seconds = config.status.summary_interval_seconds,
        "Watching VPN services"
    );

    let mut poller = Poller::from_config(&config);
    let mut sink = StdoutSink;
    poller.run(&mut sink, args.ticks);
    Ok(())
}
