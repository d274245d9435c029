//! One-shot status command

use std::path::{Path, PathBuf};

use clap::Args;
use vpnstat_core::{MemorySink, StdoutSink};
use vpnstat_engine::Poller;

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Directory holding one `<name>.<ext>` file per VPN
    #[arg(long)]
    pub conf_dir: Option<PathBuf>,

    /// Print the snapshot as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn execute(config: Option<&Path>, args: StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::with_conf_dir(super::load_config(config)?, args.conf_dir)?;
    let mut poller = Poller::from_config(&config);

    if args.json {
        let outcome = poller.try_tick(&mut MemorySink::new())?;
        let body = serde_json::json!({
            "entities": poller.store().current_snapshot(),
            "indicator": outcome.indicator,
            "tooltip": outcome.indicator.tooltip(),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        let outcome = poller.try_tick(&mut StdoutSink)?;
        println!("{}", outcome.indicator.tooltip());
    }
    Ok(())
}
