//! Service control commands

use std::path::{Path, PathBuf};

use clap::Args;
use vpnstat_engine::commands::control::{turn_off, turn_off_all, turn_on, turn_on_all, BulkOutcome};
use vpnstat_engine::{ConfDirDiscovery, EntitySource, SystemctlManager, TrayConfig};

#[derive(Debug, Args)]
pub struct ServiceArgs {
    /// VPN name (the config file name without extension)
    pub name: String,
}

#[derive(Debug, Args)]
pub struct BulkArgs {
    /// Directory holding one `<name>.<ext>` file per VPN
    #[arg(long)]
    pub conf_dir: Option<PathBuf>,
}

pub fn execute_on(config: Option<&Path>, args: ServiceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::with_conf_dir(super::load_config(config)?, None)?;
    let services = SystemctlManager::new(config.unit_template.clone());
    turn_on(&services, &args.name)?;
    println!("Started {}", services.unit_for(&args.name));
    Ok(())
}

pub fn execute_off(config: Option<&Path>, args: ServiceArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::with_conf_dir(super::load_config(config)?, None)?;
    let services = SystemctlManager::new(config.unit_template.clone());
    turn_off(&services, &args.name)?;
    println!("Stopped {}", services.unit_for(&args.name));
    Ok(())
}

pub fn execute_all_on(config: Option<&Path>, args: BulkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::with_conf_dir(super::load_config(config)?, args.conf_dir)?;
    let (services, names) = discover(&config)?;
    report("Started", turn_on_all(&services, &names))
}

pub fn execute_all_off(config: Option<&Path>, args: BulkArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::with_conf_dir(super::load_config(config)?, args.conf_dir)?;
    let (services, names) = discover(&config)?;
    report("Stopped", turn_off_all(&services, &names))
}

fn discover(
    config: &TrayConfig,
) -> Result<(SystemctlManager, Vec<String>), Box<dyn std::error::Error>> {
    let names = ConfDirDiscovery::new(&config.conf_dir, &config.conf_extension).discover()?;
    Ok((SystemctlManager::new(config.unit_template.clone()), names))
}

fn report(verb: &str, outcome: BulkOutcome) -> Result<(), Box<dyn std::error::Error>> {
    for name in &outcome.succeeded {
        println!("{} {}", verb, name);
    }
    for (name, err) in &outcome.failed {
        eprintln!("Failed {}: {}", name, err);
    }
    if outcome.is_success() {
        Ok(())
    } else {
        let summary = outcome.summary();
        Err(format!(
            "{} of {} services failed",
            summary.failed,
            summary.failed + summary.succeeded
        )
        .into())
    }
}
