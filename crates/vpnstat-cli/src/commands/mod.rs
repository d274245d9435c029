pub mod control;
pub mod status;
pub mod watch;

use std::path::{Path, PathBuf};

use vpnstat_engine::errors::Result;
use vpnstat_engine::TrayConfig;

/// Load `path` if given, otherwise start from defaults
pub fn load_config(path: Option<&Path>) -> Result<TrayConfig> {
    match path {
        Some(path) => TrayConfig::load(path),
        None => Ok(TrayConfig::default()),
    }
}

/// Apply a `--conf-dir` override and re-validate
pub fn with_conf_dir(mut config: TrayConfig, conf_dir: Option<PathBuf>) -> Result<TrayConfig> {
    if let Some(dir) = conf_dir {
        config.conf_dir = dir;
    }
    config.validate()?;
    Ok(config)
}
