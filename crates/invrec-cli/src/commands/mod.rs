//! CLI subcommands.

pub mod extract;
pub mod reconcile;

use std::path::Path;

use invrec_core::InvrecConfig;

/// Load the config file when given, defaults otherwise.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<InvrecConfig> {
    match config_path {
        Some(path) => Ok(InvrecConfig::from_file(Path::new(path))?),
        None => Ok(InvrecConfig::default()),
    }
}
