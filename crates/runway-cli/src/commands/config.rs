//! Configuration command implementations

use std::path::Path;

use anyhow::Result;
use runway_core::config::default_config_path;
use runway_core::RunwayConfig;

pub fn cmd_config_show(config: &RunwayConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path(explicit: Option<&Path>) -> Result<()> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => default_config_path(),
    };

    match path {
        Some(path) => {
            let state = if path.exists() {
                "in use"
            } else {
                "not present, using built-in defaults"
            };
            println!("{} ({})", path.display(), state);
        }
        None => println!("No data directory available; using built-in defaults"),
    }

    Ok(())
}
