use std::env;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use folio::config::{read_config, Config};

use crate::config_data::write_sample_cfg;

fn get_config_path(file_name: &str) -> Option<PathBuf> {
    let exe_dir = env::current_exe().ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cur_dir = env::current_dir().ok();

    [exe_dir, cur_dir, dirs::config_dir()]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(file_name))
        .find(|path| path.exists())
}

pub(crate) fn open_config(cfg_path: Option<PathBuf>, file_name: &str) -> Result<Config, String> {
    let config_path = match cfg_path.or_else(|| get_config_path(file_name)) {
        None => return Err(format!("Could not find {}", file_name)),
        Some(x) => x,
    };

    println!("Reading config from {}", config_path.display());
    let config = match read_config(&config_path) {
        Ok(config) => config,
        Err(e) => return Err(e.to_string()),
    };

    match config.log {
        Some(ref log) => match log.location {
            Some(ref location) => println!("Log enabled. Files will be written in {}", location.display()),
            None => println!("Log enabled. Using stdout"),
        },
        None => println!("Log disabled. Using stdout"),
    }

    Ok(config)
}

pub(crate) fn generate_cfg(config_path: Option<&Path>, file_name: &str) -> Result<PathBuf> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not find user config dir"))?
            .join(file_name),
    };

    write_sample_cfg(&path)
        .with_context(|| format!("Error writing sample config to {}", path.display()))?;
    Ok(path)
}
