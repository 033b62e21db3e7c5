//! Opt-in file logging.
//!
//! The terminal belongs to the UI, so logs go to a file and only when
//! `DOTFIELD_LOG` holds an `env_logger` filter (e.g. `debug`).

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "DOTFIELD_LOG";

/// Where log output is written.
pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "dotfield").map(|dirs| dirs.data_dir().join("dotfield.log"))
}

/// Install the logger if `DOTFIELD_LOG` is set.
pub fn init() -> Result<()> {
    let Ok(filter) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let Some(path) = log_path() else {
        return Ok(());
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .wrap_err_with(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::new()
        .parse_filters(&filter)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .wrap_err("failed to install logger")?;

    log::info!("logging to {}", path.display());
    Ok(())
}
