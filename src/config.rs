//! Startup configuration: where the data file lives and how loud to log.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::ConfigError;

const DATA_FILE_NAME: &str = "tasks.txt";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl Config {
    /// Reads a TOML config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Data file from, in order: the explicit override, the config file, the
    /// platform data directory.
    pub fn data_file(&self, explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(path) = explicit.or_else(|| self.data_file.clone()) {
            return Ok(path);
        }
        default_data_file()
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "taskline", "taskline")
}

pub fn default_config_file() -> Result<PathBuf, ConfigError> {
    let proj = project_dirs().ok_or(ConfigError::NoProjectDir("config"))?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn default_data_file() -> Result<PathBuf, ConfigError> {
    let proj = project_dirs().ok_or(ConfigError::NoProjectDir("data"))?;
    Ok(proj.data_dir().join(DATA_FILE_NAME))
}
