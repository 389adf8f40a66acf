use crate::error::Result;
use crate::format::Format;
use std::env;
use std::path::PathBuf;

/// Environment variable naming the user's home directory
pub const ENV_HOME: &str = "HOME";

#[derive(Debug, Clone)]
pub struct Config {
    pub registry_name: String,
    pub base_dir: PathBuf,
    pub default_format: Format,
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let registry_name =
            env::var("CSTORE_REGISTRY_NAME").unwrap_or_else(|_| "cstore".to_string());

        // Fall back to ~/.cstore, or ./data when there is no home directory
        let base_dir = env::var("CSTORE_BASE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_base_dir());

        let default_format = env::var("CSTORE_DEFAULT_FORMAT")
            .unwrap_or_else(|_| "json".to_string())
            .parse::<Format>()?;

        let log_dir = env::var("LOG_DIR").ok().map(PathBuf::from);

        Ok(Config {
            registry_name,
            base_dir,
            default_format,
            log_dir,
        })
    }
}

fn default_base_dir() -> PathBuf {
    match env::var(ENV_HOME) {
        Ok(home) if !home.is_empty() => PathBuf::from(home).join(".cstore"),
        _ => PathBuf::from("./data"),
    }
}
