//! Run configuration
//!
//! Values are layered, later layers winning:
//! 1. built-in defaults
//! 2. a YAML config file (`--config`)
//! 3. `INSPECTIONS_*` environment variables (a dotenv file is sourced first)
//! 4. command line flags
//!
//! Example config file:
//! ```yaml
//! source: data/nyc_test.csv
//! output_dir: database/add_data
//! city: ny
//! state: ny
//! ```

use crate::error::Error;
use eyre::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ENV_SOURCE: &str = "INSPECTIONS_SOURCE";
pub const ENV_OUTPUT_DIR: &str = "INSPECTIONS_OUTPUT_DIR";
pub const ENV_CITY: &str = "INSPECTIONS_CITY";
pub const ENV_STATE: &str = "INSPECTIONS_STATE";

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// CSV file to read
    pub source: PathBuf,
    /// Directory receiving the `insert_*.sql` files
    pub output_dir: PathBuf,
    /// City label applied to every address
    pub city: String,
    /// State label applied to every address
    pub state: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from("data/nyc_test.csv"),
            output_dir: PathBuf::from("./database/add_data"),
            city: "ny".to_string(),
            state: "ny".to_string(),
        }
    }
}

/// One configuration layer; unset fields fall through to the layer below
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub source: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub city: Option<String>,
    pub state: Option<String>,
}

impl ConfigLayer {
    /// Read a layer from a YAML file
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let layer = serde_yaml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;

        Ok(layer)
    }

    /// Read a layer from the `INSPECTIONS_*` environment variables
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        Self {
            source: var(ENV_SOURCE).map(PathBuf::from),
            output_dir: var(ENV_OUTPUT_DIR).map(PathBuf::from),
            city: var(ENV_CITY),
            state: var(ENV_STATE),
        }
    }
}

impl Config {
    /// Apply a layer on top of this configuration
    pub fn merge(self, layer: ConfigLayer) -> Self {
        Self {
            source: layer.source.unwrap_or(self.source),
            output_dir: layer.output_dir.unwrap_or(self.output_dir),
            city: layer.city.unwrap_or(self.city),
            state: layer.state.unwrap_or(self.state),
        }
    }

    /// Resolve defaults → config file → environment → CLI flags
    ///
    /// # Errors
    /// Fails if the config file cannot be read or parsed, or the result has an
    /// empty source or output path.
    pub fn resolve(config_file: Option<&Path>, cli: ConfigLayer) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = config_file {
            log::debug!("Loading config file {}", path.display());
            config = config.merge(ConfigLayer::read(path)?);
        }

        let config = config.merge(ConfigLayer::from_env()).merge(cli);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.as_os_str().is_empty() {
            return Err(Error::config("source path is empty").into());
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::config("output directory is empty").into());
        }
        Ok(())
    }
}
