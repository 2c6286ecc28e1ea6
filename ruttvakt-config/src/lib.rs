//! # Ruttvakt Configuration
//!
//! Layered configuration for the route monitor: defaults, then the base
//! YAML file, then environment-specific overrides, then `RUTTVAKT_*`
//! environment variables, validated as one unit after merging.

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod capture;
mod core;
mod error;

pub use capture::CaptureConfig;
pub use core::{CoreConfig, EventBusConfig};
pub use error::ConfigError;

/// Top-level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default)]
pub struct RuttvaktConfig {
    /// Event bus sizing and worker pool.
    #[validate(nested)]
    pub core: CoreConfig,

    /// Kernel read-loop parameters.
    #[validate(nested)]
    pub capture: CaptureConfig,
}

impl RuttvaktConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/ruttvakt.yaml` - base settings; defaults if missing.
    /// 3. `config/<environment>.yaml` - environment-specific overrides.
    /// 4. `RUTTVAKT_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(RuttvaktConfig::default()));

        if Path::new("config/ruttvakt.yaml").exists() {
            figment = figment.merge(Yaml::file("config/ruttvakt.yaml"));
        }

        let env = std::env::var("RUTTVAKT_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        figment
            .merge(Env::prefixed("RUTTVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(RuttvaktConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("RUTTVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
