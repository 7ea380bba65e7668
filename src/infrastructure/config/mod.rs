use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Environment variable prefix for every setting, e.g. `NAME_PICKER_PORT`.
pub const ENV_PREFIX: &str = "NAME_PICKER_";

/// Overrides the location of the TOML config file.
pub const CONFIG_PATH_VAR: &str = "NAME_PICKER_CONFIG";

pub const DEFAULT_CONFIG_FILE: &str = "name-picker.toml";

/// 16 MiB, the largest upload or JSON body accepted.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            log_level: "info".to_string(),
            permissive_cors: false,
        }
    }
}

impl ServerConfig {
    /// Defaults, then the TOML file (if present), then `NAME_PICKER_*` env vars.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::figment(&path).extract::<Self>()?.validated()
    }

    pub fn figment(path: &str) -> Figment {
        Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
    }

    fn validated(self) -> Result<Self> {
        if self.port == 0 {
            return Err(AppError::Config("port must be non-zero".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(AppError::Config(
                "max_upload_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
