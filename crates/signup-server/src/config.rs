//! Server configuration
//!
//! Settings come from `SIGNUP_*` environment variables on top of defaults.

use serde::Deserialize;
use signup_core::SignupError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;

const ENV_PREFIX: &str = "SIGNUP";

/// Which backend holds submissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
    pub storage: StorageBackend,
    pub database_path: String,
    /// Built frontend served for every non-API path
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Load from the process environment
    pub fn load() -> signup_core::Result<Self> {
        Self::from_source(None)
    }

    /// `vars` replaces the process environment when set
    fn from_source(vars: Option<HashMap<String, String>>) -> signup_core::Result<Self> {
        let config: Self = ::config::Config::builder()
            .set_default("bind_address", "0.0.0.0:5000")
            .and_then(|b| b.set_default("storage", "memory"))
            .and_then(|b| b.set_default("database_path", "data/signup.db"))
            .map_err(|e| SignupError::Config(e.to_string()))?
            .add_source(::config::Environment::with_prefix(ENV_PREFIX).source(vars))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| SignupError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn socket_addr(&self) -> signup_core::Result<SocketAddr> {
        self.bind_address.parse().map_err(|_| {
            SignupError::Config(format!("Invalid bind address: {}", self.bind_address))
        })
    }

    fn validate(&self) -> signup_core::Result<()> {
        self.socket_addr()?;

        if self.storage == StorageBackend::Sqlite && self.database_path.trim().is_empty() {
            return Err(SignupError::Config(
                "database_path must be set when storage is sqlite".to_string(),
            ));
        }

        if let Some(dir) = &self.static_dir {
            if dir.as_os_str().to_string_lossy().trim().is_empty() {
                return Err(SignupError::Config(
                    "static_dir must not be empty when set".to_string(),
                ));
            }
        }

        Ok(())
    }
}
