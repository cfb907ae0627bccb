//! Environment configuration for the gateway binary.
//!
//! The contract is deliberately small: a bind address, the session
//! secret, and the endpoint/key pairs addressing the hosted database
//! and storage services.

use std::env;
use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_BUCKET: &str = "avatars";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
    #[error("invalid bind address: {0}")]
    BindAddr(#[from] std::net::AddrParseError),
}

/// Hosted bucket endpoint and credentials.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub endpoint: String,
    pub api_key: String,
    pub bucket: String,
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    pub session_secret: String,
    pub database_url: Option<String>,
    pub storage: Option<StorageConfig>,
}

impl GatewayConfig {
    /// Read configuration from the environment.
    ///
    /// `VISAGE_SESSION_SECRET` is required; storage and database
    /// settings are optional and fall back to in-memory backends.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("VISAGE_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse()?;
        let session_secret = env::var("VISAGE_SESSION_SECRET")
            .map_err(|_| ConfigError::Missing("VISAGE_SESSION_SECRET"))?;
        let database_url = env::var("DATABASE_URL").ok();

        let storage = match (
            env::var("VISAGE_STORAGE_URL").ok(),
            env::var("VISAGE_STORAGE_KEY").ok(),
        ) {
            (Some(endpoint), Some(api_key)) => Some(StorageConfig {
                endpoint,
                api_key,
                bucket: env::var("VISAGE_STORAGE_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.into()),
            }),
            _ => None,
        };

        Ok(Self {
            bind_addr,
            session_secret,
            database_url,
            storage,
        })
    }
}
