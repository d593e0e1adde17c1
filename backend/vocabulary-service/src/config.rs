//! Configuration management for Vocabulary Service
//!
//! The signing secret must be byte-identical to the identity service's, or
//! every call will be rejected as unauthenticated.

use anyhow::{Context, Result};
use crypto_core::SigningSecret;
use std::env;
use tracing::info;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub credential_secret: SigningSecret,
    pub server: ServerSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load .env file in development
        if cfg!(debug_assertions) && dotenvy::dotenv().is_ok() {
            info!("Loaded .env file for development");
        }

        Ok(Settings {
            credential_secret: SigningSecret::from_env("CREDENTIAL_SECRET")
                .context("CREDENTIAL_SECRET must be set to at least 32 bytes")?,
            server: ServerSettings::from_env()?,
        })
    }
}

/// gRPC listener settings
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "50052".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}
