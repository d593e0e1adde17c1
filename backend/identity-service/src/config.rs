//! Configuration management for Identity Service
//!
//! Loads settings from environment variables, with a `.env` file in
//! development builds.
//!
//! # Example
//!
//! ```no_run
//! use identity_service::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     println!("Credential TTL: {:?}", settings.credential.ttl);
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use crypto_core::SigningSecret;
use std::env;
use std::time::Duration;
use tracing::info;

/// Application settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub credential: CredentialSettings,
    pub server: ServerSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Load .env file in development
        if cfg!(debug_assertions) && dotenvy::dotenv().is_ok() {
            info!("Loaded .env file for development");
        }

        Ok(Settings {
            credential: CredentialSettings::from_env()?,
            server: ServerSettings::from_env()?,
        })
    }
}

/// Credential signing settings
#[derive(Debug, Clone)]
pub struct CredentialSettings {
    pub secret: SigningSecret,
    pub ttl: Duration,
}

impl CredentialSettings {
    fn from_env() -> Result<Self> {
        let secret = SigningSecret::from_env("CREDENTIAL_SECRET")
            .context("CREDENTIAL_SECRET must be set to at least 32 bytes")?;

        let ttl_hours: u64 = env::var("CREDENTIAL_TTL_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .context("Invalid CREDENTIAL_TTL_HOURS")?;
        if ttl_hours == 0 {
            anyhow::bail!("CREDENTIAL_TTL_HOURS must be positive");
        }

        Ok(Self {
            secret,
            ttl: Duration::from_secs(ttl_hours * 3600),
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
                .unwrap_or_else(|_| "50051".to_string())
                .parse()
                .context("Invalid SERVER_PORT")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const SECRET: &str = "identity-config-test-secret-0123456789ab";

    fn reset_env() {
        for var in [
            "CREDENTIAL_SECRET",
            "CREDENTIAL_TTL_HOURS",
            "SERVER_HOST",
            "SERVER_PORT",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        reset_env();
        env::set_var("CREDENTIAL_SECRET", SECRET);

        let credential = CredentialSettings::from_env().unwrap();
        let server = ServerSettings::from_env().unwrap();

        assert_eq!(credential.ttl, Duration::from_secs(24 * 3600));
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 50051);
        reset_env();
    }

    #[test]
    #[serial]
    fn test_missing_secret_is_fatal() {
        reset_env();
        assert!(CredentialSettings::from_env().is_err());
    }

    #[test]
    #[serial]
    fn test_weak_secret_is_fatal() {
        reset_env();
        env::set_var("CREDENTIAL_SECRET", "short");
        assert!(CredentialSettings::from_env().is_err());
        reset_env();
    }

    #[test]
    #[serial]
    fn test_invalid_ttl() {
        reset_env();
        env::set_var("CREDENTIAL_SECRET", SECRET);
        env::set_var("CREDENTIAL_TTL_HOURS", "0");
        assert!(CredentialSettings::from_env().is_err());

        env::set_var("CREDENTIAL_TTL_HOURS", "one day");
        assert!(CredentialSettings::from_env().is_err());
        reset_env();
    }
}
