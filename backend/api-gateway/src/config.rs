//! Gateway configuration
//!
//! The gateway holds no signing secret. It only needs to know where to
//! listen and where its peers are.

use anyhow::{Context, Result};
use grpc_contracts::GrpcConfig;
use std::env;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub grpc: GrpcConfig,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        if cfg!(debug_assertions) && dotenvy::dotenv().is_ok() {
            info!("Loaded .env file for development");
        }

        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "8080".to_string())
                    .parse()
                    .context("Invalid SERVER_PORT")?,
            },
            grpc: GrpcConfig::from_env(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults() {
        env::remove_var("SERVER_HOST");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_invalid_port() {
        env::set_var("SERVER_PORT", "99999");
        assert!(Config::from_env().is_err());
        env::remove_var("SERVER_PORT");
    }
}
