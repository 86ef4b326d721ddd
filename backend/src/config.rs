use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 4000;
pub const MIN_PORT: u16 = 1024;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("The port must be a valid number, got {0:?}")]
    InvalidPort(String),
    #[error("The port must be between 1024 and 65535, got {0}")]
    PortOutOfRange(u32),
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory the site is served from.
    pub root: PathBuf,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Port from the first CLI argument, the rest from the environment
    /// (`PORTFOLIO_ROOT`, `PORTFOLIO_HOST`).
    pub fn from_env(port_arg: Option<&str>) -> Result<Self, ConfigError> {
        Ok(Self {
            root: env::var("PORTFOLIO_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            host: env::var("PORTFOLIO_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_port(port_arg)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn parse_port(arg: Option<&str>) -> Result<u16, ConfigError> {
    let Some(raw) = arg else {
        return Ok(DEFAULT_PORT);
    };
    let port: u32 = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidPort(raw.to_string()))?;
    if port < u32::from(MIN_PORT) || port > u32::from(u16::MAX) {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(port as u16)
}
