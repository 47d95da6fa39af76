//! Environment configuration for the binaries

use crate::error::DialogError;
use crate::Result;
use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// `PORT`, then `API_PORT`, then 8080. Loads `.env` if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let raw = env::var("PORT").or_else(|_| env::var("API_PORT")).ok();
        Self::from_port_var(raw.as_deref())
    }

    fn from_port_var(raw: Option<&str>) -> Result<Self> {
        let port = match raw {
            None => DEFAULT_PORT,
            Some(value) => value.trim().parse::<u16>().map_err(|_| {
                DialogError::Config(format!("PORT must be a number between 0 and 65535, got '{}'", value))
            })?,
        };
        Ok(Self { port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Install the fmt subscriber with `RUST_LOG` filtering. Logs go to stderr.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
