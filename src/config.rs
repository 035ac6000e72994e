use anyhow::{Context, Result};
use std::env;
use std::net::{SocketAddr, ToSocketAddrs};
use std::time::Duration;

/// Service settings read from the environment.
///
/// - `HOST`: bind host (default `127.0.0.1`)
/// - `PORT`: bind port (default `8080`)
/// - `ANALYZE_DELAY_MS`: fixed wait before scoring an upload (default `0`)
/// - `GENERATOR_SEED`: optional seed for reproducible generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub analyze_delay: Duration,
    pub generator_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            analyze_delay: Duration::ZERO,
            generator_seed: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("invalid PORT {raw:?}"))?,
            None => defaults.port,
        };
        let analyze_delay = match lookup("ANALYZE_DELAY_MS") {
            Some(raw) => Duration::from_millis(
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid ANALYZE_DELAY_MS {raw:?}"))?,
            ),
            None => defaults.analyze_delay,
        };
        let generator_seed = lookup("GENERATOR_SEED")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("invalid GENERATOR_SEED {raw:?}"))
            })
            .transpose()?;

        Ok(ServerConfig {
            host,
            port,
            analyze_delay,
            generator_seed,
        })
    }

    /// Resolves `host:port`; `host` may be a name such as `localhost`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("cannot resolve bind address {}:{}", self.host, self.port))?
            .next()
            .with_context(|| format!("no address found for {}:{}", self.host, self.port))
    }
}
