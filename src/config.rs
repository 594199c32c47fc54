//! Service configuration from command-line flags and environment variables.
//!
//! Flags win over environment variables, which win over the defaults.

use anyhow::{Context, Result, anyhow, bail};
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_STORE_URL: &str = "http://localhost:9200";
pub const DEFAULT_INDEX: &str = "plants";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

pub const USAGE: &str = "Usage: linneo [--bind <addr:port>] [--store elastic|memory] \
[--store-url <url>] [--index <name>] [--timeout-ms <millis>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Elastic,
    Memory,
}

impl std::str::FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "elastic" | "elasticsearch" => Ok(StoreKind::Elastic),
            "memory" => Ok(StoreKind::Memory),
            other => Err(anyhow!("unknown store kind: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreKind,
    pub store_url: String,
    pub index: String,
    pub store_timeout: Duration,
}

impl Config {
    /// Loads the configuration from the process arguments and environment.
    pub fn load(args: &[String]) -> Result<Config> {
        Self::from_sources(args, |key| std::env::var(key).ok())
    }

    /// Builds the configuration from `args` (program name first) and an
    /// environment lookup.
    pub fn from_sources<E>(args: &[String], env: E) -> Result<Config>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut bind = env("LINNEO_BIND");
        let mut store = env("LINNEO_STORE");
        let mut store_url = env("LINNEO_STORE_URL");
        let mut index = env("LINNEO_INDEX");
        let mut timeout_ms = env("LINNEO_TIMEOUT_MS");

        let mut i = 1;
        while i < args.len() {
            let slot = match args[i].as_str() {
                "--bind" => &mut bind,
                "--store" => &mut store,
                "--store-url" => &mut store_url,
                "--index" => &mut index,
                "--timeout-ms" => &mut timeout_ms,
                other => bail!("unknown argument: {}\n{}", other, USAGE),
            };
            let value = args
                .get(i + 1)
                .ok_or_else(|| anyhow!("missing value for {}\n{}", args[i], USAGE))?;
            *slot = Some(value.clone());
            i += 2;
        }

        let bind_addr: SocketAddr = bind
            .as_deref()
            .unwrap_or(DEFAULT_BIND)
            .parse()
            .context("invalid bind address")?;
        let store: StoreKind = store.as_deref().unwrap_or("elastic").parse()?;
        let store_url = store_url.unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
        let index = index.unwrap_or_else(|| DEFAULT_INDEX.to_string());
        if index.trim().is_empty() {
            bail!("index name must not be empty");
        }
        let timeout_ms: u64 = match timeout_ms {
            Some(raw) => raw.parse().context("invalid store timeout")?,
            None => DEFAULT_TIMEOUT_MS,
        };
        if timeout_ms == 0 {
            bail!("store timeout must be positive");
        }

        Ok(Config {
            bind_addr,
            store,
            store_url,
            index,
            store_timeout: Duration::from_millis(timeout_ms),
        })
    }
}
