//! Gateway configuration: CLI + JSON file + environment variable resolution.
//!
//! Grounded on `facilitator/src/config.rs`'s `CliArgs`/`Config::load` shape
//! (clap for the config file path, serde defaults falling back to env vars)
//! and on `x402_types::config::LiteralOrEnv` for resolving secrets that may
//! be given as a literal or as a `$VAR`/`${VAR}` reference, so a signing key
//! never has to be written into the config file itself.

use std::fs;
use std::net::IpAddr;
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use alloy_primitives::{Address, B256};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(name = "ens-gateway")]
#[command(about = "Off-chain ENS resolver gateway (EIP-3668 / EIP-2544)")]
struct CliArgs {
    /// Path to the JSON configuration file.
    #[arg(long, short, env = "CONFIG", default_value = "config.json")]
    config: PathBuf,
}

/// A config value that may be a literal or a `$VAR`/`${VAR}` environment
/// variable reference, resolved once at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOrEnv<T>(T);

impl<T> LiteralOrEnv<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    fn parse_env_var_syntax(s: &str) -> Option<String> {
        if let Some(name) = s.strip_prefix("${").and_then(|s| s.strip_suffix('}')) {
            Some(name.to_string())
        } else if let Some(name) = s.strip_prefix('$') {
            if !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                Some(name.to_string())
            } else {
                None
            }
        } else {
            None
        }
    }
}

impl<T> Deref for LiteralOrEnv<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de, T> Deserialize<'de> for LiteralOrEnv<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let value = match Self::parse_env_var_syntax(&s) {
            Some(var_name) => std::env::var(&var_name).map_err(|_| {
                serde::de::Error::custom(format!(
                    "environment variable '{var_name}' not found (referenced as '{s}')"
                ))
            })?,
            None => s,
        };
        value
            .parse::<T>()
            .map(LiteralOrEnv)
            .map_err(|e| serde::de::Error::custom(format!("failed to parse value: {e}")))
    }
}

impl<T: Serialize> Serialize for LiteralOrEnv<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

pub mod config_defaults {
    use std::env;
    use std::net::IpAddr;

    pub const DEFAULT_PORT: u16 = 8080;
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    pub const DEFAULT_COIN_TYPE: u64 = 2147525868; // SLIP-44 Celo
    pub const DEFAULT_PARENT_SUFFIX: &str = ".sarafu.eth";

    pub fn default_port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn default_host() -> IpAddr {
        env::var("HOST")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(IpAddr::V4(DEFAULT_HOST.parse().unwrap()))
    }

    pub fn default_coin_type() -> u64 {
        DEFAULT_COIN_TYPE
    }

    pub fn default_parent_suffix() -> String {
        DEFAULT_PARENT_SUFFIX.to_string()
    }

    pub fn default_metrics_enabled() -> bool {
        false
    }
}

/// Gateway server configuration.
#[derive(Debug, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "config_defaults::default_port")]
    port: u16,
    #[serde(default = "config_defaults::default_host")]
    host: IpAddr,
    /// Deployment constant: the suffix this gateway mints subdomains under.
    #[serde(default = "config_defaults::default_parent_suffix")]
    parent_suffix: String,
    /// SLIP-44 coin type accepted for `addr(bytes32,uint256)`.
    #[serde(default = "config_defaults::default_coin_type")]
    coin_type: u64,
    /// The gateway's secp256k1 signing key, literal hex or `$ENV_VAR`.
    signing_key: LiteralOrEnv<B256>,
    /// Address recovered from AuthGate bearer tokens, literal hex or `$ENV_VAR`.
    verifying_address: LiteralOrEnv<Address>,
    /// Postgres connection string, literal or `$ENV_VAR`.
    database_url: LiteralOrEnv<String>,
    #[serde(default = "config_defaults::default_metrics_enabled")]
    metrics_enabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file at {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("failed to parse config file: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl GatewayConfig {
    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn parent_suffix(&self) -> &str {
        &self.parent_suffix
    }

    pub fn coin_type(&self) -> u64 {
        self.coin_type
    }

    pub fn signing_key(&self) -> B256 {
        *self.signing_key
    }

    pub fn verifying_address(&self) -> Address {
        *self.verifying_address
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }

    /// Loads configuration from the CLI-specified (or default) JSON file.
    pub fn load() -> Result<Self, ConfigError> {
        let cli_args = CliArgs::parse();
        let config_path = Path::new(&cli_args.config)
            .canonicalize()
            .map_err(|e| ConfigError::FileRead(cli_args.config, e))?;
        Self::load_from_path(config_path)
    }

    fn load_from_path(path: PathBuf) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(&path).map_err(|e| ConfigError::FileRead(path, e))?;
        let config: GatewayConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
