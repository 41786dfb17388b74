//! Server configuration loading from file and environment variables.

use parlor_voice::{LiveKitConfig, API_KEY_ENV, API_SECRET_ENV, URL_ENV};
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use thiserror::Error;

/// Top-level server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server network settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Media service credentials and agent dispatch settings.
    #[serde(default)]
    pub livekit: LiveKitConfig,

    /// Per-client request limits.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Static demo page.
    #[serde(default)]
    pub client: ClientConfig,
}

/// Network configuration for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: IpAddr,

    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "parlor_server=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Requests allowed per client IP per 60-second window.
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Directory holding the built demo page. Served as the router fallback
    /// when it contains an `index.html`.
    #[serde(default = "default_client_dir")]
    pub dir: String,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1))
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_requests_per_minute() -> u32 {
    60
}

fn default_client_dir() -> String {
    "client/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            dir: default_client_dir(),
        }
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Loads configuration from a TOML file, falling back to defaults, then
/// applies overrides from the process environment.
///
/// Environment variable overrides:
/// - `PARLOR_HOST` overrides `server.host`
/// - `PARLOR_PORT` overrides `server.port`
/// - `PARLOR_LOG_LEVEL` overrides `logging.level`
/// - `PARLOR_LOG_JSON` overrides `logging.json` (set to "true" to enable)
/// - `PARLOR_RATE_LIMIT` overrides `rate_limit.requests_per_minute`
/// - `PARLOR_CLIENT_DIR` overrides `client.dir`
/// - `LIVEKIT_URL`, `LIVEKIT_API_KEY`, `LIVEKIT_API_SECRET` override the
///   matching `livekit` keys
///
/// Missing LiveKit credentials are not an error here: the server starts and
/// every bootstrap request reports the missing variable.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

/// Applies overrides read through `lookup`. Unparseable values are ignored.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(host) = lookup("PARLOR_HOST") {
        if let Ok(parsed) = host.parse() {
            config.server.host = parsed;
        }
    }
    if let Some(port) = lookup("PARLOR_PORT") {
        if let Ok(parsed) = port.parse() {
            config.server.port = parsed;
        }
    }
    if let Some(level) = lookup("PARLOR_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("PARLOR_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }
    if let Some(limit) = lookup("PARLOR_RATE_LIMIT") {
        if let Ok(parsed) = limit.parse() {
            config.rate_limit.requests_per_minute = parsed;
        }
    }
    if let Some(dir) = lookup("PARLOR_CLIENT_DIR") {
        config.client.dir = dir;
    }
    if let Some(url) = lookup(URL_ENV) {
        config.livekit.url = url;
    }
    if let Some(key) = lookup(API_KEY_ENV) {
        config.livekit.api_key = key;
    }
    if let Some(secret) = lookup(API_SECRET_ENV) {
        config.livekit.api_secret = secret;
    }
}
