//! Configuration for the token server
//!
//! Configuration can be loaded from a TOML file and/or environment variables.
//! Environment variables win over the file; defaults fill the rest.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub const ENV_API_KEY: &str = "LIVEKIT_API_KEY";
pub const ENV_API_SECRET: &str = "LIVEKIT_API_SECRET";
pub const ENV_URL: &str = "LIVEKIT_URL";
pub const ENV_PUBLIC_URL: &str = "NEXT_PUBLIC_LIVEKIT_URL";
pub const ENV_TOKEN_TTL: &str = "LIVEKIT_TOKEN_TTL";
pub const ENV_HOST: &str = "TOKEN_SERVER_HOST";
pub const ENV_PORT: &str = "TOKEN_SERVER_PORT";
pub const ENV_CONFIG_PATH: &str = "TOKEN_SERVER_CONFIG";

/// Main configuration for the token server
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// LiveKit project credentials
    #[serde(default)]
    pub livekit: LiveKitConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// LiveKit project configuration
///
/// The three secrets stay optional here: a server without them still starts
/// and answers token requests with a fixed error.
#[derive(Clone, Serialize, Deserialize)]
pub struct LiveKitConfig {
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub api_secret: Option<String>,

    /// WebSocket URL of the LiveKit server, handed to the browser
    #[serde(default)]
    pub url: Option<String>,

    /// Token time-to-live in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
}

fn default_token_ttl() -> u64 {
    21_600 // 6 hours
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            url: None,
            token_ttl_seconds: default_token_ttl(),
        }
    }
}

impl fmt::Debug for LiveKitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            match value {
                Some(v) if !v.is_empty() => "<set>",
                _ => "<unset>",
            }
        }

        f.debug_struct("LiveKitConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_secret", &redact(&self.api_secret))
            .field("url", &self.url)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish()
    }
}

/// The three values needed to mint a token, all present and non-empty
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
    pub url: String,
}

impl LiveKitConfig {
    /// All three secrets, or the env var name of the first missing one
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        Ok(Credentials {
            api_key: required(&self.api_key, ENV_API_KEY)?,
            api_secret: required(&self.api_secret, ENV_API_SECRET)?,
            url: required(&self.url, ENV_URL)?,
        })
    }

    /// Env var names of every missing secret
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (&self.api_key, ENV_API_KEY),
            (&self.api_secret, ENV_API_SECRET),
            (&self.url, ENV_URL),
        ]
        .into_iter()
        .filter(|(value, _)| required(value, "").is_err())
        .map(|(_, name)| name)
        .collect()
    }
}

fn required(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v.clone()),
        _ => Err(ConfigError::Missing(name)),
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(e.to_string()))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config)
    }

    /// Load the file if it exists, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) if p.as_ref().exists() => Self::from_file(p)?,
            Some(p) => {
                tracing::warn!(
                    "Config file {} not found, using environment only",
                    p.as_ref().display()
                );
                Config::default()
            }
            None => Config::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Override fields from a variable lookup
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server
        if let Some(host) = lookup(ENV_HOST) {
            self.server.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid {}={}", ENV_PORT, port),
            }
        }

        // LiveKit
        if let Some(key) = lookup(ENV_API_KEY) {
            self.livekit.api_key = Some(key);
        }
        if let Some(secret) = lookup(ENV_API_SECRET) {
            self.livekit.api_secret = Some(secret);
        }
        // An empty LIVEKIT_URL still falls through to the public one
        if let Some(url) = lookup(ENV_URL)
            .filter(|url| !url.is_empty())
            .or_else(|| lookup(ENV_PUBLIC_URL))
        {
            self.livekit.url = Some(url);
        }
        if let Some(ttl) = lookup(ENV_TOKEN_TTL) {
            match ttl.parse() {
                Ok(t) => self.livekit.token_ttl_seconds = t,
                Err(_) => tracing::warn!("Ignoring invalid {}={}", ENV_TOKEN_TTL, ttl),
            }
        }
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0} is not set")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
        assert_eq!(config.livekit.token_ttl_seconds, 21_600);
        assert!(config.livekit.api_key.is_none());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
[server]
port = 8088

[livekit]
api_key = "APIfile"
api_secret = "file-secret"
url = "wss://example.livekit.cloud"
token_ttl_seconds = 600
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.livekit.api_key.as_deref(), Some("APIfile"));
        assert_eq!(config.livekit.token_ttl_seconds, 600);
    }

    #[test]
    fn test_load_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[livekit]\napi_key = \"APIfile\"\nurl = \"wss://file\"").unwrap();

        let mut config = Config::from_file(file.path()).unwrap();
        config.apply_env(env(&[(ENV_URL, "wss://env"), (ENV_PORT, "4000")]));

        assert_eq!(config.livekit.api_key.as_deref(), Some("APIfile"));
        assert_eq!(config.livekit.url.as_deref(), Some("wss://env"));
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_public_url_fallback() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_PUBLIC_URL, "wss://public")]));
        assert_eq!(config.livekit.url.as_deref(), Some("wss://public"));

        let mut config = Config::default();
        config.apply_env(env(&[(ENV_PUBLIC_URL, "wss://public"), (ENV_URL, "wss://private")]));
        assert_eq!(config.livekit.url.as_deref(), Some("wss://private"));
    }

    #[test]
    fn test_empty_url_falls_back_to_public() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_URL, ""), (ENV_PUBLIC_URL, "wss://public")]));
        assert_eq!(config.livekit.url.as_deref(), Some("wss://public"));
        assert!(config.livekit.credentials().is_err());

        config.livekit.api_key = Some("APIkey".to_string());
        config.livekit.api_secret = Some("secret".to_string());
        assert_eq!(config.livekit.credentials().unwrap().url, "wss://public");
    }

    #[test]
    fn test_invalid_numbers_ignored() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_PORT, "http"), (ENV_TOKEN_TTL, "-")]));
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.livekit.token_ttl_seconds, 21_600);
    }

    #[test]
    fn test_credentials_missing() {
        let mut config = Config::default();
        assert_eq!(
            config.livekit.credentials().err(),
            Some(ConfigError::Missing(ENV_API_KEY))
        );
        assert_eq!(
            config.livekit.missing(),
            vec![ENV_API_KEY, ENV_API_SECRET, ENV_URL]
        );

        config.apply_env(env(&[
            (ENV_API_KEY, "APIkey"),
            (ENV_API_SECRET, ""),
            (ENV_URL, "wss://x"),
        ]));
        assert_eq!(
            config.livekit.credentials().err(),
            Some(ConfigError::Missing(ENV_API_SECRET))
        );
        assert_eq!(config.livekit.missing(), vec![ENV_API_SECRET]);
    }

    #[test]
    fn test_credentials_present() {
        let mut config = Config::default();
        config.apply_env(env(&[
            (ENV_API_KEY, "APIkey"),
            (ENV_API_SECRET, "secret"),
            (ENV_URL, "wss://x"),
        ]));
        let creds = config.livekit.credentials().unwrap();
        assert_eq!(creds.api_key, "APIkey");
        assert_eq!(creds.url, "wss://x");
        assert!(config.livekit.missing().is_empty());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_API_SECRET, "super-secret-value")]));
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret-value"));
        assert!(printed.contains("<set>"));
    }
}
