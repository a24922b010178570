use anyhow::Context;
use serde::Deserialize;

use crate::version;

/// Env var overriding `endpoint.token`, so the token can stay out of the config file.
pub const TOKEN_ENV: &str = "AGENT_METRICS_TOKEN";
/// Read from the working directory when `CONFIG_FILE` is unset; a missing file means defaults.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";
/// Env var overriding `endpoint.url`.
pub const ENDPOINT_ENV: &str = "AGENT_METRICS_ENDPOINT";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub exporter: ExporterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub token: String,
    #[serde(default = "version::default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout for the HTTP client.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "https://agent.buildkite.com/v3".into()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            token: String::new(),
            user_agent: version::default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Queues to collect individually; empty collects fleet totals and every queue.
    #[serde(default)]
    pub queues: Vec<String>,
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    30
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            queues: Vec::new(),
            interval_secs: default_interval_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExporterConfig {
    /// When false the binary only logs each result.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    9090
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            host: default_host(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    /// Reads `CONFIG_FILE` (or `config.toml` if it exists), applies env overrides, validates.
    pub fn load() -> anyhow::Result<Self> {
        let s = match std::env::var("CONFIG_FILE") {
            Ok(path) => {
                std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?
            }
            Err(_) => match std::fs::read_to_string(DEFAULT_CONFIG_PATH) {
                Ok(s) => s,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
                Err(e) => {
                    return Err(e).with_context(|| format!("reading {}", DEFAULT_CONFIG_PATH));
                }
            },
        };
        let mut config: AppConfig = toml::from_str(&s)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests). Env is not consulted.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var(TOKEN_ENV)
            && !token.is_empty()
        {
            self.endpoint.token = token;
        }
        if let Ok(url) = std::env::var(ENDPOINT_ENV)
            && !url.is_empty()
        {
            self.endpoint.url = url;
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.endpoint.url.starts_with("http://") || self.endpoint.url.starts_with("https://"),
            "endpoint.url must start with http:// or https://, got {:?}",
            self.endpoint.url
        );
        anyhow::ensure!(
            !self.endpoint.token.is_empty(),
            "endpoint.token must be non-empty (or set {})",
            TOKEN_ENV
        );
        anyhow::ensure!(
            !self.endpoint.user_agent.is_empty(),
            "endpoint.user_agent must be non-empty"
        );
        anyhow::ensure!(
            self.endpoint.timeout_secs > 0,
            "endpoint.timeout_secs must be > 0, got {}",
            self.endpoint.timeout_secs
        );
        anyhow::ensure!(
            self.collector.interval_secs > 0,
            "collector.interval_secs must be > 0, got {}",
            self.collector.interval_secs
        );
        anyhow::ensure!(
            self.collector.queues.iter().all(|q| !q.trim().is_empty()),
            "collector.queues must not contain empty names"
        );
        if self.exporter.enabled {
            anyhow::ensure!(
                self.exporter.port > 0,
                "exporter.port must be between 1 and 65535, got {}",
                self.exporter.port
            );
        }
        Ok(())
    }
}
