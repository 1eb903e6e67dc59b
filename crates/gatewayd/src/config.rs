//! Server configuration file
//!
//! Every section and key is optional:
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! request_timeout_secs = 30
//!
//! [limits]
//! max_peripherals_per_gateway = 10
//!
//! [storage]
//! seed_file = "seed.json"
//!
//! [logging]
//! filter = "gatewayd=info,gateway_api=info"
//! format = "json"
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use gateway_core::DEFAULT_MAX_PERIPHERALS;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    #[serde(default = "default_max_peripherals")]
    pub max_peripherals_per_gateway: usize,
}

fn default_max_peripherals() -> usize {
    DEFAULT_MAX_PERIPHERALS
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_peripherals_per_gateway: default_max_peripherals(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// JSON file applied to the empty store at startup
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directives. `RUST_LOG` takes precedence.
    #[serde(default)]
    pub filter: Option<String>,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl Config {
    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.limits.max_peripherals_per_gateway == 0 {
            bail!("limits.max_peripherals_per_gateway must be at least 1");
        }
        if self.server.request_timeout_secs == 0 {
            bail!("server.request_timeout_secs must be at least 1");
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .with_context(|| format!("Invalid listen address: {}", self.server.host))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.limits.max_peripherals_per_gateway, 10);
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_full_file() {
        let config = Config::from_toml_str(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9090
            request_timeout_secs = 5

            [limits]
            max_peripherals_per_gateway = 4

            [storage]
            seed_file = "data/seed.json"

            [logging]
            filter = "gatewayd=debug"
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:9090");
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.limits.max_peripherals_per_gateway, 4);
        assert_eq!(config.storage.seed_file, Some(PathBuf::from("data/seed.json")));
        assert_eq!(config.logging.filter.as_deref(), Some("gatewayd=debug"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = Config::from_toml_str("[server]\nport = 3000\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.request_timeout_secs, 30);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_toml_str("[limits]\nmax_peripherals_per_gateway = 0\n").is_err());
        assert!(Config::from_toml_str("[server]\nport = \"http\"\n").is_err());
        assert!(Config::from_toml_str("[server]\nprot = 1\n").is_err());
        assert!(Config::from_toml_str("[logging]\nformat = \"xml\"\n").is_err());

        let config = Config::from_toml_str("[server]\nhost = \"not a host\"\n").unwrap();
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = 7070").unwrap();
        assert_eq!(Config::load(file.path()).unwrap().server.port, 7070);

        let err = Config::load(Path::new("/nonexistent/gatewayd.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
