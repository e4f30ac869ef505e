use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::proxy::{DevServerRedirector, PathPrefix};

/// Proxy server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dev_server: DevServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default)]
    pub allow_lan_access: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            allow_lan_access: false,
        }
    }
}

impl ServerConfig {
    pub fn bind_host(&self) -> &str {
        if self.allow_lan_access {
            "0.0.0.0"
        } else {
            &self.host
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevServerConfig {
    /// Base URL of the development server, e.g. a Vite instance
    #[serde(default = "default_dev_server_url")]
    pub url: String,

    #[serde(default)]
    pub prefix: PathPrefix,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            url: default_dev_server_url(),
            prefix: PathPrefix::default(),
        }
    }
}

impl DevServerConfig {
    pub fn redirector(&self) -> DevServerRedirector {
        DevServerRedirector::new(self.url.clone(), self.prefix.clone())
    }

    /// True when `url` parses as an absolute URL.
    /// Redirects are served either way.
    pub fn has_absolute_url(&self) -> bool {
        reqwest::Url::parse(&self.url).is_ok()
    }
}

impl Config {
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// Default value functions
fn default_port() -> u16 { 8046 }
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_dev_server_url() -> String { "http://localhost:5173".to_string() }

/// Get default config file path
/// Uses ~/.config/devproxy/config.toml for Unix-like CLI experience
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("devproxy")
        .join("config.toml")
}

/// Load config from file, or return defaults if not found.
pub fn load_config(path: Option<PathBuf>) -> anyhow::Result<Config> {
    load_config_with_source(path).map(|(config, _)| config)
}

/// Load config and report which file it came from (`None` for defaults).
///
/// Loading order:
/// 1. Specified path (if provided)
/// 2. ./config.toml (if exists)
/// 3. default_config_path() (usually ~/.config/devproxy/config.toml)
pub fn load_config_with_source(path: Option<PathBuf>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    if let Some(config_path) = path {
        if config_path.exists() {
            let config = read_config(&config_path)?;
            tracing::info!("Loaded config from specified path {:?}", config_path);
            return Ok((config, Some(config_path)));
        } else {
            anyhow::bail!("Specified config file not found: {:?}", config_path);
        }
    }

    // Try current directory config.toml
    let local_config = PathBuf::from("config.toml");
    if local_config.exists() {
        match read_config(&local_config) {
            Ok(config) => {
                tracing::info!("Loaded config from current directory {:?}", local_config);
                return Ok((config, Some(local_config)));
            }
            Err(e) => {
                tracing::error!("Failed to load ./config.toml: {}. Falling back to default path.", e);
            }
        }
    }

    let default_path = default_config_path();
    if default_path.exists() {
        let config = read_config(&default_path)?;
        tracing::info!("Loaded config from default path {:?}", default_path);
        Ok((config, Some(default_path)))
    } else {
        tracing::info!("No config file found, using defaults");
        Ok((Config::default(), None))
    }
}

fn read_config(path: &Path) -> anyhow::Result<Config> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8046);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.dev_server.url, "http://localhost:5173");
        assert_eq!(config.dev_server.prefix.as_str(), "/dev/");
    }

    #[test]
    fn file_values_override_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            port = 9000
            allow_lan_access = true

            [dev_server]
            url = "http://127.0.0.1:3000"
            prefix = "/assets/dev/"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.bind_host(), "0.0.0.0");
        assert_eq!(config.dev_server.url, "http://127.0.0.1:3000");
        assert_eq!(config.dev_server.prefix.as_str(), "/assets/dev/");
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        let result = toml::from_str::<Config>("[dev_server]\nprefix = \"dev\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn redirector_uses_configured_values() {
        let config = DevServerConfig {
            url: "http://localhost:4000".to_string(),
            prefix: PathPrefix::new("/hot/").unwrap(),
        };
        let redirector = config.redirector();
        assert_eq!(redirector.dev_server(), "http://localhost:4000");
        assert_eq!(redirector.prefix().as_str(), "/hot/");
    }

    #[test]
    fn absolute_url_check() {
        assert!(DevServerConfig::default().has_absolute_url());

        let relative = DevServerConfig {
            url: "/static".to_string(),
            ..DevServerConfig::default()
        };
        assert!(!relative.has_absolute_url());

        let empty = DevServerConfig {
            url: String::new(),
            ..DevServerConfig::default()
        };
        assert!(!empty.has_absolute_url());
    }

    #[test]
    fn round_trips_through_toml() {
        let text = Config::default().to_toml().unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.dev_server.prefix, PathPrefix::default());
        assert_eq!(parsed.server.port, 8046);
    }

    #[test]
    fn root_prefix_is_rejected_in_file() {
        let result = toml::from_str::<Config>("[dev_server]\nprefix = \"/\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn explicit_path_is_reported_as_source() {
        let dir = std::env::temp_dir().join(format!("devproxy-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("custom.toml");
        std::fs::write(&path, "[server]\nport = 9100\n").unwrap();

        let (config, source) = load_config_with_source(Some(path.clone())).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();

        assert_eq!(config.server.port, 9100);
        assert_eq!(source, Some(path));
    }

    #[test]
    fn missing_explicit_path_is_an_error() {
        let path = std::env::temp_dir().join("devproxy-does-not-exist").join("config.toml");
        assert!(load_config(Some(path)).is_err());
    }
}
