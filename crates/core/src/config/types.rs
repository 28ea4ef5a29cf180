use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::external_catalog::RebrickableConfig;
use crate::resolver::DEFAULT_SET_ID;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub rebrickable: RebrickableConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Resolver configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Set served when a query resolves to nothing.
    #[serde(default = "default_set_id")]
    pub default_set_id: i32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_set_id: default_set_id(),
        }
    }
}

fn default_set_id() -> i32 {
    DEFAULT_SET_ID
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub rebrickable: SanitizedRebrickableConfig,
    pub resolver: ResolverConfig,
}

/// Sanitized Rebrickable config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRebrickableConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            rebrickable: SanitizedRebrickableConfig {
                base_url: config.rebrickable.base_url.clone(),
                api_key_configured: !config.rebrickable.api_key.is_empty(),
                timeout_secs: config.rebrickable.timeout_secs,
            },
            resolver: config.resolver.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000

[rebrickable]
api_key = "abc123"
base_url = "http://localhost:8000/api/v3"
timeout_secs = 5

[resolver]
default_set_id = 6080
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.rebrickable.api_key, "abc123");
        assert_eq!(config.rebrickable.timeout_secs, 5);
        assert_eq!(config.resolver.default_set_id, 6080);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let toml = r#"
[rebrickable]
api_key = "abc123"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.rebrickable.base_url, None);
        assert_eq!(config.rebrickable.timeout_secs, 30);
        assert_eq!(config.resolver.default_set_id, 8014);
    }

    #[test]
    fn test_deserialize_missing_rebrickable_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitized_config_hides_api_key() {
        let toml = r#"
[rebrickable]
api_key = "super-secret"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.rebrickable.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("super-secret"));
    }
}
