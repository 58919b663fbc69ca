use std::time::Duration;

use transpotrack_core::config::{AppConfig, ConfigError, ConfigProperties, PropertyMeta};

/// HTTP listener settings, under `transpotrack.server`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests running longer than this are answered with 408.
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigProperties for ServerConfig {
    fn prefix() -> &'static str {
        "transpotrack.server"
    }

    fn properties() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta::optional("transpotrack.server.host", "String", "bind address"),
            PropertyMeta::optional("transpotrack.server.port", "u16", "listen port"),
            PropertyMeta::optional("transpotrack.server.request_timeout_secs", "u64", ""),
        ]
    }

    fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let defaults = ServerConfig::default();
        let timeout_secs: u64 = config.get_or(
            "transpotrack.server.request_timeout_secs",
            defaults.request_timeout.as_secs(),
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                key: "transpotrack.server.request_timeout_secs".into(),
                message: "must be at least 1".into(),
            });
        }

        Ok(Self {
            host: config.get_or("transpotrack.server.host", defaults.host)?,
            port: config.get_or("transpotrack.server.port", defaults.port)?,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let server: ServerConfig = AppConfig::empty().section().unwrap();
        assert_eq!(server, ServerConfig::default());
        assert_eq!(server.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn reads_overrides() {
        let config = AppConfig::from_yaml_str(
            "transpotrack:\n  server:\n    port: 8080\n    request_timeout_secs: 5\n",
            "test",
        )
        .unwrap();
        let server: ServerConfig = config.section().unwrap();
        assert_eq!(server.port, 8080);
        assert_eq!(server.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let config =
            AppConfig::from_yaml_str("transpotrack:\n  server:\n    request_timeout_secs: 0\n", "test")
                .unwrap();
        assert!(matches!(
            config.section::<ServerConfig>(),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
