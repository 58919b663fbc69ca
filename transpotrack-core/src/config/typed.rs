use super::{AppConfig, ConfigError};

/// Metadata about a single configuration property.
#[derive(Debug, Clone)]
pub struct PropertyMeta {
    /// Absolute key, e.g. `"transpotrack.database.pool_size"`.
    pub key: &'static str,
    /// Expected type, used in error messages.
    pub type_name: &'static str,
    /// Required properties have no default.
    pub required: bool,
    pub description: &'static str,
}

impl PropertyMeta {
    pub const fn required(key: &'static str, type_name: &'static str, description: &'static str) -> Self {
        Self {
            key,
            type_name,
            required: true,
            description,
        }
    }

    pub const fn optional(key: &'static str, type_name: &'static str, description: &'static str) -> Self {
        Self {
            key,
            type_name,
            required: false,
            description,
        }
    }

    /// The environment variable that overrides this property.
    pub fn env_var(&self) -> String {
        self.key.to_uppercase().replace('.', "_")
    }
}

/// A strongly-typed configuration section read from an [`AppConfig`].
///
/// ```ignore
/// impl ConfigProperties for ServerConfig {
///     fn prefix() -> &'static str { "transpotrack.server" }
///     fn properties() -> Vec<PropertyMeta> { vec![/* ... */] }
///     fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
///         Ok(ServerConfig { port: config.get_or("transpotrack.server.port", 5000)? })
///     }
/// }
/// ```
pub trait ConfigProperties: Sized {
    fn prefix() -> &'static str;

    fn properties() -> Vec<PropertyMeta>;

    fn from_config(config: &AppConfig) -> Result<Self, ConfigError>;
}
