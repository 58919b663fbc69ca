use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;
use transpotrack_core::config::{AppConfig, ConfigError, ConfigProperties, PropertyMeta};

/// Connection settings for the service account, under `transpotrack.database`.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub pool_size: u32,
    pub acquire_timeout: Duration,
    pub statement_timeout: Duration,
    /// Bound on opening a credential-verification connection.
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("pool_size", &self.pool_size)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn new(name: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            name: name.into(),
            user: user.into(),
            password: password.into(),
            pool_size: 5,
            acquire_timeout: Duration::from_millis(5_000),
            statement_timeout: Duration::from_millis(30_000),
            connect_timeout: Duration::from_millis(5_000),
        }
    }

    /// Options for the pooled service-account connections.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        self.connect_options_as(&self.user, &self.password)
    }

    /// Same server and schema, authenticated as another account.
    pub fn connect_options_as(&self, user: &str, password: &str) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(user)
            .password(password)
    }
}

impl ConfigProperties for DatabaseConfig {
    fn prefix() -> &'static str {
        "transpotrack.database"
    }

    fn properties() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta::optional("transpotrack.database.host", "String", "MySQL host"),
            PropertyMeta::optional("transpotrack.database.port", "u16", "MySQL port"),
            PropertyMeta::required("transpotrack.database.name", "String", "schema name"),
            PropertyMeta::required("transpotrack.database.user", "String", "service account user"),
            PropertyMeta::optional("transpotrack.database.password", "String", "service account password"),
            PropertyMeta::optional("transpotrack.database.pool_size", "u32", "pooled connections"),
            PropertyMeta::optional("transpotrack.database.acquire_timeout_ms", "u64", ""),
            PropertyMeta::optional("transpotrack.database.statement_timeout_ms", "u64", ""),
            PropertyMeta::optional("transpotrack.database.connect_timeout_ms", "u64", ""),
        ]
    }

    fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let defaults = DatabaseConfig::new("", "", "");
        let pool_size: u32 = config.get_or("transpotrack.database.pool_size", defaults.pool_size)?;
        if pool_size == 0 {
            return Err(ConfigError::Invalid {
                key: "transpotrack.database.pool_size".into(),
                message: "must be at least 1".into(),
            });
        }

        Ok(Self {
            host: config.get_or("transpotrack.database.host", defaults.host)?,
            port: config.get_or("transpotrack.database.port", defaults.port)?,
            name: config.get("transpotrack.database.name")?,
            user: config.get("transpotrack.database.user")?,
            password: config
                .get_or::<Option<String>>("transpotrack.database.password", None)?
                .unwrap_or_default(),
            pool_size,
            acquire_timeout: config
                .get_or("transpotrack.database.acquire_timeout_ms", defaults.acquire_timeout)?,
            statement_timeout: config
                .get_or("transpotrack.database.statement_timeout_ms", defaults.statement_timeout)?,
            connect_timeout: config
                .get_or("transpotrack.database.connect_timeout_ms", defaults.connect_timeout)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transpotrack_core::config::validate_section;

    #[test]
    fn defaults_fill_optional_keys() {
        let config = AppConfig::from_yaml_str(
            "transpotrack:\n  database:\n    name: transpotrack\n    user: svc\n",
            "test",
        )
        .unwrap();
        let db: DatabaseConfig = config.section().unwrap();
        assert_eq!(db.host, "localhost");
        assert_eq!(db.port, 3306);
        assert_eq!(db.pool_size, 5);
        assert_eq!(db.password, "");
        assert_eq!(db.statement_timeout, Duration::from_secs(30));
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let config = AppConfig::from_yaml_str(
            "transpotrack:\n  database:\n    name: t\n    user: u\n    pool_size: 0\n",
            "test",
        )
        .unwrap();
        let err = validate_section::<DatabaseConfig>(&config).unwrap_err();
        assert_eq!(err.errors[0].key, "transpotrack.database.pool_size");
    }

    #[test]
    fn missing_credentials_are_reported_together() {
        let err = validate_section::<DatabaseConfig>(&AppConfig::empty()).unwrap_err();
        let keys: Vec<_> = err.errors.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, ["transpotrack.database.name", "transpotrack.database.user"]);
        assert_eq!(err.errors[1].env_hint, "TRANSPOTRACK_DATABASE_USER");
    }

    #[test]
    fn debug_hides_password() {
        let db = DatabaseConfig::new("transpotrack", "svc", "hunter2");
        assert!(!format!("{db:?}").contains("hunter2"));
    }
}
