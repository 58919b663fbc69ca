use std::time::Duration;

use serial_test::serial;
use transpotrack_core::config::{
    validate_section, AppConfig, ConfigError, ConfigProperties, ConfigValue, DefaultSecretResolver,
    PropertyMeta,
};

#[derive(Debug)]
struct MailerConfig {
    relay: String,
    port: u16,
    retry_delay: Duration,
}

impl ConfigProperties for MailerConfig {
    fn prefix() -> &'static str {
        "mailer"
    }

    fn properties() -> Vec<PropertyMeta> {
        vec![
            PropertyMeta::required("mailer.relay", "String", "SMTP relay host"),
            PropertyMeta::optional("mailer.port", "u16", "SMTP port"),
            PropertyMeta::optional("mailer.retry_delay_ms", "u64", ""),
        ]
    }

    fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let port: u16 = config.get_or("mailer.port", 25)?;
        if port == 0 {
            return Err(ConfigError::Invalid {
                key: "mailer.port".into(),
                message: "must be non-zero".into(),
            });
        }
        Ok(Self {
            relay: config.get("mailer.relay")?,
            port,
            retry_delay: config.get_or("mailer.retry_delay_ms", Duration::from_millis(250))?,
        })
    }
}

#[test]
fn empty_config_has_no_keys() {
    let config = AppConfig::empty();
    assert!(matches!(
        config.get::<String>("transpotrack.database.host"),
        Err(ConfigError::NotFound(_))
    ));
    assert_eq!(config.profile(), "test");
}

#[test]
fn get_or_only_defaults_missing_keys() {
    let mut config = AppConfig::empty();
    assert_eq!(config.get_or("transpotrack.database.port", 3306u16).unwrap(), 3306);

    config.set("transpotrack.database.port", ConfigValue::String("not-a-port".into()));
    assert!(matches!(
        config.get_or("transpotrack.database.port", 3306u16),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn scalar_conversions() {
    let mut config = AppConfig::empty();
    config.set("a.int", ConfigValue::Integer(5));
    config.set("a.float", ConfigValue::Float(2.5));
    config.set("a.flag", ConfigValue::String("yes".into()));
    config.set("a.none", ConfigValue::Null);
    config.set("a.negative", ConfigValue::Integer(-1));

    assert_eq!(config.get::<u32>("a.int").unwrap(), 5);
    assert_eq!(config.get::<String>("a.int").unwrap(), "5");
    assert_eq!(config.get::<f64>("a.float").unwrap(), 2.5);
    assert!(config.get::<bool>("a.flag").unwrap());
    assert_eq!(config.get::<Option<String>>("a.none").unwrap(), None);
    assert_eq!(config.get::<Duration>("a.int").unwrap(), Duration::from_millis(5));
    assert!(config.get::<u64>("a.negative").is_err());
}

#[test]
fn yaml_is_flattened_into_dotted_keys() {
    let yaml = r#"
transpotrack:
  database:
    host: db.local
    pool_size: 8
  server:
    origins:
      - http://localhost:3000
      - http://admin.local
"#;
    let config = AppConfig::from_yaml_str(yaml, "dev").unwrap();
    assert_eq!(config.get::<String>("transpotrack.database.host").unwrap(), "db.local");
    assert_eq!(config.get::<usize>("transpotrack.database.pool_size").unwrap(), 8);
    assert_eq!(
        config.get::<Vec<String>>("transpotrack.server.origins").unwrap(),
        vec!["http://localhost:3000", "http://admin.local"]
    );
    assert_eq!(
        config.get::<String>("transpotrack.server.origins.1").unwrap(),
        "http://admin.local"
    );
}

#[test]
fn invalid_yaml_is_a_load_error() {
    let err = AppConfig::from_yaml_str("transpotrack: [unclosed", "dev").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
fn section_reads_typed_values() {
    let config = AppConfig::from_yaml_str("mailer:\n  relay: smtp.local\n  retry_delay_ms: 1000\n", "dev").unwrap();
    let mailer: MailerConfig = config.section().unwrap();
    assert_eq!(mailer.relay, "smtp.local");
    assert_eq!(mailer.port, 25);
    assert_eq!(mailer.retry_delay, Duration::from_secs(1));
}

#[test]
fn validate_section_reports_missing_keys_with_env_hint() {
    let config = AppConfig::empty();
    let err = validate_section::<MailerConfig>(&config).unwrap_err();
    assert_eq!(err.errors.len(), 1);
    assert_eq!(err.errors[0].key, "mailer.relay");
    assert_eq!(err.errors[0].env_hint, "MAILER_RELAY");
    assert!(err.to_string().contains("SMTP relay host"));
}

#[test]
fn validate_section_reports_range_errors() {
    let config = AppConfig::from_yaml_str("mailer:\n  relay: smtp.local\n  port: 0\n", "dev").unwrap();
    let err = validate_section::<MailerConfig>(&config).unwrap_err();
    assert_eq!(err.errors[0].key, "mailer.port");
    assert_eq!(err.errors[0].detail.as_deref(), Some("must be non-zero"));

    let ok = AppConfig::from_yaml_str("mailer:\n  relay: smtp.local\n", "dev").unwrap();
    assert!(validate_section::<MailerConfig>(&ok).is_ok());
}

#[test]
#[serial]
fn load_from_dir_layers_profile_env_file_and_environment() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("application.yaml"),
        "transpotrack:\n  database:\n    host: base-host\n    name: transit\n    user: ${TT_CFG_DB_USER}\n    pool_size: 5\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("application-staging.yaml"),
        "transpotrack:\n  database:\n    host: staging-host\n",
    )
    .unwrap();
    std::fs::write(dir.path().join(".env.staging"), "TT_CFG_DB_USER=svc_transit\n").unwrap();

    unsafe {
        std::env::remove_var("TRANSPOTRACK_PROFILE");
        std::env::set_var("TRANSPOTRACK_DATABASE_POOL_SIZE", "9");
    }

    let config = AppConfig::load_from_dir(dir.path(), "staging", &DefaultSecretResolver).unwrap();
    assert_eq!(config.profile(), "staging");
    assert_eq!(config.get::<String>("transpotrack.database.host").unwrap(), "staging-host");
    assert_eq!(config.get::<String>("transpotrack.database.name").unwrap(), "transit");
    assert_eq!(config.get::<String>("transpotrack.database.user").unwrap(), "svc_transit");
    assert_eq!(config.get::<u32>("transpotrack.database.pool_size").unwrap(), 9);

    unsafe {
        std::env::remove_var("TRANSPOTRACK_DATABASE_POOL_SIZE");
        std::env::remove_var("TT_CFG_DB_USER");
    }
}

#[test]
#[serial]
fn profile_env_var_wins_over_argument() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("application-ci.yaml"), "marker: ci\n").unwrap();
    unsafe { std::env::set_var("TRANSPOTRACK_PROFILE", "ci") };

    let config = AppConfig::load_from_dir(dir.path(), "dev", &DefaultSecretResolver).unwrap();
    assert_eq!(config.profile(), "ci");
    assert_eq!(config.get::<String>("marker").unwrap(), "ci");

    unsafe { std::env::remove_var("TRANSPOTRACK_PROFILE") };
}
