use super::typed::ConfigProperties;
use super::{AppConfig, ConfigError};

/// A configuration key that is missing or unusable.
#[derive(Debug)]
pub struct MissingKeyError {
    /// Section prefix that needs the key.
    pub section: String,
    pub key: String,
    pub expected_type: String,
    /// Environment variable that would supply the key.
    pub env_hint: String,
    pub detail: Option<String>,
}

impl std::fmt::Display for MissingKeyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "  - [{}] '{}' ({}), set env var `{}`",
            self.section, self.key, self.expected_type, self.env_hint
        )?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

/// Every problem found while validating a section.
#[derive(Debug)]
pub struct ConfigValidationError {
    pub errors: Vec<MissingKeyError>,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Invalid configuration:")?;
        for err in &self.errors {
            writeln!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigValidationError {}

fn env_hint(key: &str) -> String {
    key.to_uppercase().replace('.', "_")
}

/// Check that a section's required keys are present and that it builds.
///
/// Missing keys are all reported together. When none are missing, the
/// section is constructed once so type and range errors surface here too.
pub fn validate_section<C: ConfigProperties>(config: &AppConfig) -> Result<(), ConfigValidationError> {
    let section = C::prefix().to_string();

    let mut errors: Vec<MissingKeyError> = C::properties()
        .into_iter()
        .filter(|prop| prop.required && !config.contains_key(prop.key))
        .map(|prop| MissingKeyError {
            section: section.clone(),
            key: prop.key.to_string(),
            expected_type: prop.type_name.to_string(),
            env_hint: prop.env_var(),
            detail: Some(prop.description.to_string()).filter(|d| !d.is_empty()),
        })
        .collect();

    if errors.is_empty() {
        let problem = match C::from_config(config) {
            Ok(_) => None,
            Err(ConfigError::TypeMismatch { key, expected }) => {
                Some((key, expected.to_string(), format!("expected {expected}")))
            }
            Err(ConfigError::Invalid { key, message }) => Some((key, "valid".into(), message)),
            Err(ConfigError::NotFound(key)) => Some((key, "unknown".into(), "missing".into())),
            Err(ConfigError::Load(message)) => Some((section.clone(), "loadable".into(), message)),
        };
        if let Some((key, expected_type, detail)) = problem {
            errors.push(MissingKeyError {
                section: section.clone(),
                env_hint: env_hint(&key),
                key,
                expected_type,
                detail: Some(detail),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigValidationError { errors })
    }
}
