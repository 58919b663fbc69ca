use super::ConfigError;

/// Backend that turns a placeholder reference into its value.
pub trait SecretResolver: Send + Sync {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError>;
}

/// Resolves environment variables and secret files.
///
/// Placeholder forms:
/// - `${VAR}` or `${env:VAR}` reads an environment variable
/// - `${file:/run/secrets/db_password}` reads a file, trimming trailing whitespace
/// - `${VAR:-fallback}` uses `fallback` when `VAR` is unset
pub struct DefaultSecretResolver;

impl SecretResolver for DefaultSecretResolver {
    fn resolve(&self, reference: &str) -> Result<String, ConfigError> {
        let reference = reference.trim();
        if let Some(path) = reference.strip_prefix("file:") {
            let path = path.trim();
            return std::fs::read_to_string(path)
                .map(|s| s.trim_end().to_string())
                .map_err(|e| ConfigError::Load(format!("secret file '{path}': {e}")));
        }

        let name = reference.strip_prefix("env:").unwrap_or(reference);
        let (name, fallback) = match name.split_once(":-") {
            Some((n, f)) => (n.trim(), Some(f)),
            None => (name.trim(), None),
        };
        match (std::env::var(name), fallback) {
            (Ok(v), _) => Ok(v),
            (Err(_), Some(f)) => Ok(f.to_string()),
            (Err(_), None) => Err(ConfigError::NotFound(format!("env:{name}"))),
        }
    }
}

/// Replace every `${...}` placeholder in `value` using `resolver`.
pub fn resolve_placeholders(
    value: &str,
    resolver: &dyn SecretResolver,
) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find('}')
            .ok_or_else(|| ConfigError::Load(format!("unclosed placeholder in '{value}'")))?;
        out.push_str(&resolver.resolve(&after[..end])?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bare_env_var() {
        unsafe { std::env::set_var("TT_SECRET_DB_USER", "transit_admin") };
        let got = resolve_placeholders("${TT_SECRET_DB_USER}", &DefaultSecretResolver).unwrap();
        assert_eq!(got, "transit_admin");
        unsafe { std::env::remove_var("TT_SECRET_DB_USER") };
    }

    #[test]
    fn resolves_prefixed_env_var_inside_text() {
        unsafe { std::env::set_var("TT_SECRET_DB_HOST", "db.internal") };
        let got =
            resolve_placeholders("mysql://${env:TT_SECRET_DB_HOST}:3306", &DefaultSecretResolver)
                .unwrap();
        assert_eq!(got, "mysql://db.internal:3306");
        unsafe { std::env::remove_var("TT_SECRET_DB_HOST") };
    }

    #[test]
    fn unset_var_uses_fallback() {
        let got =
            resolve_placeholders("${TT_SECRET_NEVER_SET:-}", &DefaultSecretResolver).unwrap();
        assert_eq!(got, "");
        let got = resolve_placeholders("${TT_SECRET_NEVER_SET:-5}", &DefaultSecretResolver)
            .unwrap();
        assert_eq!(got, "5");
    }

    #[test]
    fn unset_var_without_fallback_is_not_found() {
        let err = resolve_placeholders("${TT_SECRET_NEVER_SET}", &DefaultSecretResolver)
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn plain_and_unclosed_values() {
        assert_eq!(
            resolve_placeholders("transpotrack", &DefaultSecretResolver).unwrap(),
            "transpotrack"
        );
        assert!(resolve_placeholders("${DB_PASSWORD", &DefaultSecretResolver).is_err());
    }

    #[test]
    fn reads_secret_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db_password");
        std::fs::write(&path, "s3cret\n").unwrap();

        let got = resolve_placeholders(&format!("${{file:{}}}", path.display()), &DefaultSecretResolver)
            .unwrap();
        assert_eq!(got, "s3cret");
    }
}
