//! Login verification against the database's own accounts.
//!
//! A login succeeds when a fresh connection opened with the caller's own
//! username and password is accepted by the server. The `admin` role also
//! requires the account to hold full privileges.

use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;
use sqlx::mysql::{MySqlConnection, MySqlDatabaseError};
use sqlx::{Connection, Row};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::AuthFailure;

/// The role a user logs in as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthFailure;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(AuthFailure::InvalidRole(other.to_string())),
        }
    }
}

/// Checks a username / password pair for a claimed role.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str, role: &str) -> Result<Role, AuthFailure>;
}

/// Verifies by opening a short-lived MySQL connection as the user.
///
/// The connection never goes through the service-account pool and is
/// closed before `verify` returns.
#[derive(Clone)]
pub struct MySqlCredentialVerifier {
    config: DatabaseConfig,
}

impl MySqlCredentialVerifier {
    /// `config` supplies the server, schema and connect timeout; its
    /// service-account credentials are not used.
    pub fn new(config: DatabaseConfig) -> Self {
        Self { config }
    }

    async fn connect(&self, username: &str, password: &str) -> Result<MySqlConnection, AuthFailure> {
        let options = self.config.connect_options_as(username, password);
        match tokio::time::timeout(self.config.connect_timeout, MySqlConnection::connect_with(&options)).await {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(classify_connect_error(&e)),
            Err(_) => Err(AuthFailure::Unavailable(format!(
                "connection timed out after {} ms",
                self.config.connect_timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl CredentialVerifier for MySqlCredentialVerifier {
    async fn verify(&self, username: &str, password: &str, role: &str) -> Result<Role, AuthFailure> {
        let result = match role.parse::<Role>() {
            Err(reason) => Err(reason),
            Ok(claimed) => match self.connect(username, password).await {
                Err(reason) => Err(reason),
                Ok(mut conn) => {
                    let checked = match claimed {
                        Role::User => Ok(claimed),
                        Role::Admin => require_full_privileges(&mut conn).await.map(|_| claimed),
                    };
                    if let Err(e) = conn.close().await {
                        debug!(error = %e, "closing credential connection failed");
                    }
                    checked
                }
            },
        };

        match &result {
            Ok(role) => info!(username, %role, "login accepted"),
            Err(reason) => info!(username, role, reason = %reason, "login declined"),
        }
        result
    }
}

async fn require_full_privileges(conn: &mut MySqlConnection) -> Result<(), AuthFailure> {
    let rows = sqlx::query("SHOW GRANTS FOR CURRENT_USER()")
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| AuthFailure::Unavailable(e.to_string()))?;
    let grants: Vec<String> = rows
        .iter()
        .filter_map(|row| row.try_get_unchecked::<String, _>(0).ok())
        .collect();

    if grants_include_full_privileges(&grants) {
        Ok(())
    } else {
        Err(AuthFailure::InsufficientPrivileges)
    }
}

/// Whether any `SHOW GRANTS` line grants `ALL PRIVILEGES`.
pub fn grants_include_full_privileges<S: AsRef<str>>(grants: &[S]) -> bool {
    grants
        .iter()
        .any(|g| g.as_ref().to_ascii_uppercase().contains("ALL PRIVILEGES"))
}

const ER_DBACCESS_DENIED_ERROR: u16 = 1044;
const ER_ACCESS_DENIED_ERROR: u16 = 1045;

/// Only an access-denied answer means bad credentials. Any other server
/// refusal (too many connections, unknown schema) or transport failure
/// means the server could not be asked.
fn classify_connect_error(err: &sqlx::Error) -> AuthFailure {
    match err {
        sqlx::Error::Database(db) => match db.try_downcast_ref::<MySqlDatabaseError>() {
            Some(mysql) => classify_server_refusal(mysql.number(), mysql.message()),
            None => AuthFailure::Unavailable(db.message().to_string()),
        },
        other => AuthFailure::Unavailable(other.to_string()),
    }
}

fn classify_server_refusal(number: u16, message: &str) -> AuthFailure {
    match number {
        ER_ACCESS_DENIED_ERROR | ER_DBACCESS_DENIED_ERROR => AuthFailure::InvalidCredentials,
        _ => AuthFailure::Unavailable(message.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles_only() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("user".parse::<Role>(), Ok(Role::User));
        assert_eq!(
            "superuser".parse::<Role>(),
            Err(AuthFailure::InvalidRole("superuser".into()))
        );
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn detects_full_privileges() {
        assert!(grants_include_full_privileges(&[
            "GRANT USAGE ON *.* TO `ops`@`%`",
            "GRANT ALL PRIVILEGES ON `transpotrack`.* TO `ops`@`%`",
        ]));
        assert!(grants_include_full_privileges(&["grant all privileges on *.* to 'root'@'localhost'"]));
        assert!(!grants_include_full_privileges(&[
            "GRANT SELECT, INSERT ON `transpotrack`.* TO `clerk`@`%`"
        ]));
        assert!(!grants_include_full_privileges::<&str>(&[]));
    }

    #[test]
    fn transport_failures_are_unavailable() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(matches!(
            classify_connect_error(&sqlx::Error::Io(io)),
            AuthFailure::Unavailable(_)
        ));
        assert!(matches!(
            classify_connect_error(&sqlx::Error::PoolTimedOut),
            AuthFailure::Unavailable(_)
        ));
    }

    #[test]
    fn only_access_denied_refusals_are_bad_credentials() {
        assert_eq!(
            classify_server_refusal(1045, "Access denied for user 'alice'@'%'"),
            AuthFailure::InvalidCredentials
        );
        assert_eq!(
            classify_server_refusal(1044, "Access denied for user 'alice'@'%' to database 'transpotrack'"),
            AuthFailure::InvalidCredentials
        );
        assert_eq!(
            classify_server_refusal(1040, "Too many connections"),
            AuthFailure::Unavailable("Too many connections".into())
        );
        assert_eq!(
            classify_server_refusal(1049, "Unknown database 'transpotrack'"),
            AuthFailure::Unavailable("Unknown database 'transpotrack'".into())
        );
    }

    #[tokio::test]
    async fn invalid_role_fails_before_connecting() {
        let mut config = DatabaseConfig::new("transpotrack", "svc", "");
        // An unroutable address: any connection attempt would time out.
        config.host = "10.255.255.1".into();
        config.connect_timeout = std::time::Duration::from_secs(5);
        let verifier = MySqlCredentialVerifier::new(config);

        let started = std::time::Instant::now();
        let err = verifier.verify("x", "y", "superuser").await.unwrap_err();
        assert_eq!(err, AuthFailure::InvalidRole("superuser".into()));
        assert!(started.elapsed() < std::time::Duration::from_secs(1));
    }

    #[tokio::test]
    async fn unreachable_server_is_unavailable() {
        let mut config = DatabaseConfig::new("transpotrack", "svc", "");
        config.host = "127.0.0.1".into();
        config.port = 9;
        let verifier = MySqlCredentialVerifier::new(config);

        let err = verifier.verify("alice", "wrongpass", "user").await.unwrap_err();
        assert!(matches!(err, AuthFailure::Unavailable(_)), "{err:?}");
    }
}
