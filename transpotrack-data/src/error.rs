use transpotrack_core::HttpError;

/// Why a login was declined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthFailure {
    /// The claimed role is neither `admin` nor `user`.
    InvalidRole(String),
    /// The database rejected the username / password pair.
    InvalidCredentials,
    /// Valid credentials, but the account lacks full privileges for `admin`.
    InsufficientPrivileges,
    /// The database could not be reached to check the credentials.
    Unavailable(String),
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthFailure::InvalidRole(_) => write!(f, "Invalid role"),
            AuthFailure::InvalidCredentials => write!(f, "Invalid username or password"),
            AuthFailure::InsufficientPrivileges => {
                write!(f, "User does not have admin privileges")
            }
            AuthFailure::Unavailable(msg) => {
                write!(f, "Authentication service unavailable: {msg}")
            }
        }
    }
}

/// Errors produced by the data-access layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    /// No usable connection: pool exhausted or closed, host unreachable,
    /// or the service account was rejected.
    Connectivity { message: String },
    /// The statement failed and its transaction was rolled back.
    Statement {
        message: String,
        /// SQLSTATE reported by the server, when there is one.
        code: Option<String>,
    },
    Auth(AuthFailure),
}

impl DataError {
    pub fn connectivity(message: impl Into<String>) -> Self {
        DataError::Connectivity {
            message: message.into(),
        }
    }

    pub fn statement(message: impl Into<String>) -> Self {
        DataError::Statement {
            message: message.into(),
            code: None,
        }
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, DataError::Connectivity { .. })
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Connectivity { message } => {
                write!(f, "could not establish connection: {message}")
            }
            DataError::Statement { message, .. } => write!(f, "{message}"),
            DataError::Auth(reason) => write!(f, "{reason}"),
        }
    }
}

impl std::error::Error for DataError {}

impl From<AuthFailure> for DataError {
    fn from(reason: AuthFailure) -> Self {
        DataError::Auth(reason)
    }
}

impl From<DataError> for HttpError {
    fn from(err: DataError) -> Self {
        let message = err.to_string();
        match err {
            DataError::Connectivity { .. } => HttpError::ServiceUnavailable(message),
            DataError::Statement { .. } => HttpError::BadRequest(message),
            DataError::Auth(AuthFailure::Unavailable(_)) => HttpError::ServiceUnavailable(message),
            DataError::Auth(_) => HttpError::Unauthorized(message),
        }
    }
}

impl From<AuthFailure> for HttpError {
    fn from(reason: AuthFailure) -> Self {
        DataError::Auth(reason).into()
    }
}

/// Convenience alias for data-layer results.
pub type DataResult<T> = Result<T, DataError>;

/// Classifies `sqlx::Error` into the [`DataError`] taxonomy.
pub trait SqlxErrorExt {
    fn into_data_error(self) -> DataError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_data_error(self) -> DataError {
        match &self {
            sqlx::Error::PoolTimedOut => {
                DataError::connectivity("timed out waiting for a pooled connection")
            }
            sqlx::Error::PoolClosed => DataError::connectivity("connection pool is closed"),
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::Configuration(_)
            | sqlx::Error::WorkerCrashed => DataError::connectivity(self.to_string()),
            sqlx::Error::Database(db) => {
                let code = db.code().map(|c| c.into_owned());
                if code.as_deref().is_some_and(is_connection_sqlstate) {
                    DataError::connectivity(db.message())
                } else {
                    DataError::Statement {
                        message: db.message().to_string(),
                        code,
                    }
                }
            }
            _ => DataError::statement(self.to_string()),
        }
    }
}

/// SQLSTATE classes for connection exceptions (`08`) and rejected
/// authorization (`28`).
fn is_connection_sqlstate(code: &str) -> bool {
    code.starts_with("08") || code.starts_with("28")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_are_connectivity() {
        assert!(sqlx::Error::PoolTimedOut.into_data_error().is_connectivity());
        assert!(sqlx::Error::PoolClosed.into_data_error().is_connectivity());
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(sqlx::Error::Io(io).into_data_error().is_connectivity());
    }

    #[test]
    fn other_errors_are_statement_errors() {
        let err = sqlx::Error::RowNotFound.into_data_error();
        assert!(matches!(err, DataError::Statement { code: None, .. }));
        let err = sqlx::Error::ColumnNotFound("Fare".into()).into_data_error();
        assert!(matches!(err, DataError::Statement { .. }));
    }

    #[test]
    fn connection_sqlstates() {
        assert!(is_connection_sqlstate("08S01"));
        assert!(is_connection_sqlstate("28000"));
        assert!(!is_connection_sqlstate("23000"));
        assert!(!is_connection_sqlstate("42S02"));
    }

    #[test]
    fn messages() {
        assert_eq!(
            DataError::connectivity("pool closed").to_string(),
            "could not establish connection: pool closed"
        );
        assert_eq!(
            DataError::Auth(AuthFailure::InvalidRole("superuser".into())).to_string(),
            "Invalid role"
        );
        assert_eq!(
            DataError::from(AuthFailure::InsufficientPrivileges).to_string(),
            "User does not have admin privileges"
        );
    }

    #[test]
    fn http_status_mapping() {
        use transpotrack_core::HttpError;
        let status = |e: DataError| HttpError::from(e).status().as_u16();
        assert_eq!(status(DataError::connectivity("down")), 503);
        assert_eq!(status(DataError::statement("Duplicate entry")), 400);
        assert_eq!(status(AuthFailure::InvalidCredentials.into()), 401);
        assert_eq!(status(AuthFailure::InvalidRole("x".into()).into()), 401);
        assert_eq!(status(AuthFailure::InsufficientPrivileges.into()), 401);
        assert_eq!(status(AuthFailure::Unavailable("timeout".into()).into()), 503);
    }
}
