//! # transpotrack-data
//!
//! MySQL data access for TranspoTrack.
//!
//! | Component | Type |
//! |-----------|------|
//! | Connection Pool Manager | [`PoolManager`], [`PooledConnection`] |
//! | Query Executor | [`DataAccess::execute`] over a [`Statement`], yielding a [`QueryOutcome`] |
//! | Procedure Executor | [`DataAccess::call_procedure`] over a [`ProcedureCall`], yielding a [`ProcedureOutcome`] |
//! | Credential Verifier | [`CredentialVerifier`], [`MySqlCredentialVerifier`] |
//!
//! Every failure is a [`DataError`]; nothing panics past this crate.
//!
//! ```ignore
//! let pool = Arc::new(PoolManager::new(config.section::<DatabaseConfig>()?));
//! pool.initialize().await?;
//! let db = MySqlDataAccess::new(pool.clone());
//!
//! let outcome = db
//!     .execute(Statement::query("SELECT * FROM STATION WHERE Zone = ?").bind("North"))
//!     .await?;
//! ```

pub mod access;
pub mod config;
pub mod credentials;
pub mod error;
mod mysql;
pub mod outcome;
pub mod pool;
pub mod row;
pub mod statement;
pub mod value;

pub use access::{DataAccess, DatabaseHealth, MySqlDataAccess};
pub use config::DatabaseConfig;
pub use credentials::{grants_include_full_privileges, CredentialVerifier, MySqlCredentialVerifier, Role};
pub use error::{AuthFailure, DataError, DataResult, SqlxErrorExt};
pub use outcome::{ProcedureOutcome, QueryOutcome};
pub use pool::{PoolManager, PoolStatus, PooledConnection};
pub use row::Row;
pub use statement::{Fetch, ProcedureCall, Statement};
pub use value::Value;
