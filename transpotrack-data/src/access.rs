//! The executor seam shared by every endpoint.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{instrument, warn};
use transpotrack_core::{HealthIndicator, HealthStatus};

use crate::error::{DataError, DataResult};
use crate::mysql::{procedure, query};
use crate::outcome::{ProcedureOutcome, QueryOutcome};
use crate::pool::PoolManager;
use crate::statement::{ProcedureCall, Statement};

/// Runs statements and stored procedures, one transaction per call.
///
/// Implemented over MySQL by [`MySqlDataAccess`]; tests substitute a
/// scripted fake.
#[async_trait]
pub trait DataAccess: Send + Sync {
    /// Execute one statement and normalize its outcome.
    async fn execute(&self, statement: Statement) -> DataResult<QueryOutcome>;

    /// Invoke a stored procedure and collect every result set it produces.
    async fn call_procedure(&self, call: ProcedureCall) -> DataResult<ProcedureOutcome>;

    /// Round-trip to the server; returns the current schema name.
    async fn ping(&self) -> DataResult<String> {
        let outcome = self.execute(Statement::query("SELECT DATABASE() AS db")).await?;
        Ok(outcome
            .first()
            .and_then(|row| row.get("db"))
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string())
    }
}

/// [`DataAccess`] over the pooled service-account connections.
#[derive(Clone)]
pub struct MySqlDataAccess {
    pool: Arc<PoolManager>,
}

impl MySqlDataAccess {
    pub fn new(pool: Arc<PoolManager>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Arc<PoolManager> {
        &self.pool
    }

    fn statement_timeout(&self) -> Duration {
        self.pool.config().statement_timeout
    }
}

fn timed_out(limit: Duration) -> DataError {
    DataError::statement(format!("statement timed out after {} ms", limit.as_millis()))
}

#[async_trait]
impl DataAccess for MySqlDataAccess {
    #[instrument(name = "execute", skip_all, fields(sql = %statement.sql()))]
    async fn execute(&self, statement: Statement) -> DataResult<QueryOutcome> {
        let limit = self.statement_timeout();
        let mut conn = self.pool.acquire().await?;
        // On expiry the transaction is dropped unfinished, so the connection
        // is closed rather than pooled.
        let result = match tokio::time::timeout(limit, query::run_statement(&mut conn, &statement)).await {
            Ok(result) => {
                conn.release();
                result
            }
            Err(_) => {
                conn.discard();
                Err(timed_out(limit))
            }
        };

        if let Err(err) = &result {
            warn!(sql = %statement.sql(), error = %err, "statement failed");
        }
        result
    }

    #[instrument(name = "call_procedure", skip_all, fields(procedure = %call.name()))]
    async fn call_procedure(&self, call: ProcedureCall) -> DataResult<ProcedureOutcome> {
        let limit = self.statement_timeout();
        let mut conn = self.pool.acquire().await?;
        let result = match tokio::time::timeout(limit, procedure::run_procedure(&mut conn, &call)).await {
            Ok(result) => {
                conn.release();
                result
            }
            Err(_) => {
                conn.discard();
                Err(timed_out(limit))
            }
        };

        if let Err(err) = &result {
            warn!(procedure = %call.name(), error = %err, "procedure failed");
        }
        result
    }
}

/// Health check that round-trips `SELECT DATABASE()`.
pub struct DatabaseHealth {
    db: Arc<dyn DataAccess>,
}

impl DatabaseHealth {
    pub fn new(db: Arc<dyn DataAccess>) -> Self {
        Self { db }
    }
}

impl HealthIndicator for DatabaseHealth {
    fn name(&self) -> &str {
        "db"
    }

    async fn check(&self) -> HealthStatus {
        match self.db.ping().await {
            Ok(_) => HealthStatus::Up,
            Err(e) => HealthStatus::Down(e.to_string()),
        }
    }
}
