use sqlx::mysql::{MySql, MySqlConnection};
use sqlx::{Connection, Either, Executor, Statement as _, Transaction};

use super::bind::bind_params;
use super::decode::decode_row;
use crate::error::{DataError, DataResult, SqlxErrorExt};
use crate::outcome::QueryOutcome;
use crate::statement::{Fetch, Statement};

/// Run one statement in its own transaction on `conn`.
///
/// Commits on success; on any failure the transaction is rolled back
/// before the error is returned.
pub(crate) async fn run_statement(
    conn: &mut MySqlConnection,
    statement: &Statement,
) -> DataResult<QueryOutcome> {
    let mut tx = conn.begin().await.map_err(SqlxErrorExt::into_data_error)?;
    match execute_in(&mut tx, statement).await {
        Ok(outcome) => {
            tx.commit().await.map_err(SqlxErrorExt::into_data_error)?;
            Ok(outcome)
        }
        Err(err) => {
            rollback(tx).await;
            Err(err)
        }
    }
}

pub(crate) async fn rollback(tx: Transaction<'_, MySql>) {
    if let Err(e) = tx.rollback().await {
        tracing::warn!(error = %e, "rollback failed");
    }
}

async fn execute_in(
    tx: &mut Transaction<'_, MySql>,
    statement: &Statement,
) -> DataResult<QueryOutcome> {
    let sql = statement.sql();

    // Preparing tells us whether the statement has a result set before it runs.
    let prepared = (&mut **tx).prepare(sql).await.map_err(SqlxErrorExt::into_data_error)?;
    if let Some(Either::Right(expected)) = prepared.parameters() {
        if expected != statement.params().len() {
            return Err(DataError::statement(format!(
                "statement expects {expected} parameters, got {}",
                statement.params().len()
            )));
        }
    }
    let has_result_set = !prepared.columns().is_empty();
    drop(prepared);

    let query = bind_params(sqlx::query(sql), statement.params());
    if has_result_set {
        let rows = query
            .fetch_all(&mut **tx)
            .await
            .map_err(SqlxErrorExt::into_data_error)?;
        return Ok(QueryOutcome::Rows(rows.iter().map(decode_row).collect()));
    }

    let done = query
        .execute(&mut **tx)
        .await
        .map_err(SqlxErrorExt::into_data_error)?;
    let last_insert_id = match statement.fetch() {
        Fetch::Affected => Some(done.last_insert_id()).filter(|id| *id != 0),
        Fetch::Rows => None,
    };
    Ok(QueryOutcome::Affected {
        rows_affected: done.rows_affected(),
        last_insert_id,
    })
}
