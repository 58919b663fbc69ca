use futures_util::TryStreamExt;
use sqlx::mysql::MySqlConnection;
use sqlx::{Connection, Either, Executor};

use super::bind::bind_params;
use super::decode::decode_row;
use super::query::rollback;
use crate::error::{DataError, DataResult, SqlxErrorExt};
use crate::outcome::ProcedureOutcome;
use crate::row::Row;
use crate::statement::ProcedureCall;

/// One item of a `CALL`'s response stream.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Fragment {
    Row(Row),
    /// End of a result set, or the final status of the call itself.
    Done,
}

/// Split a `CALL` response into its result sets.
///
/// Each result set ends with a `Done`; the stream then ends with one more
/// `Done` carrying the call's own status, which is not a result set.
pub(crate) fn group_result_sets(fragments: impl IntoIterator<Item = Fragment>) -> Vec<Vec<Row>> {
    let mut sets = Vec::new();
    let mut current = Vec::new();
    let mut pending_rows = false;
    for fragment in fragments {
        match fragment {
            Fragment::Row(row) => {
                current.push(row);
                pending_rows = true;
            }
            Fragment::Done => {
                sets.push(std::mem::take(&mut current));
                pending_rows = false;
            }
        }
    }
    if pending_rows {
        sets.push(current);
    } else if sets.last().is_some_and(Vec::is_empty) {
        sets.pop();
    }
    sets
}

/// Invoke a stored procedure in its own transaction and drain every result set.
pub(crate) async fn run_procedure(
    conn: &mut MySqlConnection,
    call: &ProcedureCall,
) -> DataResult<ProcedureOutcome> {
    if !call.has_valid_name() {
        return Err(DataError::statement(format!(
            "invalid procedure name '{}'",
            call.name()
        )));
    }

    let sql = call.to_sql();
    let mut tx = conn.begin().await.map_err(SqlxErrorExt::into_data_error)?;

    let drained: Result<Vec<Fragment>, sqlx::Error> = {
        let query = bind_params(sqlx::query(&sql), call.args());
        (&mut *tx)
            .fetch_many(query)
            .map_ok(|item| match item {
                Either::Left(_) => Fragment::Done,
                Either::Right(row) => Fragment::Row(decode_row(&row)),
            })
            .try_collect()
            .await
    };

    match drained {
        Ok(fragments) => {
            tx.commit().await.map_err(SqlxErrorExt::into_data_error)?;
            Ok(ProcedureOutcome::new(group_result_sets(fragments)))
        }
        Err(e) => {
            rollback(tx).await;
            Err(e.into_data_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64) -> Fragment {
        Fragment::Row(Row::new().with("id", id))
    }

    #[test]
    fn two_result_sets_in_order() {
        let sets = group_result_sets([row(1), row(2), Fragment::Done, row(3), Fragment::Done, Fragment::Done]);
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].len(), 2);
        assert_eq!(sets[1][0].get("id"), Some(&crate::Value::Int(3)));
    }

    #[test]
    fn procedure_without_selects_has_no_result_sets() {
        assert!(group_result_sets([Fragment::Done]).is_empty());
        assert!(group_result_sets([]).is_empty());
    }

    #[test]
    fn empty_result_set_is_kept() {
        let sets = group_result_sets([Fragment::Done, row(1), Fragment::Done, Fragment::Done]);
        assert_eq!(sets.len(), 2);
        assert!(sets[0].is_empty());
        assert_eq!(sets[1].len(), 1);
    }

    #[test]
    fn trailing_rows_without_terminator_form_a_set() {
        let sets = group_result_sets([row(1), Fragment::Done, row(2)]);
        assert_eq!(sets.len(), 2);
    }
}
