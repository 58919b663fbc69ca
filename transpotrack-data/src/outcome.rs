//! Successful executor results and their JSON envelopes.
//!
//! Failures are [`DataError`](crate::DataError)s, rendered as
//! `{"success": false, "error": ...}` at the HTTP boundary.

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::row::Row;

/// Outcome of a single statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The statement produced a result set.
    Rows(Vec<Row>),
    /// The statement changed data and produced no result set.
    Affected {
        rows_affected: u64,
        /// Auto-generated key of an insert; `None` when nothing was generated.
        last_insert_id: Option<u64>,
    },
}

impl QueryOutcome {
    /// The rows, or an empty slice for a mutation.
    pub fn rows(&self) -> &[Row] {
        match self {
            QueryOutcome::Rows(rows) => rows,
            QueryOutcome::Affected { .. } => &[],
        }
    }

    pub fn into_rows(self) -> Vec<Row> {
        match self {
            QueryOutcome::Rows(rows) => rows,
            QueryOutcome::Affected { .. } => Vec::new(),
        }
    }

    /// The first row, if any.
    pub fn first(&self) -> Option<&Row> {
        self.rows().first()
    }

    pub fn rows_affected(&self) -> Option<u64> {
        match self {
            QueryOutcome::Affected { rows_affected, .. } => Some(*rows_affected),
            QueryOutcome::Rows(_) => None,
        }
    }

    pub fn last_insert_id(&self) -> Option<u64> {
        match self {
            QueryOutcome::Affected { last_insert_id, .. } => *last_insert_id,
            QueryOutcome::Rows(_) => None,
        }
    }
}

impl Serialize for QueryOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            QueryOutcome::Rows(rows) => {
                let mut s = serializer.serialize_struct("QueryOutcome", 2)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("data", rows)?;
                s.end()
            }
            QueryOutcome::Affected {
                rows_affected,
                last_insert_id,
            } => {
                let mut s = serializer.serialize_struct("QueryOutcome", 3)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("affected_rows", rows_affected)?;
                s.serialize_field("lastrowid", last_insert_id)?;
                s.end()
            }
        }
    }
}

/// Every result set a stored procedure produced, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcedureOutcome {
    pub result_sets: Vec<Vec<Row>>,
}

impl ProcedureOutcome {
    pub fn new(result_sets: Vec<Vec<Row>>) -> Self {
        Self { result_sets }
    }

    /// The first result set, or an empty slice if none was produced.
    pub fn first_set(&self) -> &[Row] {
        self.result_sets.first().map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Serialize for ProcedureOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ProcedureOutcome", 2)?;
        s.serialize_field("success", &true)?;
        s.serialize_field("data", &self.result_sets)?;
        s.end()
    }
}
