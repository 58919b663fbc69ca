//! MySQL execution: parameter binding, row decoding, and the statement and
//! procedure runners used by [`MySqlDataAccess`](crate::MySqlDataAccess).

mod bind;
mod decode;
pub(crate) mod procedure;
pub(crate) mod query;
