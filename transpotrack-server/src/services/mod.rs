//! Statement builders, one module per area.
//!
//! Builders are pure: they turn a validated request into a [`Statement`]
//! or [`ProcedureCall`] with every value bound as a parameter. Handlers
//! hand the result to the `DataAccess` seam.
//!
//! [`Statement`]: transpotrack_data::Statement
//! [`ProcedureCall`]: transpotrack_data::ProcedureCall

pub mod bookings;
pub mod codes;
pub mod dashboard;
pub mod fleet;
pub mod passengers;
pub mod portal;
pub mod reports;
pub mod routines;
