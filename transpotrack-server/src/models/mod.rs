//! Request and response bodies.
//!
//! Field names follow the admin pages (`firstName`, `scheduleId`, ...).
//! Numeric fields are accepted as JSON numbers or numeric strings, since
//! the pages post raw form values.

mod auth;
mod booking;
mod complaint;
mod dashboard;
mod passenger;
mod portal;
mod station;
mod vehicle;

pub use auth::{LoginRequest, LoginResponse, SessionUser};
pub use booking::{BookTicketRequest, RevenueReportRequest, SeatCheckRequest};
pub use complaint::ComplaintStatusRequest;
pub use dashboard::DashboardStats;
pub use passenger::PassengerRequest;
pub use portal::{FileComplaintRequest, PassApplication, PortalTicketRequest};
pub use station::StationRequest;
pub use vehicle::VehicleRequest;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use transpotrack_data::Value;

/// `{"success": true, "data": ...}` around a computed value.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// A number that may arrive as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    fn is_numeric(&self) -> bool {
        match self {
            NumberOrText::Int(_) => true,
            NumberOrText::Float(f) => f.is_finite(),
            NumberOrText::Text(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        }
    }
}

impl From<&NumberOrText> for Value {
    fn from(n: &NumberOrText) -> Self {
        match n {
            NumberOrText::Int(i) => Value::Int(*i),
            NumberOrText::Float(f) => Value::Float(*f),
            NumberOrText::Text(s) => Value::Text(s.trim().to_string()),
        }
    }
}

impl From<i64> for NumberOrText {
    fn from(i: i64) -> Self {
        NumberOrText::Int(i)
    }
}

impl From<f64> for NumberOrText {
    fn from(f: f64) -> Self {
        NumberOrText::Float(f)
    }
}

pub(crate) fn numeric(value: &NumberOrText, _ctx: &()) -> garde::Result {
    if value.is_numeric() {
        Ok(())
    } else {
        Err(garde::Error::new("must be a number"))
    }
}

pub(crate) fn optional_numeric(value: &Option<NumberOrText>, ctx: &()) -> garde::Result {
    match value {
        Some(n) => numeric(n, ctx),
        None => Ok(()),
    }
}

/// `YYYY-MM-DD`.
pub(crate) fn iso_date(value: &String, _ctx: &()) -> garde::Result {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| garde::Error::new("must be a date in YYYY-MM-DD format"))
}

pub(crate) fn optional_iso_date(value: &Option<String>, ctx: &()) -> garde::Result {
    match value {
        Some(date) => iso_date(date, ctx),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let parsed: Vec<NumberOrText> = serde_json::from_str(r#"[3, 12.5, "120", " 7 "]"#).unwrap();
        assert!(parsed.iter().all(NumberOrText::is_numeric));
        assert_eq!(Value::from(&parsed[3]), Value::Text("7".into()));
        assert!(!NumberOrText::Text("lots".into()).is_numeric());
    }

    #[test]
    fn checks_iso_dates() {
        assert!(iso_date(&"2024-01-29".to_string(), &()).is_ok());
        assert!(iso_date(&"29/01/2024".to_string(), &()).is_err());
        assert!(optional_iso_date(&None, &()).is_ok());
    }
}
