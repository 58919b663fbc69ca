use garde::Validate;
use serde::Deserialize;

use super::{iso_date, numeric, optional_iso_date, NumberOrText};

/// Journey date used when a booking names neither `journeyDate` nor `startDate`.
pub const DEFAULT_JOURNEY_DATE: &str = "2024-01-29";

/// A passenger booking a ticket from the portal.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PortalTicketRequest {
    #[serde(default)]
    #[garde(custom(optional_iso_date))]
    pub journey_date: Option<String>,
    #[serde(default)]
    #[garde(custom(optional_iso_date))]
    pub start_date: Option<String>,
    #[garde(custom(numeric))]
    pub fare: NumberOrText,
    #[garde(custom(numeric))]
    pub passenger_id: NumberOrText,
    #[garde(custom(numeric))]
    pub schedule_id: NumberOrText,
    #[garde(custom(numeric))]
    pub from_station: NumberOrText,
    #[garde(custom(numeric))]
    pub to_station: NumberOrText,
}

impl PortalTicketRequest {
    pub fn effective_journey_date(&self) -> &str {
        self.journey_date
            .as_deref()
            .or(self.start_date.as_deref())
            .unwrap_or(DEFAULT_JOURNEY_DATE)
    }
}

/// A passenger applying for a travel pass.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PassApplication {
    #[garde(length(min = 1))]
    pub pass_type: String,
    #[garde(custom(iso_date))]
    pub start_date: String,
    #[garde(custom(numeric))]
    pub price: NumberOrText,
    #[garde(custom(numeric))]
    pub passenger_id: NumberOrText,
}

/// A passenger filing a complaint.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FileComplaintRequest {
    #[serde(default)]
    #[garde(skip)]
    pub subject: Option<String>,
    #[garde(length(min = 1))]
    pub description: String,
    #[garde(custom(numeric))]
    pub passenger_id: NumberOrText,
    #[serde(default)]
    #[garde(skip)]
    pub category: Option<String>,
}

impl FileComplaintRequest {
    pub fn subject_or_default(&self) -> &str {
        self.subject.as_deref().unwrap_or("General Complaint")
    }

    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or("Other")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(journey: Option<&str>, start: Option<&str>) -> PortalTicketRequest {
        PortalTicketRequest {
            journey_date: journey.map(String::from),
            start_date: start.map(String::from),
            fare: 25.0f64.into(),
            passenger_id: 1i64.into(),
            schedule_id: 2i64.into(),
            from_station: 3i64.into(),
            to_station: 4i64.into(),
        }
    }

    #[test]
    fn journey_date_falls_back_to_start_date_then_default() {
        assert_eq!(ticket(Some("2025-03-01"), Some("2025-02-01")).effective_journey_date(), "2025-03-01");
        assert_eq!(ticket(None, Some("2025-02-01")).effective_journey_date(), "2025-02-01");
        assert_eq!(ticket(None, None).effective_journey_date(), DEFAULT_JOURNEY_DATE);
    }

    #[test]
    fn complaint_defaults() {
        let filing: FileComplaintRequest =
            serde_json::from_str(r#"{"description": "Bus was late", "passengerId": "4"}"#).unwrap();
        assert_eq!(filing.subject_or_default(), "General Complaint");
        assert_eq!(filing.category_or_default(), "Other");
        assert!(filing.validate().is_ok());
    }
}
