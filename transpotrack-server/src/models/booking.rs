use garde::Validate;
use serde::Deserialize;

use super::{iso_date, numeric, NumberOrText};

/// Arguments of `sp_book_ticket_with_payment`, in call order.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookTicketRequest {
    #[garde(custom(numeric))]
    pub passenger_id: NumberOrText,
    #[garde(custom(numeric))]
    pub schedule_id: NumberOrText,
    #[garde(custom(numeric))]
    pub source_station_id: NumberOrText,
    #[garde(custom(numeric))]
    pub dest_station_id: NumberOrText,
    #[garde(length(min = 1, max = 10))]
    pub seat_number: String,
    #[garde(custom(iso_date))]
    pub journey_date: String,
    #[garde(custom(numeric))]
    pub fare: NumberOrText,
    #[garde(length(min = 1))]
    pub payment_method: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReportRequest {
    #[garde(custom(iso_date))]
    pub start_date: String,
    #[garde(custom(iso_date))]
    pub end_date: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SeatCheckRequest {
    #[garde(custom(numeric))]
    pub schedule_id: NumberOrText,
    #[garde(custom(iso_date))]
    pub journey_date: String,
    #[garde(length(min = 1, max = 10))]
    pub seat_number: String,
}
