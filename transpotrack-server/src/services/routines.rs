//! Stored procedures and stored functions.

use transpotrack_data::{ProcedureCall, Statement};

use crate::models::{BookTicketRequest, RevenueReportRequest, SeatCheckRequest};

pub const BOOK_TICKET: &str = "sp_book_ticket_with_payment";
pub const REVENUE_REPORT: &str = "sp_generate_revenue_report";

pub fn book_ticket(req: &BookTicketRequest) -> ProcedureCall {
    ProcedureCall::new(BOOK_TICKET)
        .arg(&req.passenger_id)
        .arg(&req.schedule_id)
        .arg(&req.source_station_id)
        .arg(&req.dest_station_id)
        .arg(&req.seat_number)
        .arg(&req.journey_date)
        .arg(&req.fare)
        .arg(&req.payment_method)
}

pub fn revenue_report(req: &RevenueReportRequest) -> ProcedureCall {
    ProcedureCall::new(REVENUE_REPORT)
        .arg(&req.start_date)
        .arg(&req.end_date)
}

pub fn passenger_age(passenger_id: i64) -> Statement {
    Statement::query("SELECT fn_calculate_passenger_age(?) AS age").bind(passenger_id)
}

pub fn seat_availability(req: &SeatCheckRequest) -> Statement {
    Statement::query("SELECT fn_check_seat_availability(?, ?, ?) AS status")
        .bind(&req.schedule_id)
        .bind(&req.journey_date)
        .bind(&req.seat_number)
}
