//! Tickets, passes and complaints as seen from the admin pages.

use transpotrack_data::Statement;

use crate::models::ComplaintStatusRequest;

/// Tickets with passenger name, schedule code and both station names.
pub fn list_tickets() -> Statement {
    Statement::query(
        "SELECT t.*, \
                CONCAT(p.FirstName, ' ', p.LastName) AS PassengerName, \
                s.ScheduleCode, \
                src.Name AS SourceStation, \
                dest.Name AS DestinationStation \
         FROM TICKET t \
         JOIN PASSENGER p ON t.PassengerID = p.PassengerID \
         JOIN SCHEDULE s ON t.ScheduleID = s.ScheduleID \
         JOIN STATION src ON t.SourceStationID = src.StationID \
         JOIN STATION dest ON t.DestStationID = dest.StationID \
         ORDER BY t.TicketNumber DESC",
    )
}

pub fn list_passes() -> Statement {
    Statement::query(
        "SELECT p.*, CONCAT(ps.FirstName, ' ', ps.LastName) AS PassengerName \
         FROM PASS p \
         JOIN PASSENGER ps ON p.PassengerID = ps.PassengerID \
         ORDER BY p.PassID DESC",
    )
}

pub fn list_complaints() -> Statement {
    Statement::query(
        "SELECT c.*, CONCAT(p.FirstName, ' ', p.LastName) AS PassengerName \
         FROM COMPLAINT c \
         JOIN PASSENGER p ON c.PassengerID = p.PassengerID \
         ORDER BY c.ComplaintID DESC",
    )
}

/// Set a complaint's status and resolution; stamps `ResolvedAt`.
pub fn update_complaint_status(id: i64, req: &ComplaintStatusRequest) -> Statement {
    Statement::mutation(
        "UPDATE COMPLAINT SET Status = ?, Resolution = ?, ResolvedAt = NOW() WHERE ComplaintID = ?",
    )
    .bind(&req.status)
    .bind(req.resolution.as_deref().unwrap_or(""))
    .bind(id)
}
