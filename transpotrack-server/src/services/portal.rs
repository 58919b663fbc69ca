//! The passenger portal: recent rows and self-service writes.

use rand::Rng;
use transpotrack_data::Statement;

use super::codes::{pass_duration_days, reference_code, seat_number};
use crate::models::{FileComplaintRequest, PassApplication, PortalTicketRequest};

/// Rows shown per portal list.
pub const RECENT_LIMIT: u32 = 20;

pub fn recent_schedules() -> Statement {
    Statement::query("SELECT * FROM SCHEDULE ORDER BY ScheduleID DESC LIMIT ?").bind(RECENT_LIMIT)
}

pub fn recent_tickets() -> Statement {
    Statement::query("SELECT * FROM TICKET ORDER BY TicketNumber DESC LIMIT ?").bind(RECENT_LIMIT)
}

pub fn recent_passes() -> Statement {
    Statement::query("SELECT * FROM PASS ORDER BY PassID DESC LIMIT ?").bind(RECENT_LIMIT)
}

pub fn recent_complaints() -> Statement {
    Statement::query("SELECT * FROM COMPLAINT ORDER BY ComplaintID DESC LIMIT ?").bind(RECENT_LIMIT)
}

/// A booked ticket with a fresh `TKT` code and a random seat.
pub fn book_ticket(req: &PortalTicketRequest, rng: &mut impl Rng) -> Statement {
    Statement::mutation(
        "INSERT INTO TICKET (TicketCode, SeatNumber, JourneyDate, Fare, PassengerID, \
                             ScheduleID, SourceStationID, DestStationID, TicketStatus) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'Booked')",
    )
    .bind(reference_code("TKT", rng))
    .bind(seat_number(rng))
    .bind(req.effective_journey_date())
    .bind(&req.fare)
    .bind(&req.passenger_id)
    .bind(&req.schedule_id)
    .bind(&req.from_station)
    .bind(&req.to_station)
}

/// An active pass with a fresh `PASS` code, ending after the pass type's duration.
pub fn apply_for_pass(req: &PassApplication, rng: &mut impl Rng) -> Statement {
    Statement::mutation(
        "INSERT INTO PASS (PassCode, PassType, StartDate, EndDate, Price, PassengerID, PassStatus) \
         VALUES (?, ?, ?, DATE_ADD(?, INTERVAL ? DAY), ?, ?, 'Active')",
    )
    .bind(reference_code("PASS", rng))
    .bind(&req.pass_type)
    .bind(&req.start_date)
    .bind(&req.start_date)
    .bind(pass_duration_days(&req.pass_type))
    .bind(&req.price)
    .bind(&req.passenger_id)
}

/// A pending, medium-priority complaint with a fresh `COMP` code.
pub fn file_complaint(req: &FileComplaintRequest, rng: &mut impl Rng) -> Statement {
    Statement::mutation(
        "INSERT INTO COMPLAINT (ComplaintCode, Title, Description, PassengerID, Category, Priority, Status) \
         VALUES (?, ?, ?, ?, ?, 'Medium', 'Pending')",
    )
    .bind(reference_code("COMP", rng))
    .bind(req.subject_or_default())
    .bind(&req.description)
    .bind(&req.passenger_id)
    .bind(req.category_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use transpotrack_data::Value;

    #[test]
    fn pass_end_date_uses_type_duration() {
        let application = PassApplication {
            pass_type: "Weekly".into(),
            start_date: "2025-06-01".into(),
            price: 150i64.into(),
            passenger_id: 9i64.into(),
        };
        let statement = apply_for_pass(&application, &mut StdRng::seed_from_u64(1));

        assert_eq!(statement.placeholder_count(), statement.params().len());
        assert_eq!(statement.params()[2], Value::Text("2025-06-01".into()));
        assert_eq!(statement.params()[3], Value::Text("2025-06-01".into()));
        assert_eq!(statement.params()[4], Value::Int(7));
        let code = statement.params()[0].as_str().unwrap();
        assert!(code.starts_with("PASS"));
    }

    #[test]
    fn recent_lists_are_bounded() {
        for statement in [recent_schedules(), recent_tickets(), recent_passes(), recent_complaints()] {
            assert_eq!(statement.params(), [Value::UInt(20)]);
        }
    }
}
