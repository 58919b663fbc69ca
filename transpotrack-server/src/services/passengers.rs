use transpotrack_data::Statement;

use crate::models::PassengerRequest;

/// Every passenger with their phone numbers joined into one column.
pub fn list() -> Statement {
    Statement::query(
        "SELECT p.*, GROUP_CONCAT(pp.PhoneNumber SEPARATOR ', ') AS PhoneNumbers \
         FROM PASSENGER p \
         LEFT JOIN PASSENGER_PHONE pp ON p.PassengerID = pp.PassengerID \
         GROUP BY p.PassengerID \
         ORDER BY p.PassengerID DESC",
    )
}

pub fn find(id: i64) -> Statement {
    Statement::query("SELECT * FROM PASSENGER WHERE PassengerID = ?").bind(id)
}

pub fn create(req: &PassengerRequest) -> Statement {
    Statement::mutation(
        "INSERT INTO PASSENGER (FirstName, LastName, Email, DateOfBirth, Address, City, Status) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(&req.date_of_birth)
    .bind(req.address.as_deref().unwrap_or(""))
    .bind(req.city.as_deref().unwrap_or(""))
    .bind(req.status_or_default())
}

/// Record `phone` as the primary mobile number of `passenger_id`.
pub fn add_primary_phone(passenger_id: u64, phone: &str) -> Statement {
    Statement::mutation(
        "INSERT INTO PASSENGER_PHONE (PassengerID, PhoneNumber, PhoneType, IsPrimary) \
         VALUES (?, ?, 'Mobile', TRUE)",
    )
    .bind(passenger_id)
    .bind(phone)
}

pub fn update(id: i64, req: &PassengerRequest) -> Statement {
    Statement::mutation(
        "UPDATE PASSENGER \
         SET FirstName = ?, LastName = ?, Email = ?, DateOfBirth = ?, Address = ?, City = ?, Status = ? \
         WHERE PassengerID = ?",
    )
    .bind(&req.first_name)
    .bind(&req.last_name)
    .bind(&req.email)
    .bind(&req.date_of_birth)
    .bind(req.address.as_deref().unwrap_or(""))
    .bind(req.city.as_deref().unwrap_or(""))
    .bind(req.status_or_default())
    .bind(id)
}

pub fn delete(id: i64) -> Statement {
    Statement::mutation("DELETE FROM PASSENGER WHERE PassengerID = ?").bind(id)
}
