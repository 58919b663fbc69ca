//! Stations and vehicles.

use transpotrack_data::{Statement, Value};

use crate::models::{StationRequest, VehicleRequest};

pub fn list_stations() -> Statement {
    Statement::query("SELECT * FROM STATION ORDER BY StationID DESC")
}

fn station_capacity(req: &StationRequest) -> Value {
    req.capacity.as_ref().map(Value::from).unwrap_or(Value::Int(0))
}

pub fn create_station(req: &StationRequest) -> Statement {
    Statement::mutation(
        "INSERT INTO STATION (StationCode, Name, Location, Type, Capacity, Zone, Status) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&req.station_code)
    .bind(&req.name)
    .bind(&req.location)
    .bind(&req.r#type)
    .bind(station_capacity(req))
    .bind(req.zone.as_deref().unwrap_or(""))
    .bind(req.status.as_deref().unwrap_or("Operational"))
}

pub fn update_station(id: i64, req: &StationRequest) -> Statement {
    Statement::mutation(
        "UPDATE STATION \
         SET StationCode = ?, Name = ?, Location = ?, Type = ?, Capacity = ?, Zone = ?, Status = ? \
         WHERE StationID = ?",
    )
    .bind(&req.station_code)
    .bind(&req.name)
    .bind(&req.location)
    .bind(&req.r#type)
    .bind(station_capacity(req))
    .bind(req.zone.as_deref().unwrap_or(""))
    .bind(req.status.as_deref().unwrap_or("Operational"))
    .bind(id)
}

pub fn delete_station(id: i64) -> Statement {
    Statement::mutation("DELETE FROM STATION WHERE StationID = ?").bind(id)
}

pub fn list_vehicles() -> Statement {
    Statement::query("SELECT * FROM VEHICLE ORDER BY VehicleID DESC")
}

pub fn create_vehicle(req: &VehicleRequest) -> Statement {
    Statement::mutation(
        "INSERT INTO VEHICLE (VehicleNumber, Type, Model, Capacity, RegistrationNumber, FuelType, Status) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&req.vehicle_number)
    .bind(&req.r#type)
    .bind(req.model.as_deref().unwrap_or(""))
    .bind(&req.capacity)
    .bind(&req.registration_number)
    .bind(req.fuel_type.as_deref().unwrap_or("Diesel"))
    .bind(req.status.as_deref().unwrap_or("Active"))
}

pub fn update_vehicle(id: i64, req: &VehicleRequest) -> Statement {
    Statement::mutation(
        "UPDATE VEHICLE \
         SET VehicleNumber = ?, Type = ?, Model = ?, Capacity = ?, RegistrationNumber = ?, FuelType = ?, Status = ? \
         WHERE VehicleID = ?",
    )
    .bind(&req.vehicle_number)
    .bind(&req.r#type)
    .bind(req.model.as_deref().unwrap_or(""))
    .bind(&req.capacity)
    .bind(&req.registration_number)
    .bind(req.fuel_type.as_deref().unwrap_or("Diesel"))
    .bind(req.status.as_deref().unwrap_or("Active"))
    .bind(id)
}

pub fn delete_vehicle(id: i64) -> Statement {
    Statement::mutation("DELETE FROM VEHICLE WHERE VehicleID = ?").bind(id)
}
