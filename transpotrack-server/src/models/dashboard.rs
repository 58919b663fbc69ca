use serde::Serialize;

/// Headline counts for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_passengers: i64,
    pub total_tickets: i64,
    pub active_passes: i64,
    pub total_revenue: f64,
    pub pending_complaints: i64,
    pub active_vehicles: i64,
}
