use tracing::warn;
use transpotrack_data::{DataAccess, Statement};

use crate::models::DashboardStats;

const ACTIVE_PASSENGERS: &str = "SELECT COUNT(*) AS count FROM PASSENGER WHERE Status = 'Active'";
const BOOKED_TICKETS: &str = "SELECT COUNT(*) AS count FROM TICKET WHERE TicketStatus = 'Booked'";
const ACTIVE_PASSES: &str = "SELECT COUNT(*) AS count FROM PASS WHERE PassStatus = 'Active'";
const COMPLETED_REVENUE: &str =
    "SELECT COALESCE(SUM(Amount), 0) AS revenue FROM PAYMENT WHERE Status = 'Completed'";
const PENDING_COMPLAINTS: &str = "SELECT COUNT(*) AS count FROM COMPLAINT WHERE Status = 'Pending'";
const ACTIVE_VEHICLES: &str = "SELECT COUNT(*) AS count FROM VEHICLE WHERE Status = 'Active'";

/// `column` of the first row; `None` on any failure.
async fn scalar(db: &dyn DataAccess, sql: &'static str, column: &str) -> Option<f64> {
    match db.execute(Statement::query(sql)).await {
        Ok(outcome) => outcome.first()?.get(column)?.as_f64(),
        Err(err) => {
            warn!(sql, error = %err, "dashboard count failed");
            None
        }
    }
}

async fn count(db: &dyn DataAccess, sql: &'static str) -> i64 {
    scalar(db, sql, "count").await.map(|n| n as i64).unwrap_or(0)
}

/// Gather the dashboard counters. A failed counter reads as zero.
pub async fn collect(db: &dyn DataAccess) -> DashboardStats {
    DashboardStats {
        total_passengers: count(db, ACTIVE_PASSENGERS).await,
        total_tickets: count(db, BOOKED_TICKETS).await,
        active_passes: count(db, ACTIVE_PASSES).await,
        total_revenue: scalar(db, COMPLETED_REVENUE, "revenue").await.unwrap_or(0.0),
        pending_complaints: count(db, PENDING_COMPLAINTS).await,
        active_vehicles: count(db, ACTIVE_VEHICLES).await,
    }
}
