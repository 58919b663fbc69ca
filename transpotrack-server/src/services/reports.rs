//! Fixed analytical queries.

use transpotrack_data::Statement;

/// Passengers whose total ticket spending is above the per-passenger average.
pub fn above_average_spenders() -> Statement {
    Statement::query(
        "SELECT p.PassengerID, CONCAT(p.FirstName, ' ', p.LastName) AS Name, \
                COUNT(t.TicketNumber) AS TotalTickets, \
                SUM(t.Fare) AS TotalSpending \
         FROM PASSENGER p \
         JOIN TICKET t ON p.PassengerID = t.PassengerID \
         GROUP BY p.PassengerID, p.FirstName, p.LastName \
         HAVING SUM(t.Fare) > ( \
             SELECT AVG(TotalFare) \
             FROM (SELECT SUM(Fare) AS TotalFare FROM TICKET GROUP BY PassengerID) AS AvgSpending \
         ) \
         ORDER BY TotalSpending DESC",
    )
}

/// Each route with its stations in travel order.
pub fn route_stations() -> Statement {
    Statement::query(
        "SELECT r.RouteCode, r.Name AS RouteName, r.TotalDistance, \
                GROUP_CONCAT(s.Name ORDER BY rs.SequenceNumber SEPARATOR ' → ') AS Stations, \
                COUNT(DISTINCT rs.StationID) AS StationCount \
         FROM ROUTE r \
         JOIN ROUTE_STATION rs ON r.RouteID = rs.RouteID \
         JOIN STATION s ON rs.StationID = s.StationID \
         GROUP BY r.RouteID, r.RouteCode, r.Name, r.TotalDistance \
         ORDER BY r.RouteID",
    )
}

/// Completed payment totals per payment method.
pub fn revenue_by_payment_method() -> Statement {
    Statement::query(
        "SELECT PaymentMethod, \
                COUNT(*) AS TransactionCount, \
                SUM(Amount) AS TotalRevenue, \
                AVG(Amount) AS AverageAmount, \
                MIN(Amount) AS MinAmount, \
                MAX(Amount) AS MaxAmount \
         FROM PAYMENT \
         WHERE Status = 'Completed' \
         GROUP BY PaymentMethod \
         ORDER BY TotalRevenue DESC",
    )
}

/// Bookings per day over the last 30 days.
pub fn daily_bookings() -> Statement {
    Statement::query(
        "SELECT DATE(BookingDateTime) AS BookingDate, \
                COUNT(*) AS TotalBookings, \
                SUM(Fare) AS Revenue, \
                COUNT(DISTINCT PassengerID) AS UniquePassengers \
         FROM TICKET \
         WHERE BookingDateTime >= DATE_SUB(CURDATE(), INTERVAL 30 DAY) \
         GROUP BY DATE(BookingDateTime) \
         ORDER BY BookingDate DESC",
    )
}

/// The ten most booked routes.
pub fn popular_routes() -> Statement {
    Statement::query(
        "SELECT r.RouteCode, r.Name, COUNT(t.TicketNumber) AS BookingCount, SUM(t.Fare) AS TotalRevenue \
         FROM ROUTE r \
         JOIN SCHEDULE sch ON r.RouteID = sch.RouteID \
         JOIN TICKET t ON sch.ScheduleID = t.ScheduleID \
         GROUP BY r.RouteID, r.RouteCode, r.Name \
         ORDER BY BookingCount DESC \
         LIMIT 10",
    )
}
