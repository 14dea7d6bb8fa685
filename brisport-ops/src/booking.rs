//! Booking coordination: per-direction booking limits, travel-order
//! enforcement, seat resolution, point crediting and ticket minting.

use brisport_catalog::{reference, ValidationError};
use brisport_shared::{Direction, Flight, Ticket, User};

use crate::{seating, FlightOps, OpsError};

impl FlightOps {
    pub fn book_arrival(
        &mut self,
        user: &mut User,
        flight_code: &str,
        seat: Option<&str>,
    ) -> Result<Ticket, OpsError> {
        self.book(user, flight_code, Direction::Arrival, seat)
    }

    pub fn book_departure(
        &mut self,
        user: &mut User,
        flight_code: &str,
        seat: Option<&str>,
    ) -> Result<Ticket, OpsError> {
        self.book(user, flight_code, Direction::Departure, seat)
    }

    pub fn tickets_for_user(&self, email: &str) -> Vec<&Ticket> {
        self.tickets.for_user(email)
    }

    /// All checks run against immutable state first; the seat map, points
    /// balance and ticket set are only touched once nothing can fail.
    fn book(
        &mut self,
        user: &mut User,
        flight_code: &str,
        direction: Direction,
        requested_seat: Option<&str>,
    ) -> Result<Ticket, OpsError> {
        let not_found = || OpsError::FlightNotFound { code: flight_code.to_string(), direction };

        let flight = self.flights.get(flight_code, direction).ok_or_else(not_found)?;
        self.check_booking_state(user, flight)?;

        let plan = match requested_seat {
            Some(raw) => seating::request_seat(flight, raw, user.has_displacement_privilege())?,
            None => seating::auto_assign(flight)?,
        };

        let other_city = flight.other_city.clone();
        let booked_time = flight.effective_time();
        let points = if user.earns_points() {
            reference::city_points(&other_city)
                .ok_or_else(|| ValidationError::UnknownCity(other_city.clone()))?
        } else {
            0
        };

        let flight = self.flights.get_mut(flight_code, direction).ok_or_else(not_found)?;
        seating::apply(flight, &plan, &user.email);
        user.add_points(points);

        let ticket =
            Ticket::new(&user.email, flight_code, direction, &plan.seat, &other_city, booked_time, points);
        tracing::debug!(
            email = %user.email,
            code = %flight_code,
            %direction,
            seat = %plan.seat,
            displaced = plan.displaced.is_some(),
            "booking confirmed"
        );
        self.tickets.add(ticket.clone());
        Ok(ticket)
    }

    /// At most one ticket per direction, and a departure must leave
    /// strictly after the held arrival's current effective time.
    fn check_booking_state(&self, user: &User, target: &Flight) -> Result<(), OpsError> {
        let held = self.tickets.for_user(&user.email);
        if held.iter().any(|t| t.direction == target.direction) {
            return Err(OpsError::AlreadyBooked(target.direction));
        }
        if target.direction == Direction::Departure {
            if let Some(arrival_ticket) =
                held.iter().find(|t| t.direction == Direction::Arrival)
            {
                if let Some(arrival) =
                    self.flights.get(&arrival_ticket.flight_code, Direction::Arrival)
                {
                    if target.effective_time() <= arrival.effective_time() {
                        return Err(OpsError::DepartureNotAfterArrival);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{at, manager};
    use brisport_shared::Role;

    fn traveller(email: &str) -> User {
        User::new("Ada", 35, email, "0400000001", String::new(), Role::Traveller)
    }

    fn frequent_flyer(email: &str, points: u32) -> User {
        User::new(
            "Grace",
            41,
            email,
            "0400000002",
            String::new(),
            Role::FrequentFlyer { number: 123456, points },
        )
    }

    /// Arrival JST101 from Sydney at 09:00 and departure JST102 to
    /// Melbourne at 12:00, both on plane JST1A.
    fn ops_with_turnaround() -> FlightOps {
        let mut ops = FlightOps::new();
        let m = manager();
        ops.register_arrival(&m, "JST", "JST101", "Sydney", "JST1A", at(9, 0)).unwrap();
        ops.register_departure(&m, "JST", "JST102", "Melbourne", "JST1A", at(12, 0)).unwrap();
        ops
    }

    #[test]
    fn test_unknown_flight() {
        let mut ops = ops_with_turnaround();
        let mut user = traveller("ada@example.com");

        let err = ops.book_arrival(&mut user, "JST999", None).unwrap_err();
        assert!(matches!(err, OpsError::FlightNotFound { .. }));
    }

    #[test]
    fn test_one_ticket_per_direction() {
        let mut ops = ops_with_turnaround();
        let mut user = traveller("ada@example.com");

        ops.book_arrival(&mut user, "JST101", None).unwrap();
        let err = ops.book_arrival(&mut user, "JST101", None).unwrap_err();
        assert_eq!(err, OpsError::AlreadyBooked(Direction::Arrival));
    }

    #[test]
    fn test_departure_must_be_after_arrival() {
        let mut ops = FlightOps::new();
        let m = manager();
        ops.register_arrival(&m, "JST", "JST101", "Sydney", "JST1A", at(12, 0)).unwrap();
        // Departs at the exact arrival time: not strictly after.
        ops.register_departure(&m, "QFA", "QFA400", "Melbourne", "QFA1A", at(12, 0)).unwrap();
        ops.register_departure(&m, "VOZ", "VOZ500", "Perth", "VOZ1A", at(12, 1)).unwrap();

        let mut user = traveller("ada@example.com");
        ops.book_arrival(&mut user, "JST101", None).unwrap();

        let err = ops.book_departure(&mut user, "QFA400", None).unwrap_err();
        assert_eq!(err, OpsError::DepartureNotAfterArrival);

        // One minute later is enough.
        ops.book_departure(&mut user, "VOZ500", None).unwrap();
    }

    #[test]
    fn test_departure_ordering_tracks_live_delays() {
        let mut ops = ops_with_turnaround();
        let m = manager();
        let mut user = traveller("ada@example.com");
        ops.book_arrival(&mut user, "JST101", None).unwrap();

        // The arrival slips past the departure it was comfortably ahead of;
        // the cascade pushes the linked departure too, keeping it bookable.
        ops.delay_arrival(&m, "JST101", 200).unwrap();
        ops.book_departure(&mut user, "JST102", None).unwrap();
    }

    #[test]
    fn test_booking_both_orders_allowed() {
        let mut ops = ops_with_turnaround();

        let mut first = traveller("first@example.com");
        ops.book_arrival(&mut first, "JST101", None).unwrap();
        ops.book_departure(&mut first, "JST102", None).unwrap();

        // Departure first is just as legal.
        let mut second = traveller("second@example.com");
        ops.book_departure(&mut second, "JST102", None).unwrap();
        ops.book_arrival(&mut second, "JST101", None).unwrap();

        assert_eq!(ops.tickets_for_user("first@example.com").len(), 2);
        assert_eq!(ops.tickets_for_user("second@example.com").len(), 2);
    }

    #[test]
    fn test_ticket_captures_booking_moment() {
        let mut ops = ops_with_turnaround();
        let m = manager();
        ops.delay_arrival(&m, "JST101", 30).unwrap();

        let mut user = traveller("ada@example.com");
        let ticket = ops.book_arrival(&mut user, "JST101", None).unwrap();
        assert_eq!(ticket.booked_time, at(9, 30));
        assert_eq!(ticket.other_city, "Sydney");
        assert_eq!(ticket.seat, "1A");
        assert_eq!(ticket.points_earned, 0);

        // A later delay does not rewrite the issued ticket.
        ops.delay_arrival(&m, "JST101", 60).unwrap();
        assert_eq!(ops.tickets_for_user("ada@example.com")[0].booked_time, at(9, 30));
    }

    #[test]
    fn test_frequent_flyer_earns_city_points() {
        let mut ops = ops_with_turnaround();
        let mut flyer = frequent_flyer("grace@example.com", 100);

        let ticket = ops.book_arrival(&mut flyer, "JST101", None).unwrap();
        assert_eq!(ticket.points_earned, 1200); // Sydney
        assert_eq!(flyer.points(), Some(1300));

        let ticket = ops.book_departure(&mut flyer, "JST102", None).unwrap();
        assert_eq!(ticket.points_earned, 1750); // Melbourne
        assert_eq!(flyer.points(), Some(3050));
    }

    #[test]
    fn test_seat_conflict_leaves_everything_untouched() {
        let mut ops = ops_with_turnaround();
        let mut first = traveller("first@example.com");
        ops.book_arrival(&mut first, "JST101", Some("2B")).unwrap();

        let mut second = traveller("second@example.com");
        let err = ops.book_arrival(&mut second, "JST101", Some("2B")).unwrap_err();
        assert_eq!(err, OpsError::SeatTaken("2B".to_string()));

        let flight = ops.get_flight("JST101", Direction::Arrival).unwrap();
        assert_eq!(flight.bookings.len(), 1);
        assert_eq!(flight.bookings.get("2B").map(String::as_str), Some("first@example.com"));
        assert!(ops.tickets_for_user("second@example.com").is_empty());
    }

    #[test]
    fn test_frequent_flyer_displaces_traveller() {
        let mut ops = ops_with_turnaround();
        let mut first = traveller("first@example.com");
        ops.book_arrival(&mut first, "JST101", Some("2B")).unwrap();

        let mut flyer = frequent_flyer("grace@example.com", 0);
        let ticket = ops.book_arrival(&mut flyer, "JST101", Some("2B")).unwrap();
        assert_eq!(ticket.seat, "2B");

        let flight = ops.get_flight("JST101", Direction::Arrival).unwrap();
        assert_eq!(flight.bookings.get("2B").map(String::as_str), Some("grace@example.com"));
        assert_eq!(flight.bookings.get("2C").map(String::as_str), Some("first@example.com"));
    }

    #[test]
    fn test_failed_displacement_aborts_whole_booking() {
        let mut ops = ops_with_turnaround();

        // Fill the flight: 40 travellers, auto-assigned.
        for i in 0..40 {
            let mut pax = traveller(&format!("pax{i}@example.com"));
            ops.book_arrival(&mut pax, "JST101", None).unwrap();
        }

        let mut flyer = frequent_flyer("grace@example.com", 100);
        let err = ops.book_arrival(&mut flyer, "JST101", Some("2B")).unwrap_err();
        assert!(matches!(err, OpsError::FlightFull));

        // No seat moved, no points credited, no ticket issued.
        let flight = ops.get_flight("JST101", Direction::Arrival).unwrap();
        assert_eq!(flight.bookings.get("2B").map(String::as_str), Some("pax5@example.com"));
        assert_eq!(flyer.points(), Some(100));
        assert!(ops.tickets_for_user("grace@example.com").is_empty());
    }
}
