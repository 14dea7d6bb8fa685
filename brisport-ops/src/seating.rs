//! Seat allocation for the fixed 10-row, four-column grid.
//!
//! Resolution is pure planning over an immutable flight: callers get a
//! [`SeatPlan`] back and apply it only once every other booking check has
//! passed, so a failed booking never leaves a half-written seat map.

use brisport_catalog::{reference, validate, ValidationError};
use brisport_shared::Flight;

use crate::OpsError;

const SEAT_COUNT: usize = reference::SEAT_ROWS as usize * reference::SEAT_COLUMNS.len();

/// A seat position with a cyclic linear index in row-major order:
/// 1A is 0, 1D is 3, 2A is 4, 10D is 39.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seat {
    row: u8,
    col: u8,
}

impl Seat {
    pub fn parse(code: &str) -> Option<Self> {
        if !validate::valid_seat(code) {
            return None;
        }
        let (row, col) = code.split_at(code.len() - 1);
        let row: u8 = row.parse().ok()?;
        let col = reference::SEAT_COLUMNS.find(col)? as u8;
        Some(Self { row, col })
    }

    pub fn code(&self) -> String {
        let col = reference::SEAT_COLUMNS.as_bytes()[self.col as usize] as char;
        format!("{}{}", self.row, col)
    }

    fn index(self) -> usize {
        (self.row as usize - 1) * reference::SEAT_COLUMNS.len() + self.col as usize
    }

    fn from_index(index: usize) -> Self {
        let cols = reference::SEAT_COLUMNS.len();
        Self { row: (index / cols) as u8 + 1, col: (index % cols) as u8 }
    }

    /// Every seat in row-major, column-ascending order.
    fn all() -> impl Iterator<Item = Seat> {
        (0..SEAT_COUNT).map(Seat::from_index)
    }
}

/// Where the requester sits and, when a privileged request displaced the
/// prior holder, where that holder moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatPlan {
    pub seat: String,
    pub displaced: Option<Displaced>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Displaced {
    pub email: String,
    pub seat: String,
}

/// First unoccupied seat in row-major order.
pub fn auto_assign(flight: &Flight) -> Result<SeatPlan, OpsError> {
    Seat::all()
        .map(|s| s.code())
        .find(|code| !flight.bookings.contains_key(code))
        .map(|seat| SeatPlan { seat, displaced: None })
        .ok_or(OpsError::FlightFull)
}

/// Resolve an explicit seat request. An occupied seat goes to a privileged
/// requester, with the prior holder moved to the next incremental seat;
/// anyone else is turned away.
pub fn request_seat(flight: &Flight, raw: &str, privileged: bool) -> Result<SeatPlan, OpsError> {
    let code = raw.trim().to_uppercase();
    let seat =
        Seat::parse(&code).ok_or_else(|| ValidationError::InvalidSeat(raw.to_string()))?;
    match flight.bookings.get(&code) {
        None => Ok(SeatPlan { seat: code, displaced: None }),
        Some(holder) if privileged => {
            let next = next_incremental(flight, seat).ok_or(OpsError::FlightFull)?;
            Ok(SeatPlan {
                seat: code,
                displaced: Some(Displaced { email: holder.clone(), seat: next.code() }),
            })
        }
        Some(_) => Err(OpsError::SeatTaken(code)),
    }
}

/// The first free seat scanning forward cyclically from `taken`: remaining
/// columns of its row, then subsequent rows, wrapping 10D back to 1A and
/// stopping just before reaching `taken` again.
fn next_incremental(flight: &Flight, taken: Seat) -> Option<Seat> {
    let start = taken.index();
    (1..SEAT_COUNT)
        .map(|offset| Seat::from_index((start + offset) % SEAT_COUNT))
        .find(|s| !flight.bookings.contains_key(&s.code()))
}

/// Write a resolved plan into the flight's booking map.
pub(crate) fn apply(flight: &mut Flight, plan: &SeatPlan, email: &str) {
    flight.bookings.insert(plan.seat.clone(), email.to_string());
    if let Some(displaced) = &plan.displaced {
        flight.bookings.insert(displaced.seat.clone(), displaced.email.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brisport_shared::Direction;
    use chrono::NaiveDate;

    fn empty_flight() -> Flight {
        let when = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        Flight::new("JST", "JST101", "Sydney", "JST1A", when, Direction::Arrival)
    }

    fn occupy(flight: &mut Flight, seats: &[&str]) {
        for (i, seat) in seats.iter().enumerate() {
            flight.bookings.insert(seat.to_string(), format!("pax{i}@example.com"));
        }
    }

    #[test]
    fn test_seat_parse_and_code_round() {
        assert_eq!(Seat::parse("1A").map(|s| s.index()), Some(0));
        assert_eq!(Seat::parse("10D").map(|s| s.index()), Some(39));
        assert_eq!(Seat::parse("2b"), None); // lowercase is the caller's problem
        assert_eq!(Seat::parse("11A"), None);
        assert_eq!(Seat::from_index(4).code(), "2A");
    }

    #[test]
    fn test_auto_assign_scans_row_major() {
        let mut flight = empty_flight();
        assert_eq!(auto_assign(&flight).unwrap().seat, "1A");

        occupy(
            &mut flight,
            &["1A", "1B", "1C", "1D", "2A", "2B", "2C", "2D", "3A", "3B", "3C", "3D"],
        );
        assert_eq!(auto_assign(&flight).unwrap().seat, "4A");
    }

    #[test]
    fn test_auto_assign_full_flight() {
        let mut flight = empty_flight();
        let all: Vec<String> = Seat::all().map(|s| s.code()).collect();
        occupy(&mut flight, &all.iter().map(String::as_str).collect::<Vec<_>>());

        assert!(matches!(auto_assign(&flight).unwrap_err(), OpsError::FlightFull));
    }

    #[test]
    fn test_requested_free_seat_is_normalized() {
        let flight = empty_flight();
        let plan = request_seat(&flight, " 2b ", false).unwrap();
        assert_eq!(plan.seat, "2B");
        assert_eq!(plan.displaced, None);
    }

    #[test]
    fn test_malformed_seat_is_rejected() {
        let flight = empty_flight();
        let err = request_seat(&flight, "12Z", false).unwrap_err();
        assert!(matches!(err, OpsError::Validation(ValidationError::InvalidSeat(_))));
    }

    #[test]
    fn test_occupied_seat_without_privilege() {
        let mut flight = empty_flight();
        occupy(&mut flight, &["2B"]);

        let err = request_seat(&flight, "2B", false).unwrap_err();
        assert_eq!(err, OpsError::SeatTaken("2B".to_string()));
    }

    #[test]
    fn test_displacement_moves_holder_to_next_free_seat() {
        let mut flight = empty_flight();
        flight.bookings.insert("2B".to_string(), "holder@example.com".to_string());

        let plan = request_seat(&flight, "2B", true).unwrap();
        assert_eq!(plan.seat, "2B");
        let displaced = plan.displaced.unwrap();
        assert_eq!(displaced.email, "holder@example.com");
        assert_eq!(displaced.seat, "2C");
    }

    #[test]
    fn test_displacement_skips_occupied_neighbours() {
        let mut flight = empty_flight();
        occupy(&mut flight, &["2B", "2C", "2D", "3A"]);

        let plan = request_seat(&flight, "2B", true).unwrap();
        assert_eq!(plan.displaced.unwrap().seat, "3B");
    }

    #[test]
    fn test_displacement_wraps_from_last_row() {
        let mut flight = empty_flight();
        occupy(&mut flight, &["10C", "10D"]);

        let plan = request_seat(&flight, "10C", true).unwrap();
        assert_eq!(plan.displaced.unwrap().seat, "1A");
    }

    #[test]
    fn test_displacement_on_full_flight_fails() {
        let mut flight = empty_flight();
        let all: Vec<String> = Seat::all().map(|s| s.code()).collect();
        occupy(&mut flight, &all.iter().map(String::as_str).collect::<Vec<_>>());

        let err = request_seat(&flight, "2B", true).unwrap_err();
        assert!(matches!(err, OpsError::FlightFull));
    }

    #[test]
    fn test_apply_writes_both_assignments() {
        let mut flight = empty_flight();
        flight.bookings.insert("2B".to_string(), "holder@example.com".to_string());

        let plan = request_seat(&flight, "2B", true).unwrap();
        apply(&mut flight, &plan, "flyer@example.com");

        assert_eq!(flight.bookings.get("2B").map(String::as_str), Some("flyer@example.com"));
        assert_eq!(flight.bookings.get("2C").map(String::as_str), Some("holder@example.com"));
    }
}
