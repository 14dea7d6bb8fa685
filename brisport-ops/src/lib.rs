pub mod booking;
pub mod delay;
pub mod seating;

use brisport_catalog::{reference, validate, ValidationError};
use brisport_shared::{Direction, Flight, User};
use brisport_store::{FlightRepo, StoreError, TicketRepo};
use chrono::NaiveDateTime;

pub use seating::{SeatPlan, Displaced};

/// Flight operations service: registration, seat booking, delay handling
/// and the flight-board query. Owns the flight and ticket repositories;
/// user records stay with the auth layer and are borrowed per call.
#[derive(Debug, Default)]
pub struct FlightOps {
    flights: FlightRepo,
    tickets: TicketRepo,
}

impl FlightOps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_arrival(
        &mut self,
        manager: &User,
        airline: &str,
        code: &str,
        from_city: &str,
        plane_id: &str,
        time: NaiveDateTime,
    ) -> Result<Flight, OpsError> {
        self.register(manager, airline, code, from_city, plane_id, time, Direction::Arrival)
    }

    pub fn register_departure(
        &mut self,
        manager: &User,
        airline: &str,
        code: &str,
        to_city: &str,
        plane_id: &str,
        time: NaiveDateTime,
    ) -> Result<Flight, OpsError> {
        self.register(manager, airline, code, to_city, plane_id, time, Direction::Departure)
    }

    fn register(
        &mut self,
        manager: &User,
        airline: &str,
        code: &str,
        city: &str,
        plane_id: &str,
        time: NaiveDateTime,
        direction: Direction,
    ) -> Result<Flight, OpsError> {
        self.check_manager(manager)?;
        check_flight_ids(airline, code, city, plane_id)?;
        let flight = Flight::new(airline, code, city, plane_id, time, direction);
        self.flights.add(flight.clone())?;
        Ok(flight)
    }

    /// Flight board, ascending by effective time.
    pub fn list_flights(&self) -> Vec<&Flight> {
        self.flights.all_sorted()
    }

    pub fn get_flight(&self, code: &str, direction: Direction) -> Option<&Flight> {
        self.flights.get(code, direction)
    }

    fn check_manager(&self, user: &User) -> Result<(), OpsError> {
        if user.can_manage_flights() {
            Ok(())
        } else {
            Err(OpsError::NotManager)
        }
    }
}

/// Consistency checks on the identifiers of a new flight. The airline must
/// be a known carrier and must prefix both the flight code and the plane id.
fn check_flight_ids(
    airline: &str,
    code: &str,
    city: &str,
    plane_id: &str,
) -> Result<(), ValidationError> {
    if !reference::is_airline_code(airline) {
        return Err(ValidationError::InvalidAirline(airline.to_string()));
    }
    if !validate::valid_flight_code(code) {
        return Err(ValidationError::InvalidFlightCode(code.to_string()));
    }
    if !validate::valid_plane_id(plane_id) {
        return Err(ValidationError::InvalidPlaneId(plane_id.to_string()));
    }
    if !code.starts_with(airline) {
        return Err(ValidationError::AirlineMismatch {
            airline: airline.to_string(),
            id: code.to_string(),
        });
    }
    if !plane_id.starts_with(airline) {
        return Err(ValidationError::AirlineMismatch {
            airline: airline.to_string(),
            id: plane_id.to_string(),
        });
    }
    if !reference::is_city(city) {
        return Err(ValidationError::UnknownCity(city.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpsError {
    #[error("no {direction} flight {code}")]
    FlightNotFound { code: String, direction: Direction },

    #[error("user already has an {0} flight booked")]
    AlreadyBooked(Direction),

    #[error("departing flight must be after the arrival flight")]
    DepartureNotAfterArrival,

    #[error("seat {0} is already taken")]
    SeatTaken(String),

    #[error("flight is full")]
    FlightFull,

    #[error("flight manager required")]
    NotManager,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
