//! Delay handling. An arrival delay cascades to every departure flown by
//! the same aircraft; a departure delay affects that departure alone.

use brisport_shared::{Direction, FlightStatus, User};

use crate::{FlightOps, OpsError};

impl FlightOps {
    /// Delay an arrival and push each departure sharing its plane id by
    /// the same amount. Already-delayed departures keep accumulating.
    pub fn delay_arrival(
        &mut self,
        manager: &User,
        flight_code: &str,
        minutes: u32,
    ) -> Result<(), OpsError> {
        self.check_manager(manager)?;
        let plane_id = {
            let flight = self
                .flights
                .get_mut(flight_code, Direction::Arrival)
                .ok_or_else(|| OpsError::FlightNotFound {
                    code: flight_code.to_string(),
                    direction: Direction::Arrival,
                })?;
            flight.status = FlightStatus::Delayed;
            flight.delay_minutes += minutes;
            flight.plane_id.clone()
        };

        let mut cascaded = 0u32;
        for departure in self.flights.by_plane_mut(&plane_id, Some(Direction::Departure)) {
            departure.delay_minutes += minutes;
            if departure.status == FlightStatus::Scheduled {
                departure.status = FlightStatus::Delayed;
            }
            cascaded += 1;
        }
        tracing::debug!(code = %flight_code, minutes, cascaded, "arrival delayed");
        Ok(())
    }

    /// Delay a single departure. No cascade: a slipping departure says
    /// nothing about the aircraft's inbound leg.
    pub fn delay_departure(
        &mut self,
        manager: &User,
        flight_code: &str,
        minutes: u32,
    ) -> Result<(), OpsError> {
        self.check_manager(manager)?;
        let flight = self
            .flights
            .get_mut(flight_code, Direction::Departure)
            .ok_or_else(|| OpsError::FlightNotFound {
                code: flight_code.to_string(),
                direction: Direction::Departure,
            })?;
        flight.status = FlightStatus::Delayed;
        flight.delay_minutes += minutes;
        tracing::debug!(code = %flight_code, minutes, "departure delayed");
        Ok(())
    }
}
