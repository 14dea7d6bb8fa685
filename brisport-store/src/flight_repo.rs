use std::collections::{HashMap, HashSet};

use brisport_shared::{Direction, Flight};

use crate::StoreError;

/// Keyed flight collection. Enforces the two registration invariants:
/// within a direction a plane id belongs to at most one flight record (the
/// same aircraft may hold one arrival and one departure, which is what
/// links them for delay cascades), and (code, direction) is unique.
#[derive(Debug, Default)]
pub struct FlightRepo {
    flights: HashMap<String, Flight>,
    plane_ids: HashSet<(String, Direction)>,
}

impl FlightRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(code: &str, direction: Direction) -> String {
        format!("{code}|{direction}")
    }

    pub fn add(&mut self, flight: Flight) -> Result<(), StoreError> {
        let plane_key = (flight.plane_id.to_uppercase(), flight.direction);
        if self.plane_ids.contains(&plane_key) {
            return Err(StoreError::DuplicatePlane {
                plane_id: flight.plane_id.clone(),
                direction: flight.direction,
            });
        }
        let key = Self::key(&flight.code, flight.direction);
        if self.flights.contains_key(&key) {
            return Err(StoreError::DuplicateFlight {
                code: flight.code.clone(),
                direction: flight.direction,
            });
        }
        tracing::debug!(
            code = %flight.code,
            direction = %flight.direction,
            plane = %flight.plane_id,
            "flight registered"
        );
        self.plane_ids.insert(plane_key);
        self.flights.insert(key, flight);
        Ok(())
    }

    pub fn get(&self, code: &str, direction: Direction) -> Option<&Flight> {
        self.flights.get(&Self::key(code, direction))
    }

    pub fn get_mut(&mut self, code: &str, direction: Direction) -> Option<&mut Flight> {
        self.flights.get_mut(&Self::key(code, direction))
    }

    /// Ascending by effective time. Recomputed on every call: delays shift
    /// effective times, so a cached order would go stale.
    pub fn all_sorted(&self) -> Vec<&Flight> {
        let mut all: Vec<&Flight> = self.flights.values().collect();
        all.sort_by_key(|f| f.effective_time());
        all
    }

    /// Flights sharing a plane id, optionally filtered by direction.
    pub fn by_plane(&self, plane_id: &str, direction: Option<Direction>) -> Vec<&Flight> {
        self.flights
            .values()
            .filter(|f| {
                f.plane_id.eq_ignore_ascii_case(plane_id)
                    && direction.map_or(true, |d| f.direction == d)
            })
            .collect()
    }

    pub fn by_plane_mut(
        &mut self,
        plane_id: &str,
        direction: Option<Direction>,
    ) -> impl Iterator<Item = &mut Flight> + '_ {
        let plane_id = plane_id.to_string();
        self.flights.values_mut().filter(move |f| {
            f.plane_id.eq_ignore_ascii_case(&plane_id)
                && direction.map_or(true, |d| f.direction == d)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}
