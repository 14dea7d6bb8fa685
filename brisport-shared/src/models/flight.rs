use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    Arrival,
    Departure,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Arrival => write!(f, "ARRIVAL"),
            Direction::Departure => write!(f, "DEPARTURE"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlightStatus {
    Scheduled,
    Delayed,
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlightStatus::Scheduled => write!(f, "SCHEDULED"),
            FlightStatus::Delayed => write!(f, "DELAYED"),
        }
    }
}

/// A flight record keyed by (code, direction). `other_city` is the origin
/// for arrivals and the destination for departures. Bookings map seat code
/// to the holder's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub airline: String,
    pub code: String,
    pub other_city: String,
    pub plane_id: String,
    pub scheduled: NaiveDateTime,
    pub direction: Direction,
    pub status: FlightStatus,
    pub delay_minutes: u32,
    pub bookings: HashMap<String, String>,
}

impl Flight {
    pub fn new(
        airline: &str,
        code: &str,
        other_city: &str,
        plane_id: &str,
        scheduled: NaiveDateTime,
        direction: Direction,
    ) -> Self {
        Self {
            airline: airline.to_string(),
            code: code.to_string(),
            other_city: other_city.to_string(),
            plane_id: plane_id.to_string(),
            scheduled,
            direction,
            status: FlightStatus::Scheduled,
            delay_minutes: 0,
            bookings: HashMap::new(),
        }
    }

    /// Scheduled time plus accumulated delay.
    pub fn effective_time(&self) -> NaiveDateTime {
        self.scheduled + Duration::minutes(i64::from(self.delay_minutes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_effective_time_tracks_delay() {
        let mut flight = Flight::new("JST", "JST101", "Sydney", "JST1A", at(9, 0), Direction::Arrival);
        assert_eq!(flight.effective_time(), at(9, 0));

        flight.delay_minutes += 45;
        assert_eq!(flight.effective_time(), at(9, 45));
    }
}
