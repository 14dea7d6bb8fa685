use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::flight::Direction;

/// Issued once per successful booking and never mutated. `booked_time` and
/// `other_city` are captured from the flight at the moment of booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: Uuid,
    pub user_email: String,
    pub flight_code: String,
    pub direction: Direction,
    pub seat: String,
    pub other_city: String,
    pub booked_time: NaiveDateTime,
    pub points_earned: u32,
}

impl Ticket {
    pub fn new(
        user_email: &str,
        flight_code: &str,
        direction: Direction,
        seat: &str,
        other_city: &str,
        booked_time: NaiveDateTime,
        points_earned: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_email: user_email.to_string(),
            flight_code: flight_code.to_string(),
            direction,
            seat: seat.to_string(),
            other_city: other_city.to_string(),
            booked_time,
            points_earned,
        }
    }
}
