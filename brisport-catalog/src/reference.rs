//! Static reference data for the domestic network: carriers, served cities
//! with their loyalty-point values, and the seat grid every plane flies with.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Airline {
    pub code: &'static str,
    pub name: &'static str,
}

pub const AIRLINES: [Airline; 5] = [
    Airline { code: "JST", name: "Jetstar" },
    Airline { code: "QFA", name: "Qantas" },
    Airline { code: "RXA", name: "Regional Express" },
    Airline { code: "VOZ", name: "Virgin" },
    Airline { code: "FRE", name: "Fly Pelican" },
];

/// Points a frequent flyer earns for a booking to or from the city.
pub const CITY_POINTS: [(&str, u32); 5] = [
    ("Sydney", 1200),
    ("Melbourne", 1750),
    ("Rockhampton", 1400),
    ("Adelaide", 1950),
    ("Perth", 3375),
];

pub const SEAT_ROWS: u8 = 10;
pub const SEAT_COLUMNS: &str = "ABCD";

/// Canonical timestamp rendering for tickets and the flight board.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";
/// Entry format the console prompts for.
pub const CONSOLE_TIME_FORMAT: &str = "%H:%M %d/%m/%Y";

pub fn is_airline_code(code: &str) -> bool {
    AIRLINES.iter().any(|a| a.code == code)
}

pub fn airline_name(code: &str) -> Option<&'static str> {
    AIRLINES.iter().find(|a| a.code == code).map(|a| a.name)
}

pub fn city_points(city: &str) -> Option<u32> {
    CITY_POINTS.iter().find(|(c, _)| *c == city).map(|(_, pts)| *pts)
}

pub fn is_city(city: &str) -> bool {
    city_points(city).is_some()
}
