//! Field validators. Patterns compile once behind `LazyLock`; the predicates
//! return plain bools so callers decide which error to surface.

use regex::Regex;
use std::sync::LazyLock;

use crate::reference;

static NAME_RX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z '\-]*$").unwrap());
static EMAIL_RX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());
static MOBILE_RX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^0\d{9}$").unwrap());
static FLIGHT_CODE_RX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}\d{3}$").unwrap());
static PLANE_ID_RX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z]{3}\d[AD]$").unwrap());
static SEAT_RX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([1-9]|10)[A-D]$").unwrap());

pub fn valid_name(s: &str) -> bool {
    !s.is_empty() && NAME_RX.is_match(s)
}

pub fn valid_age(age: u8) -> bool {
    age <= 99
}

pub fn valid_email(s: &str) -> bool {
    EMAIL_RX.is_match(s)
}

pub fn valid_mobile(s: &str) -> bool {
    MOBILE_RX.is_match(s)
}

/// At least 8 characters with a digit, a lowercase and an uppercase letter.
pub fn valid_password(s: &str) -> bool {
    s.len() >= 8
        && s.chars().any(|c| c.is_ascii_digit())
        && s.chars().any(|c| c.is_ascii_lowercase())
        && s.chars().any(|c| c.is_ascii_uppercase())
}

pub fn valid_frequent_flyer_number(n: u32) -> bool {
    (100_000..=999_999).contains(&n)
}

pub fn valid_frequent_flyer_points(n: u32) -> bool {
    n <= 1_000_000
}

/// Three-letter carrier prefix plus a three-digit number, carrier must be known.
pub fn valid_flight_code(code: &str) -> bool {
    FLIGHT_CODE_RX.is_match(code) && reference::is_airline_code(&code[..3])
}

/// Carrier prefix, tail digit and an A/D suffix, carrier must be known.
pub fn valid_plane_id(id: &str) -> bool {
    PLANE_ID_RX.is_match(id) && reference::is_airline_code(&id[..3])
}

pub fn valid_seat(seat: &str) -> bool {
    SEAT_RX.is_match(seat)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown airline code: {0}")]
    InvalidAirline(String),

    #[error("invalid flight code: {0}")]
    InvalidFlightCode(String),

    #[error("invalid plane id: {0}")]
    InvalidPlaneId(String),

    #[error("airline code {airline} does not match {id}")]
    AirlineMismatch { airline: String, id: String },

    #[error("unknown city: {0}")]
    UnknownCity(String),

    #[error("invalid seat code: {0}")]
    InvalidSeat(String),

    #[error("invalid name")]
    InvalidName,

    #[error("age must be between 0 and 99")]
    InvalidAge,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid mobile number")]
    InvalidMobile,

    #[error("password needs 8+ characters with a digit, a lowercase and an uppercase letter")]
    WeakPassword,

    #[error("frequent flyer number must be between 100000 and 999999")]
    InvalidFrequentFlyerNumber,

    #[error("frequent flyer points must be between 0 and 1000000")]
    InvalidPointsBalance,

    #[error("invalid staff id")]
    InvalidStaffId,
}
