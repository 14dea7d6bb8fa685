//! Console prompting and rendering. Everything user-facing prints here;
//! library crates only ever return values.

use std::io::{self, Write};

use brisport_catalog::reference;
use brisport_shared::{Direction, Flight, Ticket};
use chrono::NaiveDateTime;

pub fn banner() {
    line("==========================================");
    line("=  Welcome to Brisbane Domestic Airport  =");
    line("==========================================");
    line("");
}

pub fn line(text: &str) {
    println!("{text}");
}

pub fn error(msg: &str) {
    line("#####");
    line(&format!("# Error - {msg}"));
    line("# Please try again.");
    line("#####");
}

pub fn error_brief(msg: &str) {
    line("#####");
    line(&format!("# Error - {msg}"));
    line("#####");
}

pub fn password_rules() {
    line("Your password must:");
    line("-be at least 8 characters long");
    line("-contain a number");
    line("-contain a lowercase letter");
    line("-contain an uppercase letter");
}

pub fn read_line() -> io::Result<String> {
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

pub fn read_non_empty() -> io::Result<String> {
    loop {
        let s = read_line()?;
        if !s.is_empty() {
            return Ok(s);
        }
    }
}

/// Menu choice; out-of-range input silently re-prompts.
pub fn ask_choice(prompt: &str, lo: u32, hi: u32) -> io::Result<u32> {
    loop {
        line(prompt);
        let s = read_line()?;
        if let Ok(v) = s.trim().parse::<u32>() {
            if (lo..=hi).contains(&v) {
                return Ok(v);
            }
        }
    }
}

pub fn ask_int(prompt: &str, min: u32, max: u32) -> io::Result<u32> {
    loop {
        line(prompt);
        let s = read_line()?;
        match s.trim().parse::<u32>() {
            Ok(v) if (min..=max).contains(&v) => return Ok(v),
            _ => error("Supplied number is invalid."),
        }
    }
}

pub fn ask_datetime(prompt: &str) -> io::Result<NaiveDateTime> {
    loop {
        line(prompt);
        let s = read_line()?;
        match NaiveDateTime::parse_from_str(s.trim(), reference::CONSOLE_TIME_FORMAT) {
            Ok(dt) => return Ok(dt),
            Err(_) => error("Supplied time is invalid."),
        }
    }
}

pub fn render_ticket(ticket: &Ticket) -> String {
    let (time_label, city_label) = match ticket.direction {
        Direction::Arrival => ("Arrival Time", "Departure City"),
        Direction::Departure => ("Departure Time", "Arrival City"),
    };
    format!(
        "========== Ticket Information ==========\n\
         Ticket ID: {}\n\
         Flight Code: {}\n\
         Direction: {}\n\
         {}: {}\n\
         {}: {}\n\
         Seat: {}\n\
         Points: {}\n\
         =====================================",
        ticket.id,
        ticket.flight_code,
        ticket.direction,
        city_label,
        ticket.other_city,
        time_label,
        ticket.booked_time.format(reference::DATE_TIME_FORMAT),
        ticket.seat,
        ticket.points_earned,
    )
}

/// Compact board row for the flight-information listing.
pub fn render_flight_row(flight: &Flight) -> String {
    format!(
        "{:<9} {:<8} {:<10} plane={:<6} other_city={:<12} time={} status={} delay={}m",
        flight.direction.to_string(),
        flight.code,
        flight.airline,
        flight.plane_id,
        flight.other_city,
        flight.effective_time().format(reference::DATE_TIME_FORMAT),
        flight.status,
        flight.delay_minutes,
    )
}

/// Sentence form used on the manager's all-flights screen.
pub fn flight_sentence(flight: &Flight) -> String {
    let airline = match reference::airline_name(&flight.airline) {
        Some(name) => name,
        None => flight.airline.as_str(),
    };
    let time = flight.effective_time().format(reference::CONSOLE_TIME_FORMAT);
    match flight.direction {
        Direction::Arrival => format!(
            "Flight {} operated by {} arriving at {} from {} on plane {}.",
            flight.code, airline, time, flight.other_city, flight.plane_id
        ),
        Direction::Departure => format!(
            "Flight {} operated by {} departing at {} to {} on plane {}.",
            flight.code, airline, time, flight.other_city, flight.plane_id
        ),
    }
}
