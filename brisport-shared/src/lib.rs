pub mod models;

pub use models::flight::{Direction, Flight, FlightStatus};
pub use models::ticket::Ticket;
pub use models::user::{Role, User};
