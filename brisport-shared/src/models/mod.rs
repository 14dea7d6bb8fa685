pub mod flight;
pub mod ticket;
pub mod user;
