pub mod flight_repo;
pub mod ticket_repo;
pub mod user_repo;

pub use flight_repo::FlightRepo;
pub use ticket_repo::TicketRepo;
pub use user_repo::UserRepo;

use brisport_shared::Direction;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("plane {plane_id} is already assigned to another {direction} flight")]
    DuplicatePlane { plane_id: String, direction: Direction },

    #[error("{direction} flight {code} already exists")]
    DuplicateFlight { code: String, direction: Direction },

    #[error("email {0} is already registered")]
    DuplicateEmail(String),
}
