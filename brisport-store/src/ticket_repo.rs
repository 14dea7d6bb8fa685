use std::collections::HashMap;

use brisport_shared::Ticket;
use uuid::Uuid;

/// Tickets keyed by id. Tickets are append-only; nothing updates or
/// removes them once issued.
#[derive(Debug, Default)]
pub struct TicketRepo {
    tickets: HashMap<Uuid, Ticket>,
}

impl TicketRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, ticket: Ticket) {
        tracing::debug!(id = %ticket.id, seat = %ticket.seat, "ticket issued");
        self.tickets.insert(ticket.id, ticket);
    }

    /// Email match is case-insensitive.
    pub fn for_user(&self, email: &str) -> Vec<&Ticket> {
        self.tickets
            .values()
            .filter(|t| t.user_email.eq_ignore_ascii_case(email))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brisport_shared::Direction;
    use chrono::NaiveDate;

    #[test]
    fn test_for_user_ignores_email_case() {
        let mut repo = TicketRepo::new();
        let when = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        repo.add(Ticket::new("Ada@Example.com", "JST101", Direction::Arrival, "1A", "Sydney", when, 0));

        assert_eq!(repo.for_user("ada@example.com").len(), 1);
        assert_eq!(repo.for_user("ADA@EXAMPLE.COM").len(), 1);
        assert!(repo.for_user("someone@else.com").is_empty());
    }
}
