use chrono::{Duration, Utc};

use crate::contract::model::Ticket;
use crate::domain::error::DomainError;

const DEMO_TICKETS: [(&str, &str, bool, i64); 3] = [
    (
        "Printer on floor 3 is jammed",
        "Paper jam in tray 2, the display shows error E-204 after every restart.",
        false,
        26,
    ),
    (
        "Reset VPN password",
        "Password expired while travelling; the self-service portal rejects the new one.",
        true,
        50,
    ),
    (
        "Install design software",
        "New hire in marketing needs the vector editor and font pack on their laptop.",
        false,
        3,
    ),
];

/// Demo tickets for a fresh server, created within the last few days.
pub fn demo_tickets() -> Result<Vec<Ticket>, DomainError> {
    let now = Utc::now();
    DEMO_TICKETS
        .iter()
        .map(|&(name, description, status, hours_ago)| -> Result<Ticket, DomainError> {
            let created_at = now - Duration::hours(hours_ago);
            let mut ticket = Ticket::create_at(name, description, created_at)?;
            ticket.status = status;
            Ok(ticket)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn demo_tickets_are_valid() {
        let tickets = demo_tickets().unwrap();
        assert_eq!(tickets.len(), 3);
        assert_eq!(tickets.iter().filter(|t| t.status).count(), 1);

        let ids: HashSet<_> = tickets.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), 3);

        let now = Utc::now();
        assert!(tickets.iter().all(|t| t.created_at < now));
    }
}
