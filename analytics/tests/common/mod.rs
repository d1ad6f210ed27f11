// Shared fixtures for the integration suite.

use chrono::{DateTime, Duration, Utc};
use fake::faker::name::en::Name;
use fake::Fake;
use pulseboard_shared::{Ticket, TicketPriority, TicketStatus};
use uuid::Uuid;

pub struct TicketBuilder {
    ticket: Ticket,
}

impl TicketBuilder {
    pub fn created_at(created_at: DateTime<Utc>) -> Self {
        Self {
            ticket: Ticket {
                id: Uuid::new_v4(),
                created_at: Some(created_at),
                updated_at: None,
                resolved_at: None,
                due_by: None,
                status: TicketStatus::Open,
                priority: TicketPriority::Medium,
                category: Some("Support".to_string()),
                ticket_type: None,
                assignee: Some(Name().fake()),
                company: Some("Acme Corp".to_string()),
            },
        }
    }

    pub fn status(mut self, status: TicketStatus) -> Self {
        self.ticket.status = status;
        self
    }

    pub fn assignee(mut self, assignee: &str) -> Self {
        self.ticket.assignee = Some(assignee.to_string());
        self
    }

    pub fn due_by(mut self, due_by: DateTime<Utc>) -> Self {
        self.ticket.due_by = Some(due_by);
        self
    }

    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.ticket.updated_at = Some(updated_at);
        self
    }

    pub fn resolved_after(mut self, elapsed: Duration) -> Self {
        let created = self.ticket.created_at.expect("fixture has created_at");
        self.ticket.status = TicketStatus::Resolved;
        self.ticket.resolved_at = Some(created + elapsed);
        self.ticket.updated_at = Some(created + elapsed);
        self
    }

    pub fn build(self) -> Ticket {
        self.ticket
    }
}
