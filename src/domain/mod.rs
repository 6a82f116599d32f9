//! Domain entities handed in by callers.
//!
//! This crate only reads them; loading and persisting users, events and
//! orders is the host application's job.

use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
}

impl User {
    pub fn new(id: i64, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

/// An event with its organizing team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    /// Public identifier used in frontend URLs
    pub identifier: String,
    pub name: String,
    pub owner: User,
    #[serde(default)]
    pub organizers: Vec<User>,
}

/// One ticket on an order. `user` is `None` when the holder has no account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketHolder {
    pub id: i64,
    pub user: Option<User>,
    pub pdf_url: String,
}

/// A ticket order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    /// Public identifier used in frontend URLs
    pub identifier: String,
    pub invoice_number: String,
    /// The purchaser
    pub user: User,
    pub event: Event,
    #[serde(default)]
    pub ticket_holders: Vec<TicketHolder>,
    #[serde(default)]
    pub cancel_note: Option<String>,
    /// Order page on the public site
    pub site_view_link: String,
    /// PDF with every ticket on the order
    pub tickets_pdf_url: String,
}

impl Order {
    /// Whether `user` placed this order
    pub fn is_purchaser(&self, user: &User) -> bool {
        self.user.id == user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_deserializes_with_defaults() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": 7,
            "identifier": "a1b2",
            "invoice_number": "O1700000000-7",
            "user": {"id": 1, "email": "buyer@example.com"},
            "event": {
                "id": 3,
                "identifier": "e3",
                "name": "DevCon",
                "owner": {"id": 2, "email": "owner@example.com"}
            },
            "site_view_link": "https://example.com/orders/a1b2/view",
            "tickets_pdf_url": "https://example.com/tickets/a1b2.pdf"
        }))
        .unwrap();

        assert!(order.ticket_holders.is_empty());
        assert!(order.event.organizers.is_empty());
        assert_eq!(order.cancel_note, None);
        assert!(order.is_purchaser(&User::new(1, "someone@example.com")));
        assert!(!order.is_purchaser(&order.event.owner));
    }
}
