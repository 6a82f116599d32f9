//! Template types and error definitions

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Template-specific error type
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(NotificationKind),

    #[error("Missing variables for {kind}: {}", .missing.join(", "))]
    MissingVariables {
        kind: NotificationKind,
        missing: Vec<String>,
    },

    #[error("Unresolved placeholders in {kind}: {}", .placeholders.join(", "))]
    UnresolvedPlaceholders {
        kind: NotificationKind,
        placeholders: Vec<String>,
    },

    #[error("Invalid variables: {0}")]
    InvalidVariables(String),
}

/// Result type for template operations
pub type TemplateResult<T> = Result<T, TemplateError>;

/// Every kind of notification the application can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    EventRole,
    NewSession,
    SessionStateChange,
    EventExported,
    EventExportFail,
    EventImported,
    EventImportFail,
    MonthlyPayment,
    MonthlyPaymentFollowup,
    AfterEvent,
    TicketPurchased,
    TicketPurchasedAttendee,
    TicketPurchasedOrganizer,
    TicketCancelled,
    TicketCancelledOrganizer,
    UserChangeEmail,
    PasswordChange,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 17] = [
        NotificationKind::EventRole,
        NotificationKind::NewSession,
        NotificationKind::SessionStateChange,
        NotificationKind::EventExported,
        NotificationKind::EventExportFail,
        NotificationKind::EventImported,
        NotificationKind::EventImportFail,
        NotificationKind::MonthlyPayment,
        NotificationKind::MonthlyPaymentFollowup,
        NotificationKind::AfterEvent,
        NotificationKind::TicketPurchased,
        NotificationKind::TicketPurchasedAttendee,
        NotificationKind::TicketPurchasedOrganizer,
        NotificationKind::TicketCancelled,
        NotificationKind::TicketCancelledOrganizer,
        NotificationKind::UserChangeEmail,
        NotificationKind::PasswordChange,
    ];

    /// Stable key used for storage and metric labels
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::EventRole => "event_role",
            NotificationKind::NewSession => "new_session",
            NotificationKind::SessionStateChange => "session_state_change",
            NotificationKind::EventExported => "event_exported",
            NotificationKind::EventExportFail => "event_export_fail",
            NotificationKind::EventImported => "event_imported",
            NotificationKind::EventImportFail => "event_import_fail",
            NotificationKind::MonthlyPayment => "monthly_payment",
            NotificationKind::MonthlyPaymentFollowup => "monthly_payment_followup",
            NotificationKind::AfterEvent => "after_event",
            NotificationKind::TicketPurchased => "ticket_purchased",
            NotificationKind::TicketPurchasedAttendee => "ticket_purchased_attendee",
            NotificationKind::TicketPurchasedOrganizer => "ticket_purchased_organizer",
            NotificationKind::TicketCancelled => "ticket_cancelled",
            NotificationKind::TicketCancelledOrganizer => "ticket_cancelled_organizer",
            NotificationKind::UserChangeEmail => "user_change_email",
            NotificationKind::PasswordChange => "password_change",
        }
    }

    /// Parse a stored key back into a kind
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == key)
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static notification template
#[derive(Debug, Clone, Serialize)]
pub struct TemplateEntry {
    /// Kind this template belongs to
    pub kind: NotificationKind,

    /// Intended audience, informational only
    pub recipient: &'static str,

    /// Title (or subject) with {{variable}} placeholders
    pub title: &'static str,

    /// Message body with {{variable}} placeholders
    pub message: &'static str,
}

/// A template with every placeholder resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTemplate {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}
