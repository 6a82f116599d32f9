//! Notification template system.
//!
//! This module provides:
//! - A static table of title/message templates with `{{variable}}` placeholders
//! - Typed payloads carrying the variables each notification kind needs
//! - A substitution engine that refuses to leave placeholders unresolved
//!
//! # Example
//!
//! ```ignore
//! let rendered = NotificationPayload::AfterEvent(AfterEventPayload {
//!     event_name: "DevCon".to_string(),
//! })
//! .render()?;
//!
//! assert_eq!(rendered.title, "Event DevCon completed");
//! ```

mod payload;
mod substitution;
mod table;
mod types;

pub use payload::{
    AfterEventPayload, EventExportFailPayload, EventExportedPayload, EventImportFailPayload,
    EventImportedPayload, EventRolePayload, MonthlyPaymentPayload, NewSessionPayload,
    NotificationPayload, PasswordChangePayload, SessionStateChangePayload,
    TicketCancelledOrganizerPayload, TicketCancelledPayload, TicketPurchasedAttendeePayload,
    TicketPurchasedOrganizerPayload, TicketPurchasedPayload, UserChangeEmailPayload,
};
pub use substitution::{placeholders, substitute_string, Substituted};
pub use table::{lookup, render, required_variables, validate_variables};
pub use types::{NotificationKind, RenderedTemplate, TemplateEntry, TemplateError, TemplateResult};
