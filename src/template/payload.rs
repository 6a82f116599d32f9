//! Typed interpolation payloads, one per notification kind.
//!
//! The serialized fields of each struct are exactly the variables its
//! template references, so a payload that compiles renders cleanly.

use serde::Serialize;

use super::table::render;
use super::types::{NotificationKind, RenderedTemplate, TemplateError, TemplateResult};

#[derive(Debug, Clone, Serialize)]
pub struct NewSessionPayload {
    pub event_name: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionStateChangePayload {
    pub session_name: String,
    pub acceptance: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventImportedPayload {
    pub event_name: String,
    pub event_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventImportFailPayload {
    pub error_text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventExportedPayload {
    pub event_name: String,
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventExportFailPayload {
    pub event_name: String,
    pub error_text: String,
}

/// Shared by the first notice and the follow-up
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyPaymentPayload {
    pub event_name: String,
    /// Billing period, e.g. "March 2024"
    pub date: String,
    /// Formatted amount including currency
    pub amount: String,
    pub app_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventRolePayload {
    pub role_name: String,
    pub event_name: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AfterEventPayload {
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketPurchasedPayload {
    pub invoice_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketPurchasedAttendeePayload {
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketPurchasedOrganizerPayload {
    pub invoice_id: String,
    pub event_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketCancelledPayload {
    pub cancel_note: String,
    pub event_name: String,
    pub event_url: String,
    pub order_url: String,
    pub invoice_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TicketCancelledOrganizerPayload {
    pub cancel_note: String,
    pub invoice_id: String,
    pub event_name: String,
    pub cancel_order_page: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserChangeEmailPayload {
    pub email: String,
    pub new_email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordChangePayload {
    pub app_name: String,
}

/// A notification kind together with its interpolation values
#[derive(Debug, Clone)]
pub enum NotificationPayload {
    EventRole(EventRolePayload),
    NewSession(NewSessionPayload),
    SessionStateChange(SessionStateChangePayload),
    EventExported(EventExportedPayload),
    EventExportFail(EventExportFailPayload),
    EventImported(EventImportedPayload),
    EventImportFail(EventImportFailPayload),
    MonthlyPayment(MonthlyPaymentPayload),
    MonthlyPaymentFollowup(MonthlyPaymentPayload),
    AfterEvent(AfterEventPayload),
    TicketPurchased(TicketPurchasedPayload),
    TicketPurchasedAttendee(TicketPurchasedAttendeePayload),
    TicketPurchasedOrganizer(TicketPurchasedOrganizerPayload),
    TicketCancelled(TicketCancelledPayload),
    TicketCancelledOrganizer(TicketCancelledOrganizerPayload),
    UserChangeEmail(UserChangeEmailPayload),
    PasswordChange(PasswordChangePayload),
}

impl NotificationPayload {
    pub fn kind(&self) -> NotificationKind {
        match self {
            NotificationPayload::EventRole(_) => NotificationKind::EventRole,
            NotificationPayload::NewSession(_) => NotificationKind::NewSession,
            NotificationPayload::SessionStateChange(_) => NotificationKind::SessionStateChange,
            NotificationPayload::EventExported(_) => NotificationKind::EventExported,
            NotificationPayload::EventExportFail(_) => NotificationKind::EventExportFail,
            NotificationPayload::EventImported(_) => NotificationKind::EventImported,
            NotificationPayload::EventImportFail(_) => NotificationKind::EventImportFail,
            NotificationPayload::MonthlyPayment(_) => NotificationKind::MonthlyPayment,
            NotificationPayload::MonthlyPaymentFollowup(_) => {
                NotificationKind::MonthlyPaymentFollowup
            }
            NotificationPayload::AfterEvent(_) => NotificationKind::AfterEvent,
            NotificationPayload::TicketPurchased(_) => NotificationKind::TicketPurchased,
            NotificationPayload::TicketPurchasedAttendee(_) => {
                NotificationKind::TicketPurchasedAttendee
            }
            NotificationPayload::TicketPurchasedOrganizer(_) => {
                NotificationKind::TicketPurchasedOrganizer
            }
            NotificationPayload::TicketCancelled(_) => NotificationKind::TicketCancelled,
            NotificationPayload::TicketCancelledOrganizer(_) => {
                NotificationKind::TicketCancelledOrganizer
            }
            NotificationPayload::UserChangeEmail(_) => NotificationKind::UserChangeEmail,
            NotificationPayload::PasswordChange(_) => NotificationKind::PasswordChange,
        }
    }

    /// Interpolation variables as a JSON object
    pub fn variables(&self) -> TemplateResult<serde_json::Value> {
        let value = match self {
            NotificationPayload::EventRole(p) => serde_json::to_value(p),
            NotificationPayload::NewSession(p) => serde_json::to_value(p),
            NotificationPayload::SessionStateChange(p) => serde_json::to_value(p),
            NotificationPayload::EventExported(p) => serde_json::to_value(p),
            NotificationPayload::EventExportFail(p) => serde_json::to_value(p),
            NotificationPayload::EventImported(p) => serde_json::to_value(p),
            NotificationPayload::EventImportFail(p) => serde_json::to_value(p),
            NotificationPayload::MonthlyPayment(p)
            | NotificationPayload::MonthlyPaymentFollowup(p) => serde_json::to_value(p),
            NotificationPayload::AfterEvent(p) => serde_json::to_value(p),
            NotificationPayload::TicketPurchased(p) => serde_json::to_value(p),
            NotificationPayload::TicketPurchasedAttendee(p) => serde_json::to_value(p),
            NotificationPayload::TicketPurchasedOrganizer(p) => serde_json::to_value(p),
            NotificationPayload::TicketCancelled(p) => serde_json::to_value(p),
            NotificationPayload::TicketCancelledOrganizer(p) => serde_json::to_value(p),
            NotificationPayload::UserChangeEmail(p) => serde_json::to_value(p),
            NotificationPayload::PasswordChange(p) => serde_json::to_value(p),
        };

        value.map_err(|e| TemplateError::InvalidVariables(e.to_string()))
    }

    /// Render this payload's template
    pub fn render(&self) -> TemplateResult<RenderedTemplate> {
        render(self.kind(), &self.variables()?)
    }
}
