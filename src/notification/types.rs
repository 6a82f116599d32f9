//! Persisted notification and action types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::template::NotificationKind;

/// A persisted, user-facing notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique identifier for this notification
    pub id: Uuid,
    /// Recipient
    pub user_id: i64,
    /// Which template produced it
    pub kind: NotificationKind,
    /// Resolved title
    pub title: String,
    /// Resolved message body (may contain HTML)
    pub message: String,
    /// Follow-up links, in display order
    pub actions: Vec<NotificationAction>,
    /// Always false on creation; read state is managed elsewhere
    pub is_read: bool,
    /// When the notification was created
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: i64,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        actions: Vec<NotificationAction>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            actions,
            is_read: false,
            created_at: Utc::now(),
        }
    }
}

/// What following an action does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    View,
    Download,
    Submit,
}

/// What an action points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionSubject {
    Event,
    EventExport,
    EventInvoice,
    EventRole,
    Session,
    Order,
    TicketsPdf,
}

impl ActionSubject {
    fn noun(&self) -> &'static str {
        match self {
            ActionSubject::Event => "event",
            ActionSubject::EventExport => "export",
            ActionSubject::EventInvoice => "invoice",
            ActionSubject::EventRole => "invitation",
            ActionSubject::Session => "session",
            ActionSubject::Order => "order",
            ActionSubject::TicketsPdf => "tickets",
        }
    }
}

/// A follow-up link attached to a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub action_type: ActionType,
    pub subject: ActionSubject,
    /// Identifier of the subject entity, when there is one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<String>,
    pub link: String,
}

impl NotificationAction {
    pub fn new(action_type: ActionType, subject: ActionSubject, link: impl Into<String>) -> Self {
        Self {
            action_type,
            subject,
            subject_id: None,
            link: link.into(),
        }
    }

    pub fn with_subject_id(mut self, id: impl ToString) -> Self {
        self.subject_id = Some(id.to_string());
        self
    }

    /// Button text, e.g. "View order" or "Download tickets"
    pub fn label(&self) -> String {
        let verb = match self.action_type {
            ActionType::View => "View",
            ActionType::Download => "Download",
            ActionType::Submit => "Submit",
        };
        format!("{} {}", verb, self.subject.noun())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_unread() {
        let notification = Notification::new(
            42,
            NotificationKind::AfterEvent,
            "Event DevCon completed",
            "done",
            vec![],
        );

        assert_eq!(notification.user_id, 42);
        assert!(!notification.is_read);
        assert!(notification.actions.is_empty());
    }

    #[test]
    fn test_action_label() {
        let action = NotificationAction::new(ActionType::View, ActionSubject::Order, "https://x/o/1")
            .with_subject_id(1);
        assert_eq!(action.label(), "View order");
        assert_eq!(action.subject_id.as_deref(), Some("1"));

        let download =
            NotificationAction::new(ActionType::Download, ActionSubject::TicketsPdf, "https://x/t.pdf");
        assert_eq!(download.label(), "Download tickets");
    }

    #[test]
    fn test_action_serialization() {
        let action = NotificationAction::new(
            ActionType::Download,
            ActionSubject::EventExport,
            "https://x/export.zip",
        );
        let json = serde_json::to_value(&action).unwrap();

        assert_eq!(json["action_type"], "download");
        assert_eq!(json["subject"], "event-export");
        assert!(json.get("subject_id").is_none());
    }
}
