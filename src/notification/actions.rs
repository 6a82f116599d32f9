//! Follow-up actions attached to each notification kind.

use super::types::{ActionSubject, ActionType, NotificationAction};

pub fn get_event_exported_actions(download_url: &str) -> Vec<NotificationAction> {
    vec![NotificationAction::new(
        ActionType::Download,
        ActionSubject::EventExport,
        download_url,
    )]
}

pub fn get_event_imported_actions(event_id: i64, event_url: &str) -> Vec<NotificationAction> {
    vec![NotificationAction::new(ActionType::View, ActionSubject::Event, event_url)
        .with_subject_id(event_id)]
}

pub fn get_monthly_payment_notification_actions(
    event_id: i64,
    payment_url: &str,
) -> Vec<NotificationAction> {
    vec![
        NotificationAction::new(ActionType::View, ActionSubject::EventInvoice, payment_url)
            .with_subject_id(event_id),
    ]
}

/// Actions for the purchaser, pointing at the whole order
pub fn get_ticket_purchased_notification_actions(
    order_id: i64,
    order_url: &str,
) -> Vec<NotificationAction> {
    vec![NotificationAction::new(ActionType::View, ActionSubject::Order, order_url)
        .with_subject_id(order_id)]
}

/// Actions for a ticket holder who did not place the order
pub fn get_ticket_purchased_attendee_notification_actions(pdf_url: &str) -> Vec<NotificationAction> {
    vec![NotificationAction::new(
        ActionType::Download,
        ActionSubject::TicketsPdf,
        pdf_url,
    )]
}

pub fn get_ticket_purchased_organizer_notification_actions(
    order_identifier: &str,
    order_url: &str,
) -> Vec<NotificationAction> {
    vec![NotificationAction::new(ActionType::View, ActionSubject::Order, order_url)
        .with_subject_id(order_identifier)]
}

pub fn get_event_role_notification_actions(
    event_id: i64,
    invitation_link: &str,
) -> Vec<NotificationAction> {
    vec![
        NotificationAction::new(ActionType::View, ActionSubject::EventRole, invitation_link)
            .with_subject_id(event_id),
    ]
}

pub fn get_new_session_notification_actions(session_id: i64, link: &str) -> Vec<NotificationAction> {
    vec![NotificationAction::new(ActionType::View, ActionSubject::Session, link)
        .with_subject_id(session_id)]
}

pub fn get_session_state_change_notification_actions(
    session_id: i64,
    link: &str,
) -> Vec<NotificationAction> {
    vec![NotificationAction::new(ActionType::View, ActionSubject::Session, link)
        .with_subject_id(session_id)]
}
