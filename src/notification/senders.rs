//! One sender per domain event.
//!
//! Each method resolves its template from a typed payload, builds the
//! follow-up actions and hands off to `send_notification`.

use crate::domain::{Order, User};
use crate::error::Result;
use crate::template::{
    render, validate_variables, AfterEventPayload, EventExportFailPayload, EventExportedPayload,
    EventImportFailPayload, EventImportedPayload, EventRolePayload, MonthlyPaymentPayload,
    NewSessionPayload, NotificationKind, NotificationPayload, SessionStateChangePayload,
    TicketCancelledOrganizerPayload, TicketCancelledPayload, TicketPurchasedAttendeePayload,
    TicketPurchasedOrganizerPayload, TicketPurchasedPayload,
};

use super::actions::{
    get_event_exported_actions, get_event_imported_actions, get_event_role_notification_actions,
    get_monthly_payment_notification_actions, get_new_session_notification_actions,
    get_session_state_change_notification_actions,
    get_ticket_purchased_attendee_notification_actions, get_ticket_purchased_notification_actions,
    get_ticket_purchased_organizer_notification_actions,
};
use super::dispatcher::NotificationDispatcher;
use super::types::Notification;

/// Result of an event import job
#[derive(Debug, Clone)]
pub enum ImportOutcome {
    Imported {
        event_id: i64,
        event_name: String,
        event_url: String,
    },
    Failed {
        error_text: String,
    },
}

/// Result of an event export job
#[derive(Debug, Clone)]
pub enum ExportOutcome {
    Exported { download_url: String },
    Failed { error_text: String },
}

/// Monthly service fee owed for an event
#[derive(Debug, Clone)]
pub struct MonthlyFeePayment {
    pub event_id: i64,
    pub event_name: String,
    /// Billing period, e.g. "March 2024"
    pub previous_month: String,
    /// Formatted amount including currency
    pub amount: String,
    /// Invoice payment page
    pub link: String,
}

impl NotificationDispatcher {
    /// Tell an organizer that their event received a session proposal.
    pub async fn notify_new_session_organizer(
        &self,
        user: &User,
        event_name: &str,
        link: &str,
        session_id: i64,
    ) -> Result<Notification> {
        let actions = get_new_session_notification_actions(session_id, link);
        let payload = NotificationPayload::NewSession(NewSessionPayload {
            event_name: event_name.to_string(),
            link: link.to_string(),
        });

        self.send_payload(user, payload, Some(actions)).await
    }

    /// Tell a speaker that their session was accepted, rejected, etc.
    pub async fn notify_session_state_change(
        &self,
        user: &User,
        session_name: &str,
        acceptance: &str,
        link: &str,
        session_id: i64,
    ) -> Result<Notification> {
        let actions = get_session_state_change_notification_actions(session_id, link);
        let payload = NotificationPayload::SessionStateChange(SessionStateChangePayload {
            session_name: session_name.to_string(),
            acceptance: acceptance.to_string(),
        });

        self.send_payload(user, payload, Some(actions)).await
    }

    pub async fn notify_after_import(
        &self,
        user: &User,
        outcome: ImportOutcome,
    ) -> Result<Notification> {
        match outcome {
            ImportOutcome::Failed { error_text } => {
                let payload =
                    NotificationPayload::EventImportFail(EventImportFailPayload { error_text });
                self.send_payload(user, payload, None).await
            }
            ImportOutcome::Imported {
                event_id,
                event_name,
                event_url,
            } => {
                let actions = get_event_imported_actions(event_id, &event_url);
                let payload = NotificationPayload::EventImported(EventImportedPayload {
                    event_name,
                    event_url,
                });
                self.send_payload(user, payload, Some(actions)).await
            }
        }
    }

    pub async fn notify_after_export(
        &self,
        user: &User,
        event_name: &str,
        outcome: ExportOutcome,
    ) -> Result<Notification> {
        match outcome {
            ExportOutcome::Failed { error_text } => {
                let payload = NotificationPayload::EventExportFail(EventExportFailPayload {
                    event_name: event_name.to_string(),
                    error_text,
                });
                self.send_payload(user, payload, None).await
            }
            ExportOutcome::Exported { download_url } => {
                let actions = get_event_exported_actions(&download_url);
                let payload = NotificationPayload::EventExported(EventExportedPayload {
                    event_name: event_name.to_string(),
                    download_url,
                });
                self.send_payload(user, payload, Some(actions)).await
            }
        }
    }

    /// Monthly service fee notice. `follow_up` selects the past-due variant.
    pub async fn notify_monthly_fee_payment(
        &self,
        user: &User,
        payment: &MonthlyFeePayment,
        follow_up: bool,
    ) -> Result<Notification> {
        let actions = get_monthly_payment_notification_actions(payment.event_id, &payment.link);
        let fields = MonthlyPaymentPayload {
            event_name: payment.event_name.clone(),
            date: payment.previous_month.clone(),
            amount: payment.amount.clone(),
            app_name: self.app_name().to_string(),
        };
        let payload = if follow_up {
            NotificationPayload::MonthlyPaymentFollowup(fields)
        } else {
            NotificationPayload::MonthlyPayment(fields)
        };

        self.send_payload(user, payload, Some(actions)).await
    }

    /// Invite a user to take a role at an event.
    pub async fn notify_event_role(
        &self,
        user: &User,
        role_name: &str,
        event_name: &str,
        link: &str,
        event_id: i64,
    ) -> Result<Notification> {
        let actions = get_event_role_notification_actions(event_id, link);
        let payload = NotificationPayload::EventRole(EventRolePayload {
            role_name: role_name.to_string(),
            event_name: event_name.to_string(),
            link: link.to_string(),
        });

        self.send_payload(user, payload, Some(actions)).await
    }

    /// Thank-you after an event has ended.
    pub async fn notify_after_event(&self, user: &User, event_name: &str) -> Result<Notification> {
        let payload = NotificationPayload::AfterEvent(AfterEventPayload {
            event_name: event_name.to_string(),
        });

        self.send_payload(user, payload, None).await
    }

    /// Tell an organizer about a new order, linking to its invoice.
    pub async fn notify_ticket_purchase_organizer(
        &self,
        user: &User,
        order: &Order,
    ) -> Result<Notification> {
        let actions =
            get_ticket_purchased_organizer_notification_actions(&order.identifier, &order.site_view_link);
        let payload = NotificationPayload::TicketPurchasedOrganizer(TicketPurchasedOrganizerPayload {
            invoice_id: order.invoice_number.clone(),
            event_name: order.event.name.clone(),
        });

        self.send_payload(user, payload, Some(actions)).await
    }

    /// Notify every registered ticket holder on an order.
    ///
    /// The purchaser gets the whole-order notice, other holders get their own
    /// ticket. Holders without an account are skipped.
    pub async fn notify_attendees(&self, order: &Order) -> Result<Vec<Notification>> {
        let mut sent = Vec::new();

        for holder in &order.ticket_holders {
            let Some(user) = &holder.user else {
                tracing::debug!(
                    holder_id = holder.id,
                    order = %order.identifier,
                    "Skipping ticket holder without an account"
                );
                continue;
            };

            let notification = if order.is_purchaser(user) {
                let actions =
                    get_ticket_purchased_notification_actions(order.id, &order.tickets_pdf_url);
                let payload = NotificationPayload::TicketPurchased(TicketPurchasedPayload {
                    invoice_id: order.invoice_number.clone(),
                });
                self.send_payload(user, payload, Some(actions)).await?
            } else {
                let actions = get_ticket_purchased_attendee_notification_actions(&holder.pdf_url);
                let payload =
                    NotificationPayload::TicketPurchasedAttendee(TicketPurchasedAttendeePayload {
                        event_name: order.event.name.clone(),
                    });
                self.send_payload(user, payload, Some(actions)).await?
            };

            sent.push(notification);
        }

        Ok(sent)
    }

    /// Announce a cancelled order to the purchaser, every organizer, and the
    /// event owner, in that order.
    ///
    /// The owner is notified separately even when also listed as an organizer.
    pub async fn notify_ticket_cancel(&self, order: &Order) -> Result<Vec<Notification>> {
        let event = &order.event;
        let cancel_note = order.cancel_note.clone().unwrap_or_default();
        let mut sent = Vec::with_capacity(event.organizers.len() + 2);

        let purchaser_payload = NotificationPayload::TicketCancelled(TicketCancelledPayload {
            cancel_note: cancel_note.clone(),
            event_name: event.name.clone(),
            event_url: self.urls().event_page(&event.identifier),
            order_url: self.urls().order_page(&order.identifier),
            invoice_id: order.invoice_number.clone(),
        });
        sent.push(self.send_payload(&order.user, purchaser_payload, None).await?);

        let organizer_payload =
            NotificationPayload::TicketCancelledOrganizer(TicketCancelledOrganizerPayload {
                cancel_note,
                invoice_id: order.invoice_number.clone(),
                event_name: event.name.clone(),
                cancel_order_page: self.urls().cancelled_orders_page(&event.identifier),
            });

        for organizer in event.organizers.iter().chain(std::iter::once(&event.owner)) {
            sent.push(
                self.send_payload(organizer, organizer_payload.clone(), None)
                    .await?,
            );
        }

        Ok(sent)
    }

    /// Send any kind from a free-form variable bag.
    ///
    /// Fails with `TemplateError::MissingVariables` before anything is
    /// written when the bag lacks a variable the template references.
    pub async fn send_with_action(
        &self,
        user: &User,
        kind: NotificationKind,
        variables: &serde_json::Value,
    ) -> Result<Notification> {
        validate_variables(kind, variables)?;
        let rendered = render(kind, variables)?;

        self.send_notification(user, kind, rendered.title, rendered.message, None)
            .await
    }
}
