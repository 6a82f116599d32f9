//! Static notification template table

use std::collections::{BTreeSet, HashMap};

use lazy_static::lazy_static;

use crate::metrics::TEMPLATE_RENDER_FAILURES_TOTAL;

use super::substitution::{placeholders, substitute_string};
use super::types::{NotificationKind, RenderedTemplate, TemplateEntry, TemplateError, TemplateResult};

static ENTRIES: &[TemplateEntry] = &[
    TemplateEntry {
        kind: NotificationKind::EventExported,
        recipient: "User",
        title: "Event {{event_name}} has been exported",
        message: "Event <strong>{{event_name}}</strong> has been exported successfully.\
                  <br><br><a href='{{download_url}}' class='btn btn-info btn-sm'>Download</a>",
    },
    TemplateEntry {
        kind: NotificationKind::EventExportFail,
        recipient: "User",
        title: "Export of event {{event_name}} failed",
        message: "The following error occurred:<br><pre>{{error_text}}</pre>",
    },
    TemplateEntry {
        kind: NotificationKind::EventImported,
        recipient: "User",
        title: "Event {{event_name}} has been imported",
        message: "Event <strong>{{event_name}}</strong> has been imported successfully.\
                  <br><br><a href='{{event_url}}' class='btn btn-info btn-sm'>View Event</a>",
    },
    TemplateEntry {
        kind: NotificationKind::EventImportFail,
        recipient: "User",
        title: "Import of event failed",
        message: "The following error occurred:<br><pre>{{error_text}}</pre>",
    },
    TemplateEntry {
        kind: NotificationKind::MonthlyPayment,
        recipient: "Owner, Organizer",
        title: "{{date}} - Monthly service fee invoice for {{event_name}}",
        message: "The total service fee for the ticket sales of {{event_name}} in the month of \
                  {{date}} is {{amount}}.<br/> That payment for the same has to be made in two \
                  weeks.<br><br><em>Thank you for using {{app_name}}.</em>",
    },
    TemplateEntry {
        kind: NotificationKind::MonthlyPaymentFollowup,
        recipient: "Owner, Organizer",
        title: "Past Due: {{date}} - Monthly service fee invoice for {{event_name}}",
        message: "The total service fee for the ticket sales of {{event_name}} in the month of \
                  {{date}} is {{amount}}.<br/> That payment for the same is past the due date.\
                  <br><br><em>Thank you for using {{app_name}}.</em>",
    },
    TemplateEntry {
        kind: NotificationKind::TicketPurchased,
        recipient: "User",
        title: "Your order invoice and tickets ({{invoice_id}})",
        message: "Your order has been processed successfully.",
    },
    TemplateEntry {
        kind: NotificationKind::TicketPurchasedAttendee,
        recipient: "User",
        title: "Your ticket for {{event_name}}",
        message: "Your order has been processed successfully.",
    },
    TemplateEntry {
        kind: NotificationKind::TicketPurchasedOrganizer,
        recipient: "Owner, Organizer",
        title: "New ticket purchase for {{event_name}} : ({{invoice_id}})",
        message: "The order has been processed successfully.",
    },
    TemplateEntry {
        kind: NotificationKind::TicketCancelled,
        recipient: "User",
        title: "Your order for {{event_name}} has been cancelled ({{invoice_id}})",
        message: "Your order <a href='{{order_url}}'>{{invoice_id}}</a> for \
                  <a href='{{event_url}}'>{{event_name}}</a> has been cancelled by the organizer.\
                  <br/>Please contact the organizer for more info.\
                  <br/>Message from the organizer: {{cancel_note}}.",
    },
    TemplateEntry {
        kind: NotificationKind::TicketCancelledOrganizer,
        recipient: "Owner, Organizer",
        title: "Order ({{invoice_id}}) has been cancelled",
        message: "Order ({{invoice_id}}) for {{event_name}} has been cancelled.\
                  <br/>Cancel Note: {{cancel_note}}.\
                  <br/><a href='{{cancel_order_page}}'>View cancelled orders</a>",
    },
    TemplateEntry {
        kind: NotificationKind::UserChangeEmail,
        recipient: "User",
        title: "Your email has been changed",
        message: "Your email has been changed from {{email}} to {{new_email}}.\
                  <br>Please verify your new email.",
    },
    TemplateEntry {
        kind: NotificationKind::PasswordChange,
        recipient: "User",
        title: "Your password has been changed",
        message: "Your password for {{app_name}} has been changed. If you did not make this \
                  change, please contact support immediately.",
    },
    TemplateEntry {
        kind: NotificationKind::AfterEvent,
        recipient: "User",
        title: "Event {{event_name}} completed",
        message: "The event <strong>{{event_name}}</strong> has been completed.<br><br>",
    },
    TemplateEntry {
        kind: NotificationKind::EventRole,
        recipient: "User",
        title: "Invitation to be {{role_name}} at {{event_name}}",
        message: "You've been invited to be one of the <strong>{{role_name}}s</strong> at \
                  <strong>{{event_name}}</strong>.<br><a href='{{link}}'>Respond to the invitation</a>",
    },
    TemplateEntry {
        kind: NotificationKind::NewSession,
        recipient: "Owner, Organizer",
        title: "New session proposal for {{event_name}}",
        message: "The event <strong>{{event_name}}</strong> has received a new session proposal.\
                  <br><a href='{{link}}'>Review the proposal</a>",
    },
    TemplateEntry {
        kind: NotificationKind::SessionStateChange,
        recipient: "Speaker",
        title: "Session {{session_name}} has been {{acceptance}}",
        message: "The session <strong>{{session_name}}</strong> has been \
                  <strong>{{acceptance}}</strong> by the organizer.",
    },
];

lazy_static! {
    static ref NOTIFS: HashMap<NotificationKind, &'static TemplateEntry> =
        ENTRIES.iter().map(|entry| (entry.kind, entry)).collect();
}

/// Look up the template for a notification kind
pub fn lookup(kind: NotificationKind) -> TemplateResult<&'static TemplateEntry> {
    NOTIFS.get(&kind).copied().ok_or(TemplateError::NotFound(kind))
}

/// Every variable the title and message of `kind` reference
pub fn required_variables(kind: NotificationKind) -> TemplateResult<BTreeSet<String>> {
    let entry = lookup(kind)?;
    let mut names = placeholders(entry.title);
    names.extend(placeholders(entry.message));
    Ok(names)
}

/// Check that a variable bag covers everything `kind` needs.
///
/// A variable set to `null` counts as missing.
pub fn validate_variables(kind: NotificationKind, variables: &serde_json::Value) -> TemplateResult<()> {
    let vars = as_object(variables)?;
    let missing: Vec<String> = required_variables(kind)?
        .into_iter()
        .filter(|name| vars.get(name).map_or(true, serde_json::Value::is_null))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        TEMPLATE_RENDER_FAILURES_TOTAL
            .with_label_values(&[kind.as_str()])
            .inc();
        Err(TemplateError::MissingVariables { kind, missing })
    }
}

/// Render the title and message of `kind`, failing if any placeholder is left
pub fn render(kind: NotificationKind, variables: &serde_json::Value) -> TemplateResult<RenderedTemplate> {
    let entry = lookup(kind)?;
    let vars = as_object(variables)?;

    let title = substitute_string(entry.title, vars);
    let message = substitute_string(entry.message, vars);

    let mut unresolved: Vec<String> = title.unresolved;
    for name in message.unresolved {
        if !unresolved.contains(&name) {
            unresolved.push(name);
        }
    }

    if !unresolved.is_empty() {
        TEMPLATE_RENDER_FAILURES_TOTAL
            .with_label_values(&[kind.as_str()])
            .inc();
        return Err(TemplateError::UnresolvedPlaceholders {
            kind,
            placeholders: unresolved,
        });
    }

    tracing::debug!(kind = %kind, "Template rendered");

    Ok(RenderedTemplate {
        kind,
        title: title.text,
        message: message.text,
    })
}

fn as_object(
    variables: &serde_json::Value,
) -> TemplateResult<&serde_json::Map<String, serde_json::Value>> {
    variables
        .as_object()
        .ok_or_else(|| TemplateError::InvalidVariables("Variables must be an object".to_string()))
}
