//! End-to-end tests for the notification senders
//!
//! These drive the public API against the in-memory backends, so they need
//! neither PostgreSQL nor any configuration files.

use std::sync::Arc;

use serde_json::json;

use event_notifications::activity::{ActivityRecorder, MemoryActivityRecorder, NOTIFICATION_EVENT};
use event_notifications::domain::{Event, Order, TicketHolder, User};
use event_notifications::notification::{
    ExportOutcome, FrontendUrls, ImportOutcome, MonthlyFeePayment, Notification,
    NotificationDispatcher,
};
use event_notifications::storage::{MemoryNotificationStore, NotificationStore};
use event_notifications::template::{self, NotificationKind};

struct TestEnvironment {
    dispatcher: NotificationDispatcher,
    store: Arc<MemoryNotificationStore>,
    activity: Arc<MemoryActivityRecorder>,
}

fn create_test_environment() -> TestEnvironment {
    let store = Arc::new(MemoryNotificationStore::new());
    let activity = Arc::new(MemoryActivityRecorder::new());
    let dispatcher = NotificationDispatcher::new(
        store.clone(),
        activity.clone(),
        FrontendUrls::new("https://eventyay.com/"),
        "Eventyay",
    );

    TestEnvironment {
        dispatcher,
        store,
        activity,
    }
}

fn user(id: i64) -> User {
    User::new(id, format!("user{}@example.com", id))
}

fn order_with(organizers: i64, holders: Vec<TicketHolder>) -> Order {
    Order {
        id: 40,
        identifier: "ord-40".to_string(),
        invoice_number: "O1712345678-40".to_string(),
        user: user(1),
        event: Event {
            id: 8,
            identifier: "ev8".to_string(),
            name: "RustConf".to_string(),
            owner: user(900),
            organizers: (0..organizers).map(|i| user(500 + i)).collect(),
        },
        ticket_holders: holders,
        cancel_note: Some("Duplicate booking".to_string()),
        site_view_link: "https://eventyay.com/orders/ord-40/view".to_string(),
        tickets_pdf_url: "https://cdn.eventyay.com/ord-40.pdf".to_string(),
    }
}

fn assert_resolved(notification: &Notification) {
    assert!(
        template::placeholders(&notification.title).is_empty(),
        "unresolved title: {}",
        notification.title
    );
    assert!(
        template::placeholders(&notification.message).is_empty(),
        "unresolved message: {}",
        notification.message
    );
}

// =============================================================================
// Every sender resolves its template
// =============================================================================

#[tokio::test]
async fn test_every_sender_produces_resolved_text() {
    let env = create_test_environment();
    let d = &env.dispatcher;
    let u = user(7);
    let payment = MonthlyFeePayment {
        event_id: 8,
        event_name: "RustConf".to_string(),
        previous_month: "May 2024".to_string(),
        amount: "EUR 30.00".to_string(),
        link: "https://eventyay.com/event-invoice/ev8".to_string(),
    };
    let order = order_with(
        2,
        vec![
            TicketHolder {
                id: 1,
                user: Some(user(1)),
                pdf_url: "https://cdn.eventyay.com/t1.pdf".to_string(),
            },
            TicketHolder {
                id: 2,
                user: Some(user(2)),
                pdf_url: "https://cdn.eventyay.com/t2.pdf".to_string(),
            },
        ],
    );

    let mut sent = vec![
        d.notify_new_session_organizer(&u, "RustConf", "https://eventyay.com/s/1", 1)
            .await
            .unwrap(),
        d.notify_session_state_change(&u, "Async Rust", "rejected", "https://eventyay.com/s/1", 1)
            .await
            .unwrap(),
        d.notify_after_import(
            &u,
            ImportOutcome::Imported {
                event_id: 8,
                event_name: "RustConf".to_string(),
                event_url: "https://eventyay.com/e/ev8".to_string(),
            },
        )
        .await
        .unwrap(),
        d.notify_after_import(
            &u,
            ImportOutcome::Failed {
                error_text: "bad json".to_string(),
            },
        )
        .await
        .unwrap(),
        d.notify_after_export(
            &u,
            "RustConf",
            ExportOutcome::Exported {
                download_url: "https://cdn.eventyay.com/e.zip".to_string(),
            },
        )
        .await
        .unwrap(),
        d.notify_after_export(
            &u,
            "RustConf",
            ExportOutcome::Failed {
                error_text: "timeout".to_string(),
            },
        )
        .await
        .unwrap(),
        d.notify_monthly_fee_payment(&u, &payment, false).await.unwrap(),
        d.notify_monthly_fee_payment(&u, &payment, true).await.unwrap(),
        d.notify_event_role(&u, "track_organizer", "RustConf", "https://eventyay.com/i/1", 8)
            .await
            .unwrap(),
        d.notify_after_event(&u, "RustConf").await.unwrap(),
        d.notify_ticket_purchase_organizer(&u, &order).await.unwrap(),
    ];
    sent.extend(d.notify_attendees(&order).await.unwrap());
    sent.extend(d.notify_ticket_cancel(&order).await.unwrap());

    for notification in &sent {
        assert_resolved(notification);
    }
    assert_eq!(env.store.count().await.unwrap(), sent.len() as u64);
}

// =============================================================================
// Activity log mirrors persisted notifications
// =============================================================================

#[tokio::test]
async fn test_activity_recorded_for_each_notification() {
    let env = create_test_environment();

    env.dispatcher.notify_after_event(&user(1), "RustConf").await.unwrap();
    env.dispatcher.notify_after_event(&user(2), "RustConf").await.unwrap();

    let recent = env.activity.recent(10).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert!(recent.iter().all(|a| a.action == NOTIFICATION_EVENT));
    assert_eq!(recent[0].actor_id, 2);
    assert_eq!(recent[1].title, "Event RustConf completed");
}

#[tokio::test]
async fn test_repeated_calls_are_not_deduplicated() {
    let env = create_test_environment();

    let first = env.dispatcher.notify_after_event(&user(1), "RustConf").await.unwrap();
    let second = env.dispatcher.notify_after_event(&user(1), "RustConf").await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(env.store.list_for_user(1).await.unwrap().len(), 2);
    assert_eq!(env.dispatcher.stats().total_sent, 2);
}

// =============================================================================
// Ticket fan-out counts
// =============================================================================

#[tokio::test]
async fn test_attendee_counts() {
    let env = create_test_environment();
    // N = 6 holders, M = 4 registered, P = 2 of them are the purchaser
    let holders = vec![
        TicketHolder { id: 1, user: Some(user(1)), pdf_url: "p1".to_string() },
        TicketHolder { id: 2, user: Some(user(1)), pdf_url: "p2".to_string() },
        TicketHolder { id: 3, user: Some(user(3)), pdf_url: "p3".to_string() },
        TicketHolder { id: 4, user: None, pdf_url: "p4".to_string() },
        TicketHolder { id: 5, user: Some(user(5)), pdf_url: "p5".to_string() },
        TicketHolder { id: 6, user: None, pdf_url: "p6".to_string() },
    ];
    let order = order_with(0, holders);

    let sent = env.dispatcher.notify_attendees(&order).await.unwrap();

    let purchaser = sent
        .iter()
        .filter(|n| n.kind == NotificationKind::TicketPurchased)
        .count();
    let attendee = sent
        .iter()
        .filter(|n| n.kind == NotificationKind::TicketPurchasedAttendee)
        .count();

    assert_eq!(sent.len(), 4);
    assert_eq!(purchaser, 2);
    assert_eq!(attendee, 2);
}

#[tokio::test]
async fn test_cancellation_counts() {
    for organizers in 0..4 {
        let env = create_test_environment();
        let order = order_with(organizers, vec![]);

        let sent = env.dispatcher.notify_ticket_cancel(&order).await.unwrap();

        assert_eq!(sent.len() as i64, organizers + 2);
        assert_eq!(sent.first().map(|n| n.user_id), Some(1));
        assert_eq!(sent.last().map(|n| n.user_id), Some(900));
        for notification in &sent {
            assert!(notification.message.contains("Duplicate booking"));
            assert!(notification.message.contains("O1712345678-40"));
        }
    }
}

// =============================================================================
// Generic notifier
// =============================================================================

#[tokio::test]
async fn test_generic_notifier_validates_bag() {
    let env = create_test_environment();

    let err = env
        .dispatcher
        .send_with_action(&user(1), NotificationKind::AfterEvent, &json!({"name": "x"}))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "MISSING_VARIABLES");

    let err = env
        .dispatcher
        .send_with_action(&user(1), NotificationKind::AfterEvent, &json!("RustConf"))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "INVALID_VARIABLES");

    let ok = env
        .dispatcher
        .send_with_action(
            &user(1),
            NotificationKind::PasswordChange,
            &json!({"app_name": "Eventyay"}),
        )
        .await
        .unwrap();
    assert!(ok.message.contains("Eventyay"));
    assert_eq!(env.store.count().await.unwrap(), 1);
}
