use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;

use crate::activity::{create_activity_recorder, Activity, ActivityRecorder, NOTIFICATION_EVENT};
use crate::config::Settings;
use crate::domain::User;
use crate::error::Result;
use crate::metrics::{NOTIFICATIONS_FAILED_TOTAL, NOTIFICATIONS_SENT_TOTAL};
use crate::storage::{create_notification_store, create_pg_pool, NotificationStore, StoreError};
use crate::template::{NotificationKind, NotificationPayload};

use super::types::{Notification, NotificationAction};
use super::urls::FrontendUrls;

/// Statistics for the notification dispatcher
#[derive(Debug, Default)]
pub struct DispatcherStats {
    /// Notifications persisted
    pub total_sent: AtomicU64,
    /// Notifications the store refused
    pub total_failed: AtomicU64,
}

impl DispatcherStats {
    pub fn snapshot(&self) -> DispatcherStatsSnapshot {
        DispatcherStatsSnapshot {
            total_sent: self.total_sent.load(Ordering::Relaxed),
            total_failed: self.total_failed.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of dispatcher statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatcherStatsSnapshot {
    pub total_sent: u64,
    pub total_failed: u64,
}

/// Persists notifications and records them in the activity log.
///
/// The event-specific `notify_*` methods live in `senders.rs`; they all end
/// in [`NotificationDispatcher::send_notification`].
pub struct NotificationDispatcher {
    store: Arc<dyn NotificationStore>,
    activity: Arc<dyn ActivityRecorder>,
    urls: FrontendUrls,
    app_name: String,
    stats: DispatcherStats,
}

impl NotificationDispatcher {
    pub fn new(
        store: Arc<dyn NotificationStore>,
        activity: Arc<dyn ActivityRecorder>,
        urls: FrontendUrls,
        app_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            activity,
            urls,
            app_name: app_name.into(),
            stats: DispatcherStats::default(),
        }
    }

    /// Build a dispatcher with the backends selected in `settings`.
    ///
    /// Connects to PostgreSQL when the storage backend is "postgres" and a
    /// database section is present.
    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let pool = match (&settings.database, settings.uses_postgres()) {
            (Some(database), true) => {
                Some(create_pg_pool(database).await.map_err(StoreError::from)?)
            }
            _ => None,
        };

        let store = create_notification_store(&settings.storage, pool.clone());
        let activity = create_activity_recorder(&settings.storage, pool);

        Ok(Self::new(
            store,
            activity,
            FrontendUrls::from_config(&settings.frontend),
            settings.app.name.clone(),
        ))
    }

    pub fn store(&self) -> &Arc<dyn NotificationStore> {
        &self.store
    }

    pub fn activity(&self) -> &Arc<dyn ActivityRecorder> {
        &self.activity
    }

    pub fn urls(&self) -> &FrontendUrls {
        &self.urls
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get dispatcher statistics
    pub fn stats(&self) -> DispatcherStatsSnapshot {
        self.stats.snapshot()
    }

    /// Persist a notification for `user` and record the activity.
    ///
    /// `title` and `message` must already be resolved. A storage failure is
    /// returned as is; the activity log is best-effort and never fails the call.
    #[tracing::instrument(
        name = "dispatcher.send_notification",
        skip(self, user, kind, title, message, actions),
        fields(user_id = user.id, kind = %kind)
    )]
    pub async fn send_notification(
        &self,
        user: &User,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        actions: Option<Vec<NotificationAction>>,
    ) -> Result<Notification> {
        let notification = Notification::new(
            user.id,
            kind,
            title,
            message,
            actions.unwrap_or_default(),
        );

        if let Err(e) = self.store.save(&notification).await {
            self.stats.total_failed.fetch_add(1, Ordering::Relaxed);
            NOTIFICATIONS_FAILED_TOTAL
                .with_label_values(&[kind.as_str()])
                .inc();
            tracing::error!(
                error = %e,
                backend = self.store.backend_name(),
                "Failed to save notification"
            );
            return Err(e.into());
        }

        self.stats.total_sent.fetch_add(1, Ordering::Relaxed);
        NOTIFICATIONS_SENT_TOTAL
            .with_label_values(&[kind.as_str()])
            .inc();

        let activity = Activity::new(
            NOTIFICATION_EVENT,
            user.id,
            notification.title.clone(),
            notification.actions.clone(),
        );
        self.activity.record(&activity).await;

        tracing::info!(
            notification_id = %notification.id,
            actions = notification.actions.len(),
            "Notification saved"
        );

        Ok(notification)
    }

    /// Render `payload` and send it.
    pub(crate) async fn send_payload(
        &self,
        user: &User,
        payload: NotificationPayload,
        actions: Option<Vec<NotificationAction>>,
    ) -> Result<Notification> {
        let rendered = payload.render()?;
        self.send_notification(user, rendered.kind, rendered.title, rendered.message, actions)
            .await
    }
}
