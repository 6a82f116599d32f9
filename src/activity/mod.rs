//! Activity log for sent notifications.
//!
//! Recording is best-effort: a failed write is logged and counted but never
//! surfaces to the caller, so an audit outage cannot block notifications.

mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPool;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::notification::NotificationAction;
use crate::storage::StoreResult;

pub use memory::MemoryActivityRecorder;
pub use postgres::PostgresActivityRecorder;

/// Action name recorded for every sent notification
pub const NOTIFICATION_EVENT: &str = "notification_event";

/// One audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub id: Uuid,
    /// User the activity concerns
    pub actor_id: i64,
    pub action: String,
    pub title: String,
    pub actions: Vec<NotificationAction>,
    pub occurred_at: DateTime<Utc>,
}

impl Activity {
    pub fn new(
        action: impl Into<String>,
        actor_id: i64,
        title: impl Into<String>,
        actions: Vec<NotificationAction>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            actor_id,
            action: action.into(),
            title: title.into(),
            actions,
            occurred_at: Utc::now(),
        }
    }

    /// Human-readable summary for logs
    pub fn describe(&self) -> String {
        format!(
            "Notification event sent to user {} with title \"{}\"",
            self.actor_id, self.title
        )
    }
}

/// Audit log sink.
#[async_trait]
pub trait ActivityRecorder: Send + Sync {
    /// Record an activity. Failures are logged, never returned.
    async fn record(&self, activity: &Activity);

    /// Most recent activities, newest first.
    async fn recent(&self, limit: usize) -> StoreResult<Vec<Activity>>;
}

/// Create an activity recorder using the same backend choice as the store.
pub fn create_activity_recorder(
    settings: &StorageConfig,
    pool: Option<PgPool>,
) -> Arc<dyn ActivityRecorder> {
    match (settings.backend.as_str(), pool) {
        ("postgres", Some(pool)) => Arc::new(PostgresActivityRecorder::new(pool)),
        ("postgres", None) => {
            tracing::warn!(
                "PostgreSQL activity recorder requested but no pool provided, falling back to memory"
            );
            Arc::new(MemoryActivityRecorder::new())
        }
        _ => Arc::new(MemoryActivityRecorder::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe() {
        let activity = Activity::new(NOTIFICATION_EVENT, 5, "Event DevCon completed", vec![]);
        assert_eq!(
            activity.describe(),
            "Notification event sent to user 5 with title \"Event DevCon completed\""
        );
    }
}
