use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::metrics::{ACTIVITIES_FAILED_TOTAL, ACTIVITIES_RECORDED_TOTAL};
use crate::storage::StoreResult;

use super::{Activity, ActivityRecorder};

/// In-memory activity log, kept in insertion order.
#[derive(Default)]
pub struct MemoryActivityRecorder {
    entries: RwLock<Vec<Activity>>,
    reject_writes: AtomicBool,
}

impl MemoryActivityRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop subsequent records, as an unreachable audit store would.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::Relaxed);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Every recorded activity, oldest first
    pub async fn all(&self) -> Vec<Activity> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl ActivityRecorder for MemoryActivityRecorder {
    async fn record(&self, activity: &Activity) {
        if self.reject_writes.load(Ordering::Relaxed) {
            ACTIVITIES_FAILED_TOTAL.inc();
            tracing::warn!(
                activity_id = %activity.id,
                actor_id = activity.actor_id,
                "Activity log rejected write"
            );
            return;
        }

        self.entries.write().await.push(activity.clone());
        ACTIVITIES_RECORDED_TOTAL.inc();

        tracing::debug!(
            action = %activity.action,
            actor_id = activity.actor_id,
            "{}",
            activity.describe()
        );
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Activity>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}
