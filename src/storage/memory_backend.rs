//! In-memory notification storage using DashMap.
//!
//! Stored notifications are lost on restart. Used by default and in tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::notification::Notification;

use super::backend::{NotificationStore, StoreError, StoreResult};

/// In-memory notification store.
pub struct MemoryNotificationStore {
    /// notification_id -> Notification
    notifications: DashMap<Uuid, Notification>,
    /// When set, every write fails with `StoreError::Unavailable`
    reject_writes: AtomicBool,
    /// Writes still accepted before every further write fails
    writes_remaining: AtomicUsize,
}

impl Default for MemoryNotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self {
            notifications: DashMap::new(),
            reject_writes: AtomicBool::new(false),
            writes_remaining: AtomicUsize::new(usize::MAX),
        }
    }

    /// Make subsequent writes fail, to exercise error paths.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::Relaxed);
    }

    /// Accept `count` more writes, then fail every write after that.
    pub fn reject_after(&self, count: usize) {
        self.writes_remaining.store(count, Ordering::Relaxed);
    }

    /// Snapshot of every stored notification, oldest first.
    pub fn all(&self) -> Vec<Notification> {
        let mut all: Vec<Notification> = self
            .notifications
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by_key(|n| n.created_at);
        all
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn save(&self, notification: &Notification) -> StoreResult<()> {
        if self.reject_writes.load(Ordering::Relaxed) {
            return Err(StoreError::Unavailable(
                "memory store is rejecting writes".to_string(),
            ));
        }

        let admitted = self
            .writes_remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |left| left.checked_sub(1))
            .is_ok();
        if !admitted {
            return Err(StoreError::Unavailable(
                "memory store write limit reached".to_string(),
            ));
        }

        self.notifications
            .insert(notification.id, notification.clone());

        tracing::trace!(
            notification_id = %notification.id,
            user_id = notification.user_id,
            "Notification stored in memory"
        );

        Ok(())
    }

    async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<Notification>> {
        let mut notifications: Vec<Notification> = self
            .notifications
            .iter()
            .filter(|entry| entry.value().user_id == user_id)
            .map(|entry| entry.value().clone())
            .collect();
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn count(&self) -> StoreResult<u64> {
        Ok(self.notifications.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::NotificationKind;

    fn notification(user_id: i64, title: &str) -> Notification {
        Notification::new(user_id, NotificationKind::AfterEvent, title, "message", vec![])
    }

    #[tokio::test]
    async fn test_save_and_list() {
        let store = MemoryNotificationStore::new();

        store.save(&notification(1, "first")).await.unwrap();
        store.save(&notification(2, "other")).await.unwrap();
        store.save(&notification(1, "second")).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 3);

        let for_user = store.list_for_user(1).await.unwrap();
        assert_eq!(for_user.len(), 2);
        assert!(for_user.iter().all(|n| n.user_id == 1));
        assert!(for_user[0].created_at >= for_user[1].created_at);
    }

    #[tokio::test]
    async fn test_rejecting_writes() {
        let store = MemoryNotificationStore::new();
        store.set_reject_writes(true);

        let result = store.save(&notification(1, "lost")).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.count().await.unwrap(), 0);

        store.set_reject_writes(false);
        store.save(&notification(1, "kept")).await.unwrap();
        assert_eq!(store.all().len(), 1);
    }

    #[tokio::test]
    async fn test_reject_after_limit() {
        let store = MemoryNotificationStore::new();
        store.reject_after(2);

        store.save(&notification(1, "one")).await.unwrap();
        store.save(&notification(1, "two")).await.unwrap();
        let result = store.save(&notification(1, "three")).await;

        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
