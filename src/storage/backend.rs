//! Backend trait for notification storage.
//!
//! This module defines the abstraction layer for notification persistence,
//! allowing different storage implementations (memory, PostgreSQL) to be
//! used interchangeably.

use async_trait::async_trait;
use thiserror::Error;

use crate::notification::Notification;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// PostgreSQL operation failed
    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// A stored row could not be mapped back to a notification
    #[error("Invalid stored row: {0}")]
    InvalidRow(String),

    /// Backend refused the write
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend trait for notification storage.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) as they are shared
/// behind an `Arc` by every dispatcher clone.
///
/// # Error Handling
///
/// Write failures are returned to the caller unchanged. Nothing is retried
/// and nothing already written is rolled back.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Short backend identifier used in logs
    fn backend_name(&self) -> &'static str;

    /// Persist a new notification.
    async fn save(&self, notification: &Notification) -> StoreResult<()>;

    /// All notifications for a user, newest first.
    async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<Notification>>;

    /// Total stored notifications.
    async fn count(&self) -> StoreResult<u64>;
}
