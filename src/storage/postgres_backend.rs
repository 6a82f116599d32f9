//! PostgreSQL notification storage.
//!
//! Expects the `notifications` table from `migrations/0001_notifications.sql`.
//! Actions are stored as a JSONB array alongside the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::notification::{Notification, NotificationAction};
use crate::template::NotificationKind;

use super::backend::{NotificationStore, StoreError, StoreResult};

/// PostgreSQL-backed notification store.
pub struct PostgresNotificationStore {
    pool: PgPool,
}

#[derive(FromRow)]
struct NotificationRow {
    id: Uuid,
    user_id: i64,
    kind: String,
    title: String,
    message: String,
    actions: Json<Vec<NotificationAction>>,
    is_read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationRow> for Notification {
    type Error = StoreError;

    fn try_from(row: NotificationRow) -> Result<Self, Self::Error> {
        let kind = NotificationKind::from_key(&row.kind).ok_or_else(|| {
            StoreError::InvalidRow(format!("unknown notification kind in storage: {}", row.kind))
        })?;

        Ok(Notification {
            id: row.id,
            user_id: row.user_id,
            kind,
            title: row.title,
            message: row.message,
            actions: row.actions.0,
            is_read: row.is_read,
            created_at: row.created_at,
        })
    }
}

impl PostgresNotificationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PostgresNotificationStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn save(&self, notification: &Notification) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, kind, title, message, actions, is_read, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(notification.id)
        .bind(notification.user_id)
        .bind(notification.kind.as_str())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(Json(&notification.actions))
        .bind(notification.is_read)
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;

        tracing::trace!(
            notification_id = %notification.id,
            user_id = notification.user_id,
            "Notification stored in PostgreSQL"
        );

        Ok(())
    }

    async fn list_for_user(&self, user_id: i64) -> StoreResult<Vec<Notification>> {
        let rows = sqlx::query_as::<_, NotificationRow>(
            r#"
            SELECT id, user_id, kind, title, message, actions, is_read, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Notification::try_from).collect()
    }

    async fn count(&self) -> StoreResult<u64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notifications")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{ActionSubject, ActionType};

    #[test]
    fn test_row_conversion() {
        let row = NotificationRow {
            id: Uuid::new_v4(),
            user_id: 9,
            kind: "ticket_purchased".to_string(),
            title: "Your order invoice and tickets (O-1)".to_string(),
            message: "Your order has been processed successfully.".to_string(),
            actions: Json(vec![NotificationAction::new(
                ActionType::View,
                ActionSubject::Order,
                "https://x/o/1",
            )]),
            is_read: false,
            created_at: Utc::now(),
        };

        let notification = Notification::try_from(row).unwrap();
        assert_eq!(notification.kind, NotificationKind::TicketPurchased);
        assert_eq!(notification.actions.len(), 1);
    }

    #[test]
    fn test_row_with_unknown_kind_is_rejected() {
        let row = NotificationRow {
            id: Uuid::new_v4(),
            user_id: 9,
            kind: "legacy_kind".to_string(),
            title: String::new(),
            message: String::new(),
            actions: Json(vec![]),
            is_read: false,
            created_at: Utc::now(),
        };

        assert!(matches!(
            Notification::try_from(row),
            Err(StoreError::InvalidRow(_))
        ));
    }
}
