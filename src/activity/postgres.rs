use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::metrics::{ACTIVITIES_FAILED_TOTAL, ACTIVITIES_RECORDED_TOTAL};
use crate::notification::NotificationAction;
use crate::storage::StoreResult;

use super::{Activity, ActivityRecorder};

/// Activity log stored in the `activities` table.
pub struct PostgresActivityRecorder {
    pool: PgPool,
}

#[derive(FromRow)]
struct ActivityRow {
    id: Uuid,
    actor_id: i64,
    action: String,
    title: String,
    actions: Json<Vec<NotificationAction>>,
    occurred_at: DateTime<Utc>,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Activity {
            id: row.id,
            actor_id: row.actor_id,
            action: row.action,
            title: row.title,
            actions: row.actions.0,
            occurred_at: row.occurred_at,
        }
    }
}

impl PostgresActivityRecorder {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, activity: &Activity) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, actor_id, action, title, detail, actions, occurred_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(activity.id)
        .bind(activity.actor_id)
        .bind(&activity.action)
        .bind(&activity.title)
        .bind(activity.describe())
        .bind(Json(&activity.actions))
        .bind(activity.occurred_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ActivityRecorder for PostgresActivityRecorder {
    async fn record(&self, activity: &Activity) {
        match self.insert(activity).await {
            Ok(()) => {
                ACTIVITIES_RECORDED_TOTAL.inc();
                tracing::trace!(activity_id = %activity.id, "Activity stored in PostgreSQL");
            }
            Err(e) => {
                ACTIVITIES_FAILED_TOTAL.inc();
                tracing::warn!(
                    error = %e,
                    activity_id = %activity.id,
                    actor_id = activity.actor_id,
                    "Failed to record activity in PostgreSQL"
                );
            }
        }
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Activity>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, actor_id, action, title, actions, occurred_at
            FROM activities
            ORDER BY occurred_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Activity::from).collect())
    }
}
