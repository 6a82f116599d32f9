//! Notification persistence.
//!
//! - `MemoryNotificationStore`: in-memory storage using DashMap (default)
//! - `PostgresNotificationStore`: durable storage through a sqlx pool
//!
//! Use `create_notification_store()` to pick the backend from configuration.

mod backend;
mod memory_backend;
pub mod pool;
mod postgres_backend;

use std::sync::Arc;

use sqlx::postgres::PgPool;

use crate::config::StorageConfig;

pub use backend::{NotificationStore, StoreError, StoreResult};
pub use memory_backend::MemoryNotificationStore;
pub use pool::{create_pg_pool, mask_database_url};
pub use postgres_backend::PostgresNotificationStore;

/// Create a notification store based on configuration.
///
/// - `"postgres"`: a `PostgresNotificationStore` if a pool is provided
/// - `"memory"` (default): a `MemoryNotificationStore`
pub fn create_notification_store(
    settings: &StorageConfig,
    pool: Option<PgPool>,
) -> Arc<dyn NotificationStore> {
    match settings.backend.as_str() {
        "postgres" => {
            if let Some(pool) = pool {
                tracing::info!(backend = "postgres", "Creating PostgreSQL notification store");
                Arc::new(PostgresNotificationStore::new(pool))
            } else {
                tracing::warn!(
                    "PostgreSQL notification store requested but no pool provided, falling back to memory"
                );
                Arc::new(MemoryNotificationStore::new())
            }
        }
        _ => {
            tracing::info!(backend = "memory", "Creating memory notification store");
            Arc::new(MemoryNotificationStore::new())
        }
    }
}
