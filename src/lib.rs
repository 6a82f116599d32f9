// Shared components
pub mod config;
pub mod error;
pub mod metrics;
pub mod telemetry;

// Domain layer
pub mod domain;
pub mod template;

// Persistence
pub mod activity;
pub mod storage;

// Dispatch
pub mod notification;

pub use error::{NotifyError, Result};
pub use notification::NotificationDispatcher;
