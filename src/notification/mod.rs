//! Notification types, action builders, and dispatching.
//!
//! `NotificationDispatcher` is the entry point: construct it with a storage
//! backend and an activity recorder (or from `Settings`), then call the
//! `notify_*` method for the domain event at hand.

pub mod actions;
mod dispatcher;
mod senders;
mod types;
mod urls;

pub use dispatcher::{DispatcherStats, DispatcherStatsSnapshot, NotificationDispatcher};
pub use senders::{ExportOutcome, ImportOutcome, MonthlyFeePayment};
pub use types::{ActionSubject, ActionType, Notification, NotificationAction};
pub use urls::FrontendUrls;
