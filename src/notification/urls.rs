//! Absolute frontend links used in notification messages and actions.

use crate::config::FrontendConfig;

/// Builds absolute links into the frontend application
#[derive(Debug, Clone)]
pub struct FrontendUrls {
    base_url: String,
}

impl FrontendUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &FrontendConfig) -> Self {
        Self::new(config.url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a relative path onto the frontend base URL
    pub fn make_frontend_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn event_page(&self, event_identifier: &str) -> String {
        self.make_frontend_url(&format!("/e/{}", event_identifier))
    }

    pub fn order_page(&self, order_identifier: &str) -> String {
        self.make_frontend_url(&format!("/orders/{}/view", order_identifier))
    }

    pub fn cancelled_orders_page(&self, event_identifier: &str) -> String {
        self.make_frontend_url(&format!(
            "/events/{}/tickets/orders/cancelled",
            event_identifier
        ))
    }
}
