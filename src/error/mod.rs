use thiserror::Error;

use crate::storage::StoreError;
use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

impl NotifyError {
    /// Stable code for logs and metric labels
    pub fn code(&self) -> &'static str {
        match self {
            NotifyError::Template(TemplateError::NotFound(_)) => "TEMPLATE_NOT_FOUND",
            NotifyError::Template(TemplateError::MissingVariables { .. }) => "MISSING_VARIABLES",
            NotifyError::Template(TemplateError::UnresolvedPlaceholders { .. }) => {
                "UNRESOLVED_PLACEHOLDERS"
            }
            NotifyError::Template(TemplateError::InvalidVariables(_)) => "INVALID_VARIABLES",
            NotifyError::Storage(_) => "STORAGE_ERROR",
            NotifyError::Config(_) => "CONFIG_ERROR",
            NotifyError::Telemetry(_) => "TELEMETRY_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, NotifyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::NotificationKind;

    #[test]
    fn test_from_template_error() {
        let err: NotifyError = TemplateError::MissingVariables {
            kind: NotificationKind::PasswordChange,
            missing: vec!["app_name".to_string()],
        }
        .into();

        assert_eq!(err.code(), "MISSING_VARIABLES");
        assert!(err.to_string().contains("app_name"));
    }

    #[test]
    fn test_from_store_error() {
        let err: NotifyError = StoreError::Unavailable("down".to_string()).into();
        assert_eq!(err.code(), "STORAGE_ERROR");
        assert_eq!(err.to_string(), "Storage error: Backend unavailable: down");
    }
}
