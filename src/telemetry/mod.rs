//! Tracing subscriber setup.
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `RUST_LOG` | Filter directives, overrides `logging.level` | unset |
//! | `NOTIFY_LOGGING__FORMAT` | `pretty` or `json` | `pretty` |
//! | `NOTIFY_LOGGING__LEVEL` | Fallback filter | `info` |

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{NotifyError, Result};

/// Install the global tracing subscriber.
///
/// Returns an error instead of panicking when a subscriber is already set,
/// so hosts that configure tracing themselves can call this unconditionally.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    result.map_err(|e| NotifyError::Telemetry(e.to_string()))?;

    tracing::info!(format = %config.format, "Tracing initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_an_error_not_a_panic() {
        let config = LoggingConfig::default();
        let _ = init_tracing(&config);
        assert!(matches!(
            init_tracing(&config),
            Err(NotifyError::Telemetry(_))
        ));
    }
}
