//! Telemetry setup

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogSettings;
use crate::error::AppError;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_telemetry(settings: &LogSettings) -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| AppError::TelemetryError(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match settings.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .try_init(),
        _ => registry
            .with(fmt::layer().with_target(true).with_level(true))
            .try_init(),
    };

    result.map_err(|e| AppError::TelemetryError(e.to_string()))
}
