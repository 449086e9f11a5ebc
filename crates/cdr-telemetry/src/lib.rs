//! # cdr-telemetry
//!
//! Structured logging bootstrap for the CD Register.
//!
//! The register is embedded in a larger staff-management application, so
//! this crate only owns the `tracing` subscriber setup; exporting to an
//! aggregation backend is the host's concern. Every subsystem logs through
//! the `tracing` macros with structured fields, and this crate decides how
//! those events are formatted and filtered.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cdr_telemetry::{TelemetryConfig, init_telemetry};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(config).expect("failed to init telemetry");
//!     // Register components log via tracing from here on.
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CDR_SERVICE_NAME` | `cd-register` | Service name stamped on every event |
//! | `CDR_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CDR_JSON_LOGS` | `false` | Emit JSON-formatted events |

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::{fmt, EnvFilter};

/// Telemetry initialization errors.
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter directive: {0}")]
    Filter(String),

    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

/// Guard that keeps the subscriber installed. Hold it for the lifetime of
/// the application.
pub struct TelemetryGuard {
    _private: (),
}

/// Install the global `tracing` subscriber per the supplied configuration.
///
/// Returns an error instead of panicking when a subscriber is already
/// installed, so tests that initialize logging more than once stay quiet.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Filter(e.to_string()))?;

    let installed = if config.json_logs {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(false)
            .try_init()
    } else {
        fmt().with_env_filter(filter).try_init()
    };

    match installed {
        Ok(()) => {
            tracing::info!(
                service = %config.service_name,
                level = %config.log_level,
                json = config.json_logs,
                "telemetry initialized"
            );
            Ok(TelemetryGuard { _private: () })
        }
        Err(_) => Err(TelemetryError::AlreadyInitialized),
    }
}
