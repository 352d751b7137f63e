//! Lantern Telemetry - logging setup for the Lantern plugin market tools.
//!
//! Wraps `tracing-subscriber` behind a small serializable [`LogConfig`] so the
//! CLI can build its subscriber straight from the `[logging]` config section.
//!
//! # Example
//!
//! ```rust,no_run
//! use lantern_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), lantern_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("lantern_catalog=debug");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
