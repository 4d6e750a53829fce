//! Logging for the tooldock plugin manager.
//!
//! Library crates only emit `tracing` events; the binary decides where they
//! go by calling [`setup_logging`] once at startup.
//!
//! # Example
//!
//! ```rust,no_run
//! use tooldock_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), tooldock_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("reqwest=warn");
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
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
