//! The logging seam used by assertions, sections and handlers.
//!
//! The crate never builds its own sinks: everything goes through a
//! [`Logger`]. By default that is a [`TracingLogger`], which turns each call
//! into a `tracing` event, so whatever subscriber the application installs
//! decides where records end up.
//!
//! # Examples
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use assert_rail::{imperative, Check, Level, Logger};
//!
//! #[derive(Default)]
//! struct Collect(Mutex<Vec<(Level, String)>>);
//!
//! impl Logger for Collect {
//!     fn log(&self, level: Level, message: &str) {
//!         self.0.lock().unwrap().push((level, message.to_owned()));
//!     }
//! }
//!
//! let logger = Arc::new(Collect::default());
//! let result = imperative(false, Check::new().message("boom").logger(logger.clone()));
//!
//! assert!(result.is_err());
//! assert_eq!(logger.0.lock().unwrap()[0], (Level::ERROR, "boom".to_owned()));
//! ```
use core::fmt::Display;
use std::borrow::Cow;
use std::sync::{Arc, OnceLock};

use tracing::Level;

/// Leveled logging collaborator.
pub trait Logger: Send + Sync {
    /// Emits `message` at `level`.
    fn log(&self, level: Level, message: &str);

    /// Emits `message` for a caught error or panic at error level.
    fn exception(&self, message: &str, error: &dyn Display) {
        self.log(Level::ERROR, &format!("{message}: {error}"));
    }
}

/// Shared handle to a [`Logger`].
pub type SharedLogger = Arc<dyn Logger>;

/// [`Logger`] that forwards to `tracing` events.
///
/// The logger name travels as the `logger` field of every event.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    name: Cow<'static, str>,
}

impl TracingLogger {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(env!("CARGO_CRATE_NAME"))
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        let logger = self.name.as_ref();
        // Event levels must be constants, hence the ladder.
        if level == Level::ERROR {
            tracing::error!(logger, "{message}");
        } else if level == Level::WARN {
            tracing::warn!(logger, "{message}");
        } else if level == Level::INFO {
            tracing::info!(logger, "{message}");
        } else if level == Level::DEBUG {
            tracing::debug!(logger, "{message}");
        } else {
            tracing::trace!(logger, "{message}");
        }
    }

    fn exception(&self, message: &str, error: &dyn Display) {
        let logger = self.name.as_ref();
        tracing::error!(logger, error = %error, "{message}");
    }
}

/// Returns the process-wide default logger.
pub fn default_logger() -> SharedLogger {
    static DEFAULT: OnceLock<SharedLogger> = OnceLock::new();
    DEFAULT.get_or_init(|| Arc::new(TracingLogger::default())).clone()
}
