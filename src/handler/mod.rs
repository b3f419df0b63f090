//! A reusable scope that logs, ignores or hands off failures.
//!
//! [`ExceptionHandler::run`] executes a closure and, when it fails, walks a
//! fixed sequence:
//!
//! 1. log the failure as `"Exception caught"` if a logger is set;
//! 2. suppress it if it matches the `ignore` set (the callback is skipped);
//! 3. propagate panics untouched unless `handle_base_exception` is set;
//! 4. ask the callback, which returns an [`Outcome`].
//!
//! Returned errors play the role of ordinary exceptions, panics the role of
//! the "base" failures that normally should not be handled.
//!
//! # Examples
//!
//! ```
//! use assert_rail::{ignore_exception, BoxError, ErrorSet};
//! use std::num::ParseIntError;
//!
//! let mut handler = ignore_exception(ErrorSet::of::<ParseIntError>()).build();
//!
//! let parsed = handler.run(|| "12".parse::<u8>()).unwrap();
//! assert_eq!(parsed, Some(12));
//!
//! let ignored = handler.run(|| "x".parse::<u8>()).unwrap();
//! assert_eq!(ignored, None);
//! ```
use std::panic::{self, AssertUnwindSafe};

use crate::traits::SharedLogger;
use crate::types::{BoxError, Caught, ErrorSet};

/// Decision of a handler callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Let the failure continue to the caller.
    Propagate,
    /// Swallow the failure; [`ExceptionHandler::run`] returns `Ok(None)`.
    Suppress,
}

impl Outcome {
    /// [`Suppress`](Self::Suppress) if `suppress`, [`Propagate`](Self::Propagate) otherwise.
    #[inline]
    pub fn suppress_if(suppress: bool) -> Self {
        if suppress {
            Self::Suppress
        } else {
            Self::Propagate
        }
    }

    #[inline]
    pub fn is_suppress(self) -> bool {
        self == Self::Suppress
    }
}

type HandlerFn<'a> = Box<dyn FnMut(&Caught<'_>) -> Outcome + 'a>;

/// See the [module documentation](self).
pub struct ExceptionHandler<'a> {
    handler: Option<HandlerFn<'a>>,
    ignore: ErrorSet,
    logger: Option<SharedLogger>,
    handle_base_exception: bool,
}

impl<'a> ExceptionHandler<'a> {
    pub fn builder() -> ExceptionHandlerBuilder<'a> {
        ExceptionHandlerBuilder::default()
    }

    /// Runs `f` inside the handler.
    ///
    /// Returns `Ok(Some(value))` on success and `Ok(None)` when a failure was
    /// suppressed. Propagated errors come back as `Err` (the same allocation),
    /// propagated panics resume unwinding.
    pub fn run<T, E, F>(&mut self, f: F) -> Result<Option<T>, BoxError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        match panic::catch_unwind(AssertUnwindSafe(f)) {
            Ok(Ok(value)) => Ok(Some(value)),
            Ok(Err(error)) => {
                let error = error.into();
                match self.on_failure(&Caught::Error(&*error)) {
                    Outcome::Suppress => Ok(None),
                    Outcome::Propagate => Err(error),
                }
            },
            Err(payload) => match self.on_failure(&Caught::Panic(&*payload)) {
                Outcome::Suppress => Ok(None),
                Outcome::Propagate => panic::resume_unwind(payload),
            },
        }
    }

    fn on_failure(&mut self, caught: &Caught<'_>) -> Outcome {
        if let Some(logger) = &self.logger {
            logger.exception("Exception caught", caught);
        }

        if self.ignore.matches(caught) {
            return Outcome::Suppress;
        }

        if !self.handle_base_exception && caught.is_panic() {
            return Outcome::Propagate;
        }

        match self.handler.as_mut() {
            Some(handler) => handler(caught),
            None => Outcome::Propagate,
        }
    }
}

impl core::fmt::Debug for ExceptionHandler<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExceptionHandler")
            .field("has_handler", &self.handler.is_some())
            .field("ignore", &self.ignore)
            .field("has_logger", &self.logger.is_some())
            .field("handle_base_exception", &self.handle_base_exception)
            .finish()
    }
}

/// Builder for [`ExceptionHandler`].
#[derive(Default)]
pub struct ExceptionHandlerBuilder<'a> {
    handler: Option<HandlerFn<'a>>,
    ignore: ErrorSet,
    logger: Option<SharedLogger>,
    handle_base_exception: bool,
}

impl<'a> ExceptionHandlerBuilder<'a> {
    /// Callback deciding whether a failure is suppressed.
    #[must_use]
    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: FnMut(&Caught<'_>) -> Outcome + 'a,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Failures that are always suppressed without consulting the callback.
    #[must_use]
    pub fn ignore(mut self, ignore: impl Into<ErrorSet>) -> Self {
        self.ignore = ignore.into();
        self
    }

    /// Logger receiving every caught failure.
    #[must_use]
    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Whether panics reach the callback at all.
    #[must_use]
    pub fn handle_base_exception(mut self, handle: bool) -> Self {
        self.handle_base_exception = handle;
        self
    }

    /// Finishes the handler.
    ///
    /// # Panics
    ///
    /// Panics when no callback, no ignore entry and no logger are configured:
    /// such a handler would have no effect at all.
    pub fn build(self) -> ExceptionHandler<'a> {
        assert!(
            self.handler.is_some() || !self.ignore.is_empty() || self.logger.is_some(),
            "exception handler without callback, ignore list or logger does nothing"
        );

        ExceptionHandler {
            handler: self.handler,
            ignore: self.ignore,
            logger: self.logger,
            handle_base_exception: self.handle_base_exception,
        }
    }
}

/// A handler that suppresses `ignore`; add a callback or logger as needed.
pub fn ignore_exception<'a>(ignore: impl Into<ErrorSet>) -> ExceptionHandlerBuilder<'a> {
    ExceptionHandler::builder().ignore(ignore)
}

/// A handler that logs every failure and, by default, suppresses nothing.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use assert_rail::{log_exception, BoxError, TracingLogger};
///
/// let mut handler = log_exception(Arc::new(TracingLogger::new("jobs"))).build();
/// let result = handler.run(|| Err::<(), BoxError>("queue full".into()));
/// assert_eq!(result.unwrap_err().to_string(), "queue full");
/// ```
pub fn log_exception<'a>(logger: SharedLogger) -> ExceptionHandlerBuilder<'a> {
    ExceptionHandler::builder().logger(logger)
}
