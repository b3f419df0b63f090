//! Sections: named regions whose boundary decides what happens to errors.
//!
//! | Section              | On `Err(e)`                                              |
//! |----------------------|----------------------------------------------------------|
//! | [`precondition`]     | log, wrap in [`RecoveredException`] (`VIOLATED_PRECONDITION`) |
//! | [`recoverable`]      | log, wrap in [`RecoveredException`] (`RECOVERED`)        |
//! | [`nonfatal_section`] | same as [`recoverable`]                                  |
//! | [`postcondition`]    | return `e` unchanged                                     |
//! | [`fatal_section`]    | return `e` unchanged                                     |
//!
//! [`recoverable`] returns errors in its pass-through set unchanged.
//!
//! "Non-fatal" means nothing irreversible has happened yet inside the region,
//! so the caller may treat the failure as recovered. The converted exception
//! keeps the original error as its cause.
//!
//! Panics are not intercepted: they cross every section untouched.
//!
//! # Examples
//!
//! ```
//! use assert_rail::{
//!     imperative, precondition, Exception, RecoveredException, VIOLATED_PRECONDITION,
//! };
//!
//! fn resize(width: u32) -> assert_rail::BoxResult<u32> {
//!     precondition(|| imperative(width > 0, "width must be positive"))?;
//!     Ok(width * 2)
//! }
//!
//! let err = resize(0).unwrap_err();
//! let recovered = err.downcast_ref::<RecoveredException>().unwrap();
//! assert!(recovered.reason().isa(&VIOLATED_PRECONDITION));
//! ```
use std::borrow::Cow;

use crate::traits::{default_logger, SharedLogger};
use crate::types::{
    BoxError, BoxResult, ErrorSet, Reason, RecoveredException, RECOVERED, VIOLATED_PRECONDITION,
};

/// Converts errors leaving a region into [`RecoveredException`]s.
struct ExceptionConverter {
    reason: Reason,
    message: Cow<'static, str>,
    pass_through: ErrorSet,
    logger: Option<SharedLogger>,
}

impl ExceptionConverter {
    fn run<T, E, F>(self, f: F) -> BoxResult<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        f().map_err(|error| self.convert(error.into()))
    }

    fn convert(self, error: BoxError) -> BoxError {
        if self.pass_through.matches_error(&*error) {
            return error;
        }

        let mut recovered = RecoveredException::new(self.message.clone()).with_reason(self.reason);
        if let Some(logger) = self.logger {
            logger.exception(&self.message, &error);
            recovered = recovered.with_logger(logger);
        }
        Box::new(recovered.with_cause(error))
    }
}

/// Configurable [`recoverable`] section.
///
/// # Examples
///
/// ```
/// use assert_rail::{BoxError, ErrorSet, Recoverable, RecoveredException};
/// use std::io;
///
/// let passed = Recoverable::new()
///     .pass_through(ErrorSet::of::<io::Error>())
///     .run(|| Err::<(), _>(io::Error::other("disk gone")))
///     .unwrap_err();
/// assert!(passed.is::<io::Error>());
///
/// let converted = Recoverable::new()
///     .pass_through(ErrorSet::of::<io::Error>())
///     .run(|| Err::<(), BoxError>("bad input".into()))
///     .unwrap_err();
/// assert!(converted.is::<RecoveredException>());
/// ```
#[derive(Clone)]
pub struct Recoverable {
    pass_through: ErrorSet,
    logger: Option<SharedLogger>,
}

/// [`nonfatal_section`] is a [`recoverable`] section under another name.
pub type NonfatalSection = Recoverable;

impl Recoverable {
    pub fn new() -> Self {
        Self { pass_through: ErrorSet::none(), logger: Some(default_logger()) }
    }

    /// Errors matching `pass_through` leave the section unmodified.
    #[must_use]
    pub fn pass_through(mut self, pass_through: impl Into<ErrorSet>) -> Self {
        self.pass_through = pass_through.into();
        self
    }

    #[must_use]
    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Converts without logging.
    #[must_use]
    pub fn silent(mut self) -> Self {
        self.logger = None;
        self
    }

    pub fn run<T, E, F>(self, f: F) -> BoxResult<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        ExceptionConverter {
            reason: Reason::new(&RECOVERED),
            message: Cow::Borrowed("Exception caught in `recoverable()`"),
            pass_through: self.pass_through,
            logger: self.logger,
        }
        .run(f)
    }
}

impl Default for Recoverable {
    fn default() -> Self {
        Self::new()
    }
}

/// Configurable [`precondition`] section.
#[derive(Clone)]
pub struct Precondition {
    logger: Option<SharedLogger>,
}

impl Precondition {
    pub fn new() -> Self {
        Self { logger: Some(default_logger()) }
    }

    #[must_use]
    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    #[must_use]
    pub fn silent(mut self) -> Self {
        self.logger = None;
        self
    }

    pub fn run<T, E, F>(self, f: F) -> BoxResult<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        ExceptionConverter {
            reason: Reason::new(&VIOLATED_PRECONDITION),
            message: Cow::Borrowed("Violated precondition"),
            pass_through: ErrorSet::none(),
            logger: self.logger,
        }
        .run(f)
    }
}

impl Default for Precondition {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `f`, converting every error into a [`RecoveredException`] with a
/// [`RECOVERED`] reason. Use [`Recoverable`] for pass-through types or a
/// specific logger.
pub fn recoverable<T, E, F>(f: F) -> BoxResult<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    Recoverable::new().run(f)
}

/// Marks the checks of a function's preconditions.
///
/// Errors become [`RecoveredException`]s with a [`VIOLATED_PRECONDITION`]
/// reason, logged as `"Violated precondition"`.
pub fn precondition<T, E, F>(f: F) -> BoxResult<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    Precondition::new().run(f)
}

/// Marks the checks of a function's postconditions. Errors pass unchanged.
#[inline]
pub fn postcondition<T, E, F>(f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    f()
}

/// Marks a region without side effects so far; behaves like [`recoverable`].
pub fn nonfatal_section<T, E, F>(f: F) -> BoxResult<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<BoxError>,
{
    NonfatalSection::new().run(f)
}

/// Marks a region whose failures are not recoverable. Errors pass unchanged.
#[inline]
pub fn fatal_section<T, E, F>(f: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    f()
}
