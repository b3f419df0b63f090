//! Assertions that log before they fail.
//!
//! - [`imperative`] always fails when its condition is false.
//! - [`expect`] always logs when its condition is false, but only fails when
//!   asked to, either explicitly through [`Check::throw`] or through the
//!   thread's [`expect_raises`](crate::config::expect_raises) setting.
//!
//! Both return `Result<(), AssertionException>`, so they compose with `?`
//! inside [`precondition`](crate::precondition) and friends.
//!
//! # Examples
//!
//! ```
//! use assert_rail::{expect, imperative, Check, Exception};
//!
//! fn withdraw(balance: u64, amount: u64) -> Result<u64, assert_rail::AssertionException> {
//!     imperative(amount <= balance, Check::new().message("overdraft").info("amount", amount))?;
//!     expect(amount < 10_000, Check::new().message("unusually large withdrawal").throw(false))?;
//!     Ok(balance - amount)
//! }
//!
//! assert_eq!(withdraw(100, 30).unwrap(), 70);
//!
//! let err = withdraw(10, 30).unwrap_err();
//! assert_eq!(err.message(), "overdraft");
//! assert!(err.info().contains_key("amount"));
//! ```
use core::fmt::{self, Display};
use std::panic::Location;

use tracing::Level;

use crate::config;
use crate::traits::{default_logger, SharedLogger};
use crate::types::{AssertionException, Info, InfoValue};

/// Where an assertion was written.
///
/// [`call_site!`](crate::call_site) fills in the enclosing function; without
/// it only the `#[track_caller]` location is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallSite {
    module: &'static str,
    function: Option<&'static str>,
    file: &'static str,
    line: u32,
}

impl CallSite {
    /// Builds a call site from the type name of a helper item declared in
    /// the calling function (`path::to::function::__here`).
    #[doc(hidden)]
    pub fn new(marker_path: &'static str, file: &'static str, line: u32) -> Self {
        let mut path = marker_path.strip_suffix("::__here").unwrap_or(marker_path);
        while let Some(outer) = path.strip_suffix("::{{closure}}") {
            path = outer;
        }
        let (module, function) = match path.rsplit_once("::") {
            Some((module, function)) => (module, Some(function)),
            None => ("", Some(path)),
        };
        Self { module, function, file, line }
    }

    /// The location of the caller of the current `#[track_caller]` function.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self { module: "", function: None, file: location.file(), line: location.line() }
    }

    #[inline]
    pub fn module(&self) -> &'static str {
        self.module
    }

    #[inline]
    pub fn function(&self) -> Option<&'static str> {
        self.function
    }

    #[inline]
    pub fn file(&self) -> &'static str {
        self.file
    }

    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }
}

impl Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.function {
            Some(function) => f.write_str(function),
            None => write!(f, "{}:{}", self.file, self.line),
        }
    }
}

/// Options of a single [`imperative`] or [`expect`] call.
///
/// Everything is optional; unset fields fall back to the defaults of the
/// function being called.
#[derive(Clone, Default)]
pub struct Check {
    message: Option<String>,
    info: Info,
    level: Option<Level>,
    logger: Option<SharedLogger>,
    throw: Option<bool>,
    call_site: Option<CallSite>,
}

impl Check {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message logged (and carried by the exception) on failure.
    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Adds one info entry to the exception.
    #[must_use]
    pub fn info<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<InfoValue>,
    {
        self.info.insert(key, value);
        self
    }

    /// Merges a whole info table into the exception.
    #[must_use]
    pub fn infos(mut self, info: Info) -> Self {
        self.info.merge(&info);
        self
    }

    /// Level of the failure record.
    #[must_use]
    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Logger receiving the failure record.
    #[must_use]
    pub fn logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// For [`expect`]: fail (`true`) or only log (`false`) regardless of the
    /// thread's settings.
    #[must_use]
    pub fn throw(mut self, throw: bool) -> Self {
        self.throw = Some(throw);
        self
    }

    /// Call site named in the default message.
    #[must_use]
    pub fn call_site(mut self, call_site: CallSite) -> Self {
        self.call_site = Some(call_site);
        self
    }

    fn report(
        self,
        kind: &str,
        default_level: Level,
        location: &'static Location<'static>,
    ) -> Failure {
        let call_site = self.call_site.unwrap_or_else(|| CallSite::from_location(location));
        let message = self.message.unwrap_or_else(|| format!("{kind} failure in {call_site}"));
        let logger = self.logger.unwrap_or_else(default_logger);
        logger.log(self.level.unwrap_or(default_level), &message);
        Failure { message, info: self.info, logger }
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("message", &self.message)
            .field("info", &self.info)
            .field("level", &self.level)
            .field("throw", &self.throw)
            .field("call_site", &self.call_site)
            .finish_non_exhaustive()
    }
}

impl From<&str> for Check {
    fn from(message: &str) -> Self {
        Self::new().message(message)
    }
}

impl From<String> for Check {
    fn from(message: String) -> Self {
        Self::new().message(message)
    }
}

struct Failure {
    message: String,
    info: Info,
    logger: SharedLogger,
}

impl Failure {
    fn into_exception(self) -> AssertionException {
        AssertionException::new(self.message, self.info).with_logger(self.logger)
    }
}

/// Fails with an [`AssertionException`] if `condition` is false.
///
/// The failure is logged at [`Check::level`] (default `ERROR`) before it is
/// returned. The default message is `"Imperative failure in <caller>"`.
///
/// # Examples
///
/// ```
/// use assert_rail::{imperative, Exception};
///
/// assert!(imperative(true, "unused").is_ok());
///
/// let err = imperative(false, "boom").unwrap_err();
/// assert_eq!(err.message(), "boom");
/// ```
#[track_caller]
pub fn imperative(condition: bool, check: impl Into<Check>) -> Result<(), AssertionException> {
    let location = Location::caller();
    if condition {
        return Ok(());
    }
    Err(check.into().report("Imperative", Level::ERROR, location).into_exception())
}

/// Logs if `condition` is false, and fails only when configured to.
///
/// The failure is logged at [`Check::level`] (default `WARN`). It is returned
/// as an error when [`Check::throw`] is `true`, or when it is unset and the
/// thread's [`expect_raises`](crate::config::expect_raises) is on. The default
/// message is `"Expect failure in <caller>"`.
///
/// # Examples
///
/// ```
/// use assert_rail::{config, expect, Check};
///
/// assert!(expect(false, Check::new().throw(false)).is_ok());
/// assert!(expect(false, Check::new().throw(true)).is_err());
///
/// let _scope = config::local_context(true);
/// assert!(expect(false, "configured to fail").is_err());
/// ```
#[track_caller]
pub fn expect(condition: bool, check: impl Into<Check>) -> Result<(), AssertionException> {
    let location = Location::caller();
    if condition {
        return Ok(());
    }
    let check = check.into();
    let throw = check.throw;
    let failure = check.report("Expect", Level::WARN, location);
    if throw.unwrap_or_else(config::expect_raises) {
        Err(failure.into_exception())
    } else {
        Ok(())
    }
}
