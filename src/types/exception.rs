//! Reason-carrying exception types.
//!
//! [`ExceptionParent`] holds a message, exactly one [`Reason`], an optional
//! cause and an optional logger. [`RecoveredException`] and
//! [`AssertionException`] wrap it to mark how the failure came about.
//!
//! Info accumulates along the chain of causes: [`ExceptionParent::info`]
//! starts from the cause's info (when the cause is itself an exception) and
//! applies its own reason's info on top.
//!
//! # Examples
//!
//! ```
//! use assert_rail::{reason_kind, Exception, ExceptionParent, Reason, RecoveredException};
//!
//! reason_kind! {
//!     pub static LOAD_FAILED: "LoadFailed";
//!     pub static RELOADED: "Reloaded";
//! }
//!
//! let cause = ExceptionParent::new("cannot read")
//!     .with_reason(Reason::new(&LOAD_FAILED).with_info("cause", true));
//! let outer = RecoveredException::new("fell back to defaults")
//!     .with_reason(Reason::new(&RELOADED).with_info("raise", "Yes"))
//!     .with_cause(cause);
//!
//! let info = outer.info();
//! assert_eq!(info.len(), 2);
//! assert!(info.contains_key("cause") && info.contains_key("raise"));
//! assert!(outer.to_string().contains("fell back to defaults, from (ExceptionParent) "));
//! ```
use core::error::Error;
use core::fmt::{self, Display};

use crate::traits::{as_exception, Exception};
use crate::types::{BoxError, Info, Reason, ASSERTION};
use crate::SharedLogger;

/// Base of the exception hierarchy.
pub struct ExceptionParent {
    message: String,
    reason: Reason,
    cause: Option<BoxError>,
    logger: Option<SharedLogger>,
}

impl ExceptionParent {
    /// Creates an exception with the unspecific reason and no cause.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), reason: Reason::unspecific(), cause: None, logger: None }
    }

    /// Replaces the reason.
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<Reason>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Chains `cause` as the error this exception was raised from.
    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<BoxError>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Remembers the logger responsible for this exception.
    #[must_use]
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn reason(&self) -> &Reason {
        &self.reason
    }

    #[inline]
    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    #[inline]
    pub fn logger(&self) -> Option<&SharedLogger> {
        self.logger.as_ref()
    }

    /// Takes the cause out, leaving the exception without one.
    pub fn take_cause(&mut self) -> Option<BoxError> {
        self.cause.take()
    }

    /// Returns the info of the whole causal chain.
    ///
    /// The deepest exception's info comes first; each outer reason is merged
    /// on top, so outer keys win. Non-exception causes contribute nothing and
    /// end the walk.
    pub fn info(&self) -> Info {
        let mut info = self
            .cause()
            .and_then(|cause| as_exception(cause))
            .map(|cause| cause.info())
            .unwrap_or_default();
        info.merge(self.reason.info());
        info
    }
}

impl fmt::Debug for ExceptionParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExceptionParent")
            .field("message", &self.message)
            .field("reason", &self.reason)
            .field("cause", &self.cause)
            .field("logger", &self.logger.as_ref().map(|_| "<logger>"))
            .finish()
    }
}

impl Display for ExceptionParent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.reason, self.message)?;
        if let Some(cause) = self.cause() {
            match as_exception(cause) {
                Some(exception) => write!(f, ", from ({}) {cause}", exception.type_name())?,
                None => write!(f, ", from {cause}")?,
            }
        }
        Ok(())
    }
}

impl Error for ExceptionParent {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause().map(|cause| cause as &(dyn Error + 'static))
    }
}

impl Exception for ExceptionParent {
    #[inline]
    fn parent(&self) -> &ExceptionParent {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        "ExceptionParent"
    }

    fn catch<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a Self> {
        as_exception(error).map(|exception| exception.parent())
    }
}

/// Implements `cause()`, `Display`, `Error` and [`Exception`] for a newtype over
/// [`ExceptionParent`].
macro_rules! delegate_exception {
    ($name:ident) => {
        impl $name {
            /// The error this exception was raised from.
            #[inline]
            pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
                self.0.cause()
            }
        }

        impl Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.0, f)
            }
        }

        impl Error for $name {
            #[inline]
            fn source(&self) -> Option<&(dyn Error + 'static)> {
                self.0.source()
            }
        }

        impl Exception for $name {
            #[inline]
            fn parent(&self) -> &ExceptionParent {
                &self.0
            }

            #[inline]
            fn type_name(&self) -> &'static str {
                stringify!($name)
            }
        }
    };
}

/// An error that was caught at a boundary and re-classified.
///
/// Signals "recovered: no irrecoverable side effects so far". The original
/// error stays reachable through [`cause`](Self::cause).
#[derive(Debug)]
pub struct RecoveredException(ExceptionParent);

impl RecoveredException {
    pub fn new(message: impl Into<String>) -> Self {
        Self(ExceptionParent::new(message))
    }

    #[must_use]
    pub fn with_reason(self, reason: impl Into<Reason>) -> Self {
        Self(self.0.with_reason(reason))
    }

    #[must_use]
    pub fn with_cause(self, cause: impl Into<BoxError>) -> Self {
        Self(self.0.with_cause(cause))
    }

    #[must_use]
    pub fn with_logger(self, logger: SharedLogger) -> Self {
        Self(self.0.with_logger(logger))
    }

    /// Unwraps into the underlying [`ExceptionParent`].
    #[inline]
    pub fn into_parent(self) -> ExceptionParent {
        self.0
    }
}

impl From<ExceptionParent> for RecoveredException {
    #[inline]
    fn from(parent: ExceptionParent) -> Self {
        Self(parent)
    }
}

delegate_exception!(RecoveredException);

/// A failed assertion; see [`imperative`](crate::imperative) and
/// [`expect`](crate::expect).
///
/// Always carries an [`ASSERTION`] reason holding the info supplied at the
/// check.
#[derive(Debug)]
pub struct AssertionException(ExceptionParent);

impl AssertionException {
    pub fn new(message: impl Into<String>, info: Info) -> Self {
        Self(ExceptionParent::new(message).with_reason(Reason::new(&ASSERTION).with_infos(info)))
    }

    #[must_use]
    pub fn with_logger(self, logger: SharedLogger) -> Self {
        Self(self.0.with_logger(logger))
    }

    #[inline]
    pub fn into_parent(self) -> ExceptionParent {
        self.0
    }
}

delegate_exception!(AssertionException);
