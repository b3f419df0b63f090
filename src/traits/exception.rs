//! The contract shared by every reason-carrying exception type.
//!
//! [`Exception`] gives uniform access to the message, reason, cause and
//! accumulated info of [`ExceptionParent`], [`RecoveredException`],
//! [`AssertionException`] and any user type built around an
//! [`ExceptionParent`]. [`as_exception`] recovers that view from a
//! type-erased error.
//!
//! User types take part in causal chains (info accumulation, the `(Type)` tag
//! of `Display`, [`ExceptionParent::catch`]) once they are announced with
//! [`register_exception`].
//!
//! # Examples
//!
//! ```
//! use assert_rail::{
//!     recoverable, register_exception, Exception, ExceptionParent, Reason, RecoveredException,
//! };
//! use std::{error::Error, fmt};
//!
//! #[derive(Debug)]
//! struct QuotaError(ExceptionParent);
//!
//! impl fmt::Display for QuotaError {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         fmt::Display::fmt(&self.0, f)
//!     }
//! }
//!
//! impl Error for QuotaError {}
//!
//! impl Exception for QuotaError {
//!     fn parent(&self) -> &ExceptionParent {
//!         &self.0
//!     }
//!
//!     fn type_name(&self) -> &'static str {
//!         "QuotaError"
//!     }
//! }
//!
//! register_exception::<QuotaError>();
//!
//! let quota = QuotaError(
//!     ExceptionParent::new("over quota").with_reason(Reason::unspecific().with_info("used", 12)),
//! );
//! let err = recoverable(|| Err::<(), _>(quota)).unwrap_err();
//! let recovered = err.downcast_ref::<RecoveredException>().unwrap();
//!
//! assert!(recovered.info().contains_key("used"));
//! assert!(recovered.to_string().contains("(QuotaError)"));
//! ```
use core::any::TypeId;
use core::error::Error;
use std::sync::{PoisonError, RwLock};

use crate::types::{AssertionException, ExceptionParent, Info, Reason, RecoveredException};
use crate::SharedLogger;

/// Common interface of reason-carrying exception types.
pub trait Exception: Error + Send + Sync + 'static {
    /// The shared message/reason/cause storage.
    fn parent(&self) -> &ExceptionParent;

    /// Short type name used when rendering causal chains.
    fn type_name(&self) -> &'static str;

    /// Views `error` as `Self`, if it is one.
    ///
    /// The default is an exact downcast. [`ExceptionParent`] overrides it so
    /// that every exception type counts as an `ExceptionParent`.
    fn catch<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a Self>
    where
        Self: Sized,
    {
        error.downcast_ref::<Self>()
    }

    #[inline]
    fn message(&self) -> &str {
        self.parent().message()
    }

    #[inline]
    fn reason(&self) -> &Reason {
        self.parent().reason()
    }

    /// Info accumulated along the chain of causes.
    #[inline]
    fn info(&self) -> Info {
        self.parent().info()
    }

    /// The error this exception was raised from.
    ///
    /// Named apart from the deprecated [`Error::cause`] so both traits can be
    /// in scope.
    #[inline]
    fn caused_by(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.parent().cause()
    }

    #[inline]
    fn logger(&self) -> Option<&SharedLogger> {
        self.parent().logger()
    }
}

type Caster = for<'a> fn(&'a (dyn Error + 'static)) -> Option<&'a dyn Exception>;

static REGISTRY: RwLock<Vec<(TypeId, Caster)>> = RwLock::new(Vec::new());

fn cast<'a, X: Exception>(error: &'a (dyn Error + 'static)) -> Option<&'a dyn Exception> {
    error.downcast_ref::<X>().map(|exception| exception as &dyn Exception)
}

/// Makes [`as_exception`] recognize the user type `X`.
///
/// Registration is process-wide and idempotent. The built-in exception types
/// are always recognized.
pub fn register_exception<X: Exception>() {
    let mut registry = REGISTRY.write().unwrap_or_else(PoisonError::into_inner);
    if registry.iter().all(|(id, _)| *id != TypeId::of::<X>()) {
        let caster: Caster = cast::<X>;
        registry.push((TypeId::of::<X>(), caster));
    }
}

/// Returns the [`Exception`] view of `error` when it is a built-in or a
/// [registered](register_exception) exception type.
///
/// # Examples
///
/// ```
/// use assert_rail::{as_exception, BoxError, Exception, RecoveredException};
///
/// let error: BoxError = Box::new(RecoveredException::new("retry later"));
/// let view = as_exception(&*error).expect("built-in exception");
/// assert_eq!(view.message(), "retry later");
///
/// let plain: BoxError = "plain".into();
/// assert!(as_exception(&*plain).is_none());
/// ```
pub fn as_exception<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a dyn Exception> {
    if let Some(exception) = error.downcast_ref::<RecoveredException>() {
        return Some(exception);
    }
    if let Some(exception) = error.downcast_ref::<AssertionException>() {
        return Some(exception);
    }
    if let Some(exception) = error.downcast_ref::<ExceptionParent>() {
        return Some(exception);
    }

    REGISTRY
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .iter()
        .find_map(|(_, cast)| cast(error))
}
