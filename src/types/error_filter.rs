//! Type-based matching of caught errors and panics.
//!
//! An [`ErrorFilter`] answers "is this caught value of type `T`?". An
//! [`ErrorSet`] is a list of filters; it is used for the pass-through list of
//! [`Recoverable`](crate::Recoverable) and the ignore list of
//! [`ExceptionHandler`](crate::ExceptionHandler). An empty set matches
//! nothing.
//!
//! # Examples
//!
//! ```
//! use assert_rail::{error_set, BoxError, Caught, ErrorFilter, ErrorSet};
//! use std::{fmt, io};
//!
//! let set: ErrorSet = error_set![io::Error, fmt::Error];
//! let error: BoxError = Box::new(io::Error::other("disk"));
//!
//! assert!(set.matches(&Caught::Error(&*error)));
//! assert!(!ErrorSet::none().matches(&Caught::Error(&*error)));
//! assert_eq!(ErrorSet::from(ErrorFilter::any_panic()).len(), 1);
//! ```
use core::any::Any;
use core::error::Error;
use core::fmt::{self, Display};

use smallvec::SmallVec;

use crate::traits::Exception;

/// A value intercepted by a scope: either a returned error or a panic payload.
///
/// Panics play the role of the "base" failures that are not ordinary,
/// recoverable errors.
#[derive(Clone, Copy)]
pub enum Caught<'a> {
    Error(&'a (dyn Error + Send + Sync + 'static)),
    Panic(&'a (dyn Any + Send)),
}

impl<'a> Caught<'a> {
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    #[inline]
    pub fn is_panic(&self) -> bool {
        matches!(self, Self::Panic(_))
    }

    /// Returns the error, if this is one.
    #[inline]
    pub fn error(&self) -> Option<&'a (dyn Error + Send + Sync + 'static)> {
        match *self {
            Self::Error(error) => Some(error),
            Self::Panic(_) => None,
        }
    }

    /// Returns the panic message for `&str`/`String` payloads.
    pub fn panic_message(&self) -> Option<&'a str> {
        match *self {
            Self::Error(_) => None,
            Self::Panic(payload) => {
                if let Some(message) = payload.downcast_ref::<&'static str>() {
                    return Some(*message);
                }
                payload.downcast_ref::<String>().map(String::as_str)
            },
        }
    }
}

impl fmt::Debug for Caught<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => f.debug_tuple("Error").field(error).finish(),
            Self::Panic(_) => f.debug_tuple("Panic").field(&self.panic_message()).finish(),
        }
    }
}

impl Display for Caught<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => Display::fmt(error, f),
            Self::Panic(_) => match self.panic_message() {
                Some(message) => write!(f, "panicked: {message}"),
                None => f.write_str("panicked"),
            },
        }
    }
}

/// A named predicate over [`Caught`] values.
#[derive(Clone, Copy)]
pub struct ErrorFilter {
    name: &'static str,
    matches: fn(&Caught<'_>) -> bool,
}

impl ErrorFilter {
    /// Matches returned errors whose concrete type is exactly `E`.
    pub fn of<E: Error + 'static>() -> Self {
        Self { name: core::any::type_name::<E>(), matches: error_is::<E> }
    }

    /// Matches returned errors that [`X::catch`](Exception::catch) accepts.
    ///
    /// For [`ExceptionParent`](crate::ExceptionParent) that is every built-in
    /// exception type.
    pub fn exception<X: Exception>() -> Self {
        Self { name: core::any::type_name::<X>(), matches: exception_is::<X> }
    }

    /// Matches panics whose payload is a `P` (see [`std::panic::panic_any`]).
    pub fn panic<P: Any>() -> Self {
        Self { name: core::any::type_name::<P>(), matches: panic_is::<P> }
    }

    /// Matches every panic.
    pub fn any_panic() -> Self {
        Self { name: "panic", matches: is_panic }
    }

    /// Matches anything for which `predicate` returns `true`.
    pub fn when(name: &'static str, predicate: fn(&Caught<'_>) -> bool) -> Self {
        Self { name, matches: predicate }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn matches(&self, caught: &Caught<'_>) -> bool {
        (self.matches)(caught)
    }
}

impl fmt::Debug for ErrorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErrorFilter").field(&self.name).finish()
    }
}

fn error_is<E: Error + 'static>(caught: &Caught<'_>) -> bool {
    caught.error().is_some_and(|error| error.is::<E>())
}

fn exception_is<X: Exception>(caught: &Caught<'_>) -> bool {
    caught.error().is_some_and(|error| X::catch(error).is_some())
}

fn is_panic(caught: &Caught<'_>) -> bool {
    caught.is_panic()
}

fn panic_is<P: Any>(caught: &Caught<'_>) -> bool {
    match caught {
        Caught::Panic(payload) => payload.is::<P>(),
        Caught::Error(_) => false,
    }
}

/// A normalized list of [`ErrorFilter`]s.
///
/// Build it from a single filter, an array, an iterator or
/// [`error_set!`](crate::error_set).
#[derive(Debug, Clone, Default)]
pub struct ErrorSet {
    filters: SmallVec<[ErrorFilter; 2]>,
}

impl ErrorSet {
    /// The empty set; it matches nothing.
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }

    /// A set holding [`ErrorFilter::of::<E>`](ErrorFilter::of).
    #[inline]
    pub fn of<E: Error + 'static>() -> Self {
        Self::from(ErrorFilter::of::<E>())
    }

    /// Adds [`ErrorFilter::of::<E>`](ErrorFilter::of).
    #[inline]
    #[must_use]
    pub fn and<E: Error + 'static>(self) -> Self {
        self.with(ErrorFilter::of::<E>())
    }

    /// Adds any filter.
    #[inline]
    #[must_use]
    pub fn with(mut self, filter: ErrorFilter) -> Self {
        self.filters.push(filter);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ErrorFilter> {
        self.filters.iter()
    }

    /// Returns `true` if any filter matches.
    pub fn matches(&self, caught: &Caught<'_>) -> bool {
        self.filters.iter().any(|filter| filter.matches(caught))
    }

    /// Shorthand for matching a returned error.
    #[inline]
    pub fn matches_error(&self, error: &(dyn Error + Send + Sync + 'static)) -> bool {
        self.matches(&Caught::Error(error))
    }
}

impl From<ErrorFilter> for ErrorSet {
    fn from(filter: ErrorFilter) -> Self {
        let mut filters = SmallVec::new();
        filters.push(filter);
        Self { filters }
    }
}

impl<const N: usize> From<[ErrorFilter; N]> for ErrorSet {
    fn from(filters: [ErrorFilter; N]) -> Self {
        filters.into_iter().collect()
    }
}

impl From<Option<ErrorFilter>> for ErrorSet {
    fn from(filter: Option<ErrorFilter>) -> Self {
        filter.into_iter().collect()
    }
}

impl FromIterator<ErrorFilter> for ErrorSet {
    fn from_iter<I: IntoIterator<Item = ErrorFilter>>(iter: I) -> Self {
        Self { filters: iter.into_iter().collect() }
    }
}

impl Extend<ErrorFilter> for ErrorSet {
    fn extend<I: IntoIterator<Item = ErrorFilter>>(&mut self, iter: I) {
        self.filters.extend(iter);
    }
}
