//! Value types of the crate.
//!
//! - [`Info`] / [`InfoValue`]: key-value diagnostics
//! - [`Reason`] / [`ReasonKind`]: why something failed
//! - [`ExceptionParent`], [`RecoveredException`], [`AssertionException`]:
//!   reason-carrying errors
//! - [`ErrorFilter`] / [`ErrorSet`] / [`Caught`]: matching intercepted failures
//!
//! # Examples
//!
//! ```
//! use assert_rail::{AssertionException, Exception, info, ASSERTION};
//!
//! let err = AssertionException::new("limit exceeded", info! { "limit" => 10 });
//!
//! assert!(err.reason().isa(&ASSERTION));
//! assert!(err.to_string().contains("limit exceeded"));
//! ```
pub mod error_filter;
pub mod exception;
pub mod info;
pub mod reason;

pub use error_filter::*;
pub use exception::*;
pub use info::*;
pub use reason::*;

/// Type-erased error carried through section scopes and handlers.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Result alias used by section scopes.
pub type BoxResult<T> = Result<T, BoxError>;
