//! Assertions, reason-carrying errors and recovery sections.
//!
//! The crate is a thin layer of conventions over `Result`:
//!
//! - [`imperative`] and [`expect`] check conditions, log failures and return
//!   [`AssertionException`]s.
//! - [`ExceptionParent`], [`RecoveredException`] and [`AssertionException`]
//!   carry a message, a [`Reason`] with key-value [`Info`], and an optional
//!   cause; info accumulates along the chain of causes.
//! - Sections ([`precondition`], [`recoverable`], [`nonfatal_section`],
//!   [`postcondition`], [`fatal_section`]) decide at a region's boundary
//!   whether errors are converted into [`RecoveredException`]s.
//! - [`ExceptionHandler`] logs, ignores or hands off failures (including
//!   panics) to a callback.
//! - [`config`] holds per-thread settings with scoped overrides.
//! - [`testutils::raises`] asserts on the type and reason of a failure.
//!
//! # Examples
//!
//! ## Preconditions
//!
//! ```
//! use assert_rail::{imperative, precondition, BoxResult, Check, Exception, RecoveredException};
//!
//! fn transfer(amount: i64) -> BoxResult<i64> {
//!     let check = Check::new().message("non-positive amount").info("amount", amount);
//!     precondition(|| imperative(amount > 0, check))?;
//!     Ok(amount)
//! }
//!
//! let err = transfer(-5).unwrap_err();
//! let recovered = err.downcast_ref::<RecoveredException>().unwrap();
//! assert_eq!(recovered.message(), "Violated precondition");
//! assert!(recovered.info().contains_key("amount"));
//! ```
//!
//! ## Chained info
//!
//! ```
//! use assert_rail::{reason_kind, Exception, ExceptionParent, Reason, RecoveredException};
//!
//! reason_kind! {
//!     pub static CAUSE: "CauseReason";
//!     pub static RERAISED: "ReraisedReason";
//! }
//!
//! let cause =
//!     ExceptionParent::new("message").with_reason(Reason::new(&CAUSE).with_info("cause", true));
//! let outer = RecoveredException::new("raised")
//!     .with_reason(Reason::new(&RERAISED).with_info("raise", "Yes"))
//!     .with_cause(cause);
//!
//! assert_eq!(outer.info().to_string(), r#"{cause: true, raise: "Yes"}"#);
//! ```
//!
//! ## Scoped configuration
//!
//! ```
//! use assert_rail::{config, expect, Check};
//!
//! config::with_local_context(false, || {
//!     assert!(expect(false, Check::new().message("only logged")).is_ok());
//! });
//! ```

/// Condition checks: `imperative`, `expect`
pub mod assertion;
/// Per-thread settings and scoped overrides
pub mod config;
/// Generic exception handler scope
pub mod handler;
/// Ergonomic macros
pub mod macros;
/// Convenience re-exports
pub mod prelude;
/// Error-converting sections
pub mod section;
/// Helpers for tests
pub mod testutils;
/// Collaborator traits: `Exception`, `Logger`
pub mod traits;
/// Info, reasons, exceptions and error filters
pub mod types;

pub use assertion::{expect, imperative, CallSite, Check};
pub use handler::{
    ignore_exception, log_exception, ExceptionHandler, ExceptionHandlerBuilder, Outcome,
};
pub use section::{
    fatal_section, nonfatal_section, postcondition, precondition, recoverable, NonfatalSection,
    Precondition, Recoverable,
};
pub use traits::*;
pub use types::*;

pub use tracing::Level;
