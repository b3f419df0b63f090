//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use assert_rail::prelude::*;
//!
//! fn parse_limit(raw: &str) -> BoxResult<u32> {
//!     let limit: u32 = recoverable(|| raw.parse::<u32>())?;
//!     precondition(|| imperative(limit <= 100, "limit above 100"))?;
//!     Ok(limit)
//! }
//!
//! assert_eq!(parse_limit("42").unwrap(), 42);
//! assert!(parse_limit("x").unwrap_err().is::<RecoveredException>());
//! ```

// Macros; `expect` and `imperative` bring both the function and the macro
pub use crate::{call_site, error_set, expect, imperative, info, reason_kind};

// Assertions and sections
pub use crate::assertion::Check;
pub use crate::section::{fatal_section, nonfatal_section, postcondition, precondition, recoverable};

// Core types
pub use crate::types::{
    AssertionException, BoxError, BoxResult, ExceptionParent, Info, Reason, ReasonKind,
    RecoveredException,
};

// Traits
pub use crate::traits::{Exception, Logger};
