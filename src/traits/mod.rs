//! Collaborator traits.
//!
//! - [`Exception`]: uniform access to reason-carrying errors
//! - [`Logger`]: where assertion failures and caught errors are reported
mod exception;
mod logger;

pub use exception::{as_exception, register_exception, Exception};
pub use logger::{default_logger, Logger, SharedLogger, TracingLogger};
