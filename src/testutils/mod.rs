//! Helpers for testing code that fails with reason-carrying exceptions.
//!
//! # Examples
//!
//! ```
//! use assert_rail::testutils::raises;
//! use assert_rail::{reason_kind, Reason, RecoveredException};
//!
//! reason_kind! {
//!     pub static QUOTA_EXCEEDED: "QuotaExceeded";
//! }
//!
//! raises::<RecoveredException>(&QUOTA_EXCEEDED)
//!     .info_key("quota")
//!     .run(|| {
//!         Err::<(), _>(
//!             RecoveredException::new("over quota")
//!                 .with_reason(Reason::new(&QUOTA_EXCEEDED).with_info("quota", 10)),
//!         )
//!     })
//!     .unwrap();
//! ```
use core::any::type_name;
use core::marker::PhantomData;

use crate::traits::Exception;
use crate::types::{BoxError, ReasonKind};

/// Expectation that a closure fails with exception `X` and a given reason.
///
/// Created by [`raises`].
#[must_use = "an expectation does nothing until `run` is called"]
#[derive(Debug)]
pub struct Raises<X> {
    reason: &'static ReasonKind,
    info_keys: Vec<String>,
    _exception: PhantomData<fn() -> X>,
}

/// Expects an `X` whose reason [`isa`](ReasonKind::isa) `reason`.
pub fn raises<X: Exception>(reason: &'static ReasonKind) -> Raises<X> {
    Raises { reason, info_keys: Vec::new(), _exception: PhantomData }
}

impl<X: Exception> Raises<X> {
    /// Requires `key` in the accumulated info of the exception.
    pub fn info_key(mut self, key: impl Into<String>) -> Self {
        self.info_keys.push(key.into());
        self
    }

    /// Requires every key of `keys` in the accumulated info of the exception.
    pub fn info_keys<I>(mut self, keys: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.info_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Runs `f` and checks how it failed.
    ///
    /// - `Ok(())` when `f` failed with an `X` of the expected reason carrying
    ///   all expected info keys.
    /// - `Err(error)` with the untouched error when the type or the reason
    ///   does not match, so the surrounding test reports it.
    ///
    /// # Panics
    ///
    /// Panics when `f` succeeds, or when an expected info key is missing.
    #[track_caller]
    pub fn run<T, E, F>(self, f: F) -> Result<(), BoxError>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<BoxError>,
    {
        let error: BoxError = match f() {
            Ok(_) => panic!("Didn't raise exception: {}", type_name::<X>()),
            Err(error) => error.into(),
        };

        let Some(exception) = X::catch(&*error) else {
            return Err(error);
        };
        if !exception.reason().isa(self.reason) {
            return Err(error);
        }

        let info = exception.info();
        for key in &self.info_keys {
            assert!(info.contains_key(key), "{key} not in {info}");
        }
        Ok(())
    }
}
