//! Ergonomic macros.
//!
//! - [`macro@crate::imperative`] / [`macro@crate::expect`] - assertions that
//!   name the enclosing function in their default message and format custom
//!   messages only on failure.
//! - [`macro@crate::call_site`] - captures the enclosing function, file and line.
//! - [`macro@crate::info`] - builds an [`Info`](crate::Info) table.
//! - [`macro@crate::reason_kind`] - declares `static` reason kinds.
//! - [`macro@crate::error_set`] - builds an [`ErrorSet`](crate::ErrorSet) from types.
//!
//! # Examples
//!
//! ```
//! use assert_rail::{imperative, precondition, Exception, RecoveredException};
//!
//! fn open_port(port: u16) -> assert_rail::BoxResult<u16> {
//!     precondition(|| imperative!(port >= 1024, "port {} is privileged", port))?;
//!     Ok(port)
//! }
//!
//! let err = open_port(80).unwrap_err();
//! let recovered = err.downcast_ref::<RecoveredException>().unwrap();
//! assert!(recovered.to_string().contains("port 80 is privileged"));
//! ```

/// Captures the current call site, including the enclosing function's name.
///
/// # Examples
///
/// ```
/// fn load_profile() -> assert_rail::CallSite {
///     assert_rail::call_site!()
/// }
///
/// let site = load_profile();
/// assert_eq!(site.function(), Some("load_profile"));
/// assert_eq!(site.to_string(), "load_profile");
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        $crate::CallSite::new(__type_name_of(__here), file!(), line!())
    }};
}

/// [`imperative`](crate::imperative()) with the call site filled in.
///
/// An optional `format!`-style message is only formatted on failure.
///
/// # Examples
///
/// ```
/// use assert_rail::Exception;
///
/// fn check_ratio() -> Result<(), assert_rail::AssertionException> {
///     assert_rail::imperative!(1 + 1 == 3)
/// }
///
/// let err = check_ratio().unwrap_err();
/// assert_eq!(err.message(), "Imperative failure in check_ratio");
/// ```
#[macro_export]
macro_rules! imperative {
    ($condition:expr $(,)?) => {
        match $condition {
            true => ::core::result::Result::Ok::<(), $crate::AssertionException>(()),
            false => {
                $crate::imperative(false, $crate::Check::new().call_site($crate::call_site!()))
            }
        }
    };
    ($condition:expr, $($arg:tt)+) => {
        match $condition {
            true => ::core::result::Result::Ok::<(), $crate::AssertionException>(()),
            false => $crate::imperative(
                false,
                $crate::Check::new().call_site($crate::call_site!()).message(format!($($arg)+)),
            ),
        }
    };
}

/// [`expect`](crate::expect()) with the call site filled in.
///
/// Whether it fails follows the thread's
/// [`expect_raises`](crate::config::expect_raises) setting.
///
/// # Examples
///
/// ```
/// use assert_rail::config;
///
/// let _scope = config::local_context(false);
/// assert!(assert_rail::expect!(1 > 2, "one is not greater than {}", 2).is_ok());
/// ```
#[macro_export]
macro_rules! expect {
    ($condition:expr $(,)?) => {
        match $condition {
            true => ::core::result::Result::Ok::<(), $crate::AssertionException>(()),
            false => $crate::expect(false, $crate::Check::new().call_site($crate::call_site!())),
        }
    };
    ($condition:expr, $($arg:tt)+) => {
        match $condition {
            true => ::core::result::Result::Ok::<(), $crate::AssertionException>(()),
            false => $crate::expect(
                false,
                $crate::Check::new().call_site($crate::call_site!()).message(format!($($arg)+)),
            ),
        }
    };
}

/// Builds an [`Info`](crate::Info) table from `key => value` pairs.
///
/// # Examples
///
/// ```
/// use assert_rail::{info, InfoValue};
///
/// let info = info! { "user" => "kim", "attempt" => 3, "locked" => false };
/// assert_eq!(info.get("attempt"), Some(&InfoValue::Int(3)));
/// assert!(info!().is_empty());
/// ```
#[macro_export]
macro_rules! info {
    () => {
        $crate::Info::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut info = $crate::Info::new();
        $(info.insert($key, $value);)+
        info
    }};
}

/// Declares `static` [`ReasonKind`](crate::ReasonKind)s.
///
/// Without `=> PARENT` the kind derives from [`UNSPECIFIC`](crate::UNSPECIFIC).
///
/// # Examples
///
/// ```
/// use assert_rail::{reason_kind, RECOVERED};
///
/// reason_kind! {
///     /// Upstream did not answer in time.
///     pub static UPSTREAM_TIMEOUT: "UpstreamTimeout" => RECOVERED;
///     pub static BAD_CONFIG: "BadConfig";
/// }
///
/// assert!(UPSTREAM_TIMEOUT.isa(&RECOVERED));
/// assert!(!BAD_CONFIG.isa(&RECOVERED));
/// ```
#[macro_export]
macro_rules! reason_kind {
    () => {};
    (
        $(#[$meta:meta])* $vis:vis static $ident:ident : $name:literal => $parent:path;
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        $vis static $ident: $crate::ReasonKind = $crate::ReasonKind::new($name, &$parent);
        $crate::reason_kind!($($rest)*);
    };
    ($(#[$meta:meta])* $vis:vis static $ident:ident : $name:literal; $($rest:tt)*) => {
        $(#[$meta])*
        $vis static $ident: $crate::ReasonKind =
            $crate::ReasonKind::new($name, &$crate::UNSPECIFIC);
        $crate::reason_kind!($($rest)*);
    };
}

/// Builds an [`ErrorSet`](crate::ErrorSet) matching each listed error type exactly.
///
/// # Examples
///
/// ```
/// use assert_rail::{error_set, ErrorSet};
/// use std::{io, num::ParseIntError};
///
/// let set: ErrorSet = error_set![io::Error, ParseIntError];
/// assert_eq!(set.len(), 2);
/// assert!(error_set![].is_empty());
/// ```
#[macro_export]
macro_rules! error_set {
    () => {
        $crate::ErrorSet::none()
    };
    ($($error:ty),+ $(,)?) => {
        $crate::ErrorSet::none()$(.and::<$error>())+
    };
}
