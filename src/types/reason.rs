//! Reasons classify *why* an exception happened.
//!
//! A [`ReasonKind`] is a `'static` node in an open hierarchy: every kind names
//! its parent, and [`ReasonKind::isa`] walks the ancestry. Applications declare
//! their own kinds with [`reason_kind!`](crate::reason_kind) and attach
//! key-value [`Info`] through [`Reason`].
//!
//! # Examples
//!
//! ```
//! use assert_rail::{reason_kind, Reason, RECOVERED, UNSPECIFIC};
//!
//! reason_kind! {
//!     /// The remote side went away.
//!     pub static CONNECTION_LOST: "ConnectionLost" => RECOVERED;
//! }
//!
//! let reason = Reason::new(&CONNECTION_LOST).with_info("peer", "10.0.0.7");
//!
//! assert!(reason.isa(&CONNECTION_LOST));
//! assert!(reason.isa(&RECOVERED));
//! assert!(reason.isa(&UNSPECIFIC));
//! ```
use core::fmt::{self, Display};
use std::path::{Path, PathBuf};

use crate::types::{Info, InfoValue};

/// A node of the reason hierarchy.
///
/// Kinds are compared by address, so they must live in `static` items.
#[derive(Debug)]
pub struct ReasonKind {
    name: &'static str,
    parent: Option<&'static ReasonKind>,
}

impl ReasonKind {
    /// Creates a kind without a parent. Only [`UNSPECIFIC`] should be one.
    #[doc(hidden)]
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// Creates a kind derived from `parent`.
    pub const fn new(name: &'static str, parent: &'static ReasonKind) -> Self {
        Self { name, parent: Some(parent) }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn parent(&self) -> Option<&'static ReasonKind> {
        self.parent
    }

    /// Iterates from this kind up to the root, this kind included.
    pub fn ancestors(&self) -> impl Iterator<Item = &ReasonKind> {
        core::iter::successors(Some(self), |kind| kind.parent.map(|parent| parent as &ReasonKind))
    }

    /// Returns `true` if `other` is this kind or one of its ancestors.
    pub fn isa(&self, other: &ReasonKind) -> bool {
        self.ancestors().any(|kind| core::ptr::eq(kind, other))
    }

    /// Returns `true` if [`isa`](Self::isa) holds for any of `others`.
    pub fn isa_any(&self, others: &[&ReasonKind]) -> bool {
        others.iter().any(|other| self.isa(other))
    }
}

impl PartialEq for ReasonKind {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

impl Eq for ReasonKind {}

impl Display for ReasonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Root of every reason; use it directly when nothing more specific applies.
pub static UNSPECIFIC: ReasonKind = ReasonKind::root("Reason");

/// Set by [`recoverable`](crate::recoverable) when it converts an error.
pub static RECOVERED: ReasonKind = ReasonKind::new("RecoveredReason", &UNSPECIFIC);

/// Set by [`precondition`](crate::precondition) when a check inside it fails.
pub static VIOLATED_PRECONDITION: ReasonKind =
    ReasonKind::new("ViolatedPreconditionReason", &RECOVERED);

/// Carried by every [`AssertionException`](crate::AssertionException).
pub static ASSERTION: ReasonKind = ReasonKind::new("Assertion", &UNSPECIFIC);

/// A file or directory already exists. See [`FileExists`].
pub static FILE_EXISTS: ReasonKind = ReasonKind::new("FileExists", &UNSPECIFIC);

/// A reason kind plus the diagnostics describing this occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct Reason {
    kind: &'static ReasonKind,
    info: Info,
}

impl Reason {
    /// Creates a reason of `kind` without info.
    #[inline]
    pub fn new(kind: &'static ReasonKind) -> Self {
        Self { kind, info: Info::new() }
    }

    /// The canonical reason used when none is given.
    #[inline]
    pub fn unspecific() -> Self {
        Self::new(&UNSPECIFIC)
    }

    /// Adds one info entry.
    #[inline]
    #[must_use]
    pub fn with_info<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<InfoValue>,
    {
        self.info.insert(key, value);
        self
    }

    /// Merges a whole table into this reason's info.
    #[inline]
    #[must_use]
    pub fn with_infos(mut self, info: Info) -> Self {
        self.info.merge(&info);
        self
    }

    #[inline]
    pub fn kind(&self) -> &'static ReasonKind {
        self.kind
    }

    #[inline]
    pub fn info(&self) -> &Info {
        &self.info
    }

    #[inline]
    pub fn isa(&self, other: &ReasonKind) -> bool {
        self.kind.isa(other)
    }

    #[inline]
    pub fn isa_any(&self, others: &[&ReasonKind]) -> bool {
        self.kind.isa_any(others)
    }
}

impl Default for Reason {
    fn default() -> Self {
        Self::unspecific()
    }
}

impl From<&'static ReasonKind> for Reason {
    #[inline]
    fn from(kind: &'static ReasonKind) -> Self {
        Self::new(kind)
    }
}

impl Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.kind, self.info)
    }
}

/// Typed [`FILE_EXISTS`] reason.
///
/// The path is made absolute against the current directory and exposed both
/// through [`path`](Self::path) and as the `"path"` info entry.
///
/// # Examples
///
/// ```
/// use assert_rail::{FileExists, Reason, FILE_EXISTS};
///
/// let exists = FileExists::new("/srv/data");
/// assert_eq!(exists.path(), "/srv/data");
///
/// let reason = Reason::from(exists);
/// assert!(reason.isa(&FILE_EXISTS));
/// assert_eq!(reason.info().get("path").and_then(|v| v.as_str()), Some("/srv/data"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FileExists {
    path: String,
    info: Info,
}

impl FileExists {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = absolute_path(path.as_ref()).to_string_lossy().into_owned();
        let info = Info::new().with("path", path.as_str());
        Self { path, info }
    }

    /// Adds an extra info entry next to `"path"`.
    #[must_use]
    pub fn with_info<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<InfoValue>,
    {
        self.info.insert(key, value);
        self
    }

    /// Path of the file or directory that caused the failure.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl From<FileExists> for Reason {
    fn from(exists: FileExists) -> Self {
        Reason::new(&FILE_EXISTS).with_infos(exists.info)
    }
}

fn absolute_path(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return std::env::current_dir().unwrap_or_default();
    }
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
