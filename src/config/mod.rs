//! Per-thread assertion settings with scoped overrides.
//!
//! Every thread owns a stack of [`Settings`], seeded with
//! `expect_raises = cfg!(debug_assertions)`. A [`LocalContext`] pushes a copy
//! of the current settings and pops it again when dropped, on normal exit as
//! well as during unwinding. Threads never see each other's settings.
//!
//! # Examples
//!
//! ```
//! use assert_rail::config::{self, local_context};
//!
//! let before = config::expect_raises();
//! {
//!     let _outer = local_context(false);
//!     assert!(!config::expect_raises());
//!     {
//!         let _inner = local_context(true);
//!         assert!(config::expect_raises());
//!     }
//!     assert!(!config::expect_raises());
//! }
//! assert_eq!(config::expect_raises(), before);
//! ```
use core::cell::{Cell, RefCell};
use core::marker::PhantomData;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Assertion behavior toggles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Whether [`expect`](crate::expect) fails when no explicit `throw` is given.
    pub expect_raises: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { expect_raises: cfg!(debug_assertions) }
    }
}

struct Entry {
    id: u64,
    settings: Settings,
}

/// Settings stack of one thread.
///
/// Entries are addressed by id, never by position, so a guard whose entry is
/// already gone cannot touch a newer one. Borrows never outlive a method:
/// callbacks run on a copy and may read or push settings themselves.
struct Configuration {
    stack: RefCell<Vec<Entry>>,
    next_id: Cell<u64>,
}

impl Configuration {
    const SEED: u64 = 0;

    fn new() -> Self {
        let seed = Entry { id: Self::SEED, settings: Settings::default() };
        Self { stack: RefCell::new(vec![seed]), next_id: Cell::new(Self::SEED + 1) }
    }

    fn current(&self) -> Settings {
        let stack = self.stack.borrow();
        stack.last().map(|entry| entry.settings).unwrap_or_default()
    }

    fn top_id(&self) -> u64 {
        self.stack.borrow().last().map_or(Self::SEED, |entry| entry.id)
    }

    /// Runs `f` on a copy of entry `id` and stores the result, if the entry
    /// still exists afterwards.
    fn update(&self, id: u64, f: impl FnOnce(&mut Settings)) {
        let found = {
            let stack = self.stack.borrow();
            stack.iter().find(|entry| entry.id == id).map(|entry| entry.settings)
        };
        let Some(mut settings) = found else {
            return;
        };

        f(&mut settings);

        let mut stack = self.stack.borrow_mut();
        if let Some(entry) = stack.iter_mut().find(|entry| entry.id == id) {
            entry.settings = settings;
        }
    }

    /// Pushes a copy of the top entry and returns its id.
    fn push(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let mut stack = self.stack.borrow_mut();
        let settings = stack.last().map(|entry| entry.settings).unwrap_or_default();
        stack.push(Entry { id, settings });
        id
    }

    /// Drops entry `id` and everything above it. The seed entry stays.
    fn pop(&self, id: u64) {
        let mut stack = self.stack.borrow_mut();
        if let Some(position) = stack.iter().position(|entry| entry.id == id) {
            stack.truncate(position.max(1));
        }
    }

    fn depth(&self) -> usize {
        self.stack.borrow().len()
    }
}

thread_local! {
    static CONFIGURATION: Configuration = Configuration::new();
}

/// Returns this thread's current settings.
pub fn settings() -> Settings {
    CONFIGURATION.with(Configuration::current)
}

/// Returns this thread's current `expect_raises` flag.
pub fn expect_raises() -> bool {
    settings().expect_raises
}

/// Sets `expect_raises` in the innermost scope of this thread.
///
/// Outside any [`LocalContext`] this changes the thread's base settings for
/// good.
pub fn set_expect_raises(value: bool) {
    configure(|settings| settings.expect_raises = value);
}

/// Mutates the innermost settings of this thread.
///
/// `f` may itself read the settings or open scopes.
pub fn configure(f: impl FnOnce(&mut Settings)) {
    CONFIGURATION.with(|configuration| configuration.update(configuration.top_id(), f));
}

/// Number of settings entries on this thread's stack, the base one included.
pub fn depth() -> usize {
    CONFIGURATION.with(Configuration::depth)
}

/// Scope guard for a settings override on the current thread.
///
/// Created by [`LocalContext::new`] or [`local_context`]. Dropping it restores
/// the settings that were in effect before it was created, together with any
/// override pushed after it that is still alive.
#[must_use = "the override is removed as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LocalContext {
    id: u64,
    // Settings are per thread; the guard must not leave it.
    _not_send: PhantomData<*const ()>,
}

impl LocalContext {
    /// Pushes a copy of the current settings.
    pub fn new() -> Self {
        let id = CONFIGURATION.with(Configuration::push);
        Self { id, _not_send: PhantomData }
    }

    /// Sets `expect_raises` for this scope.
    pub fn expect_raises(self, value: bool) -> Self {
        self.configure(|settings| settings.expect_raises = value)
    }

    /// Mutates the settings owned by this scope.
    pub fn configure(self, f: impl FnOnce(&mut Settings)) -> Self {
        CONFIGURATION.with(|configuration| configuration.update(self.id, f));
        self
    }
}

impl Default for LocalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LocalContext {
    fn drop(&mut self) {
        // The thread-local may already be gone during thread teardown.
        let _ = CONFIGURATION.try_with(|configuration| configuration.pop(self.id));
    }
}

/// Opens a scope in which [`expect`](crate::expect) raises according to `expect_raises`.
pub fn local_context(expect_raises: bool) -> LocalContext {
    LocalContext::new().expect_raises(expect_raises)
}

/// Runs `f` inside [`local_context`]`(expect_raises)`.
pub fn with_local_context<T>(expect_raises: bool, f: impl FnOnce() -> T) -> T {
    let _scope = local_context(expect_raises);
    f()
}
