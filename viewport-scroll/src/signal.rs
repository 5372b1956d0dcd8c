use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

/// The caller-owned "a fetch is outstanding" flag.
///
/// Clones share one cell. The controller only ever reads it, and it reads it when a scroll event
/// is handled, so a handler that clears the flag after the controller was built is always
/// observed.
#[derive(Clone, Default)]
pub struct LoadingSignal(Rc<Cell<bool>>);

impl LoadingSignal {
    pub fn new(is_loading: bool) -> Self {
        Self(Rc::new(Cell::new(is_loading)))
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub fn set(&self, is_loading: bool) {
        self.0.set(is_loading);
    }

    /// Raises the flag until the returned guard is dropped.
    ///
    /// Holding the guard inside a fetch future clears the flag on every outcome, including an
    /// early return on error or the future being dropped.
    pub fn begin(&self) -> LoadingGuard {
        self.set(true);
        LoadingGuard {
            signal: self.clone(),
        }
    }

    /// Returns `true` if both signals share the same cell.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for LoadingSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LoadingSignal").field(&self.get()).finish()
    }
}

/// Clears its [`LoadingSignal`] on drop. See [`LoadingSignal::begin`].
#[must_use = "dropping the guard clears the loading flag immediately"]
#[derive(Debug)]
pub struct LoadingGuard {
    signal: LoadingSignal,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.signal.set(false);
    }
}

/// The controller-owned has-more flag. Once cleared it stays cleared.
#[derive(Clone)]
pub(crate) struct HasMore(Rc<Cell<bool>>);

impl HasMore {
    pub(crate) fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub(crate) fn get(&self) -> bool {
        self.0.get()
    }

    pub(crate) fn clear(&self) {
        self.0.set(false);
    }
}
