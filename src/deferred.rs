//! Write-once cells used to hand out a type identity before its definition is known.
use std::cell::OnceCell;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeferredError {
    #[error("deferred cell read before it was fulfilled")]
    Unfulfilled,

    #[error("deferred cell fulfilled more than once")]
    AlreadyFulfilled,
}

/// A one-shot container: allocated unset, fulfilled exactly once, read only afterwards.
///
/// Every member of a module gets one of these before any of them is resolved, which is what
/// allows declarations to refer to siblings (or themselves) that are not defined yet.
pub struct Deferred<T> {
    slot: OnceCell<T>,
}

impl<T> Deferred<T> {
    pub fn new() -> Self {
        Self {
            slot: OnceCell::new(),
        }
    }

    pub fn is_fulfilled(&self) -> bool {
        self.slot.get().is_some()
    }

    pub fn try_fulfill(&self, value: T) -> Result<(), DeferredError> {
        self.slot
            .set(value)
            .map_err(|_| DeferredError::AlreadyFulfilled)
    }

    /// Stores `value` in the cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell was already fulfilled.
    pub fn fulfill(&self, value: T) {
        if let Err(e) = self.try_fulfill(value) {
            panic!("{e}");
        }
    }

    pub fn try_get(&self) -> Result<&T, DeferredError> {
        self.slot.get().ok_or(DeferredError::Unfulfilled)
    }

    /// Returns the stored value.
    ///
    /// # Panics
    ///
    /// Panics if the cell has not been fulfilled yet. That only happens when a resolution pass
    /// reads a cell before the pass that defines it has completed.
    pub fn get(&self) -> &T {
        match self.try_get() {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> Default for Deferred<T> {
    fn default() -> Self {
        Self::new()
    }
}

// the contents may point back at this very cell, so never print them
impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fulfilled() {
            f.write_str("Deferred(<fulfilled>)")
        } else {
            f.write_str("Deferred(<unset>)")
        }
    }
}
