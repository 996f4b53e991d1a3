//! In-memory status shadowing a backing store.
//!
//! The repository may be stale or uninitialized, so the controller keeps
//! its own copy of each status. Reads combine both slots with a fixed rule:
//! the cached value wins unless the store holds the very same value.

/// A cached status paired with the rule for resolving it against the store.
#[derive(Debug, Clone, Copy)]
pub struct ShadowedStatus<T> {
    cached: T,
}

impl<T: Copy + PartialEq> ShadowedStatus<T> {
    pub fn new(initial: T) -> Self {
        Self { cached: initial }
    }

    /// Replace the cached value.
    pub fn set(&mut self, value: T) {
        self.cached = value;
    }

    /// The cached value without consulting the store.
    pub fn cached(&self) -> T {
        self.cached
    }

    /// Resolve the authoritative value given what the store currently reports.
    pub fn resolve(&self, stored: Option<T>) -> T {
        match stored {
            Some(value) if value == self.cached => value,
            _ => self.cached,
        }
    }
}
