//! Active-Effect Register
//!
//! The register records which effect is currently executing. When a store
//! is read, the runtime consults the register to link the store to that
//! effect.
//!
//! # Implementation
//!
//! Only one effect is active at a time. Entering a scope overwrites the
//! register and remembers the previous occupant; the returned guard puts the
//! previous occupant back when dropped. Because restoration lives in `Drop`,
//! it also happens while unwinding out of a panicking effect, so tracking
//! never leaks into unrelated later reads.

use std::cell::Cell;

use super::subscriber::EffectId;

/// Slot holding the currently executing effect, if any.
#[derive(Debug, Default)]
pub struct ActiveEffect {
    current: Cell<Option<EffectId>>,
}

impl ActiveEffect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `effect` the active effect until the returned guard drops.
    pub fn enter(&self, effect: EffectId) -> ActiveScope<'_> {
        self.swap(Some(effect))
    }

    /// Clear the register until the returned guard drops.
    ///
    /// Reads performed in this scope are not tracked.
    pub fn suspend(&self) -> ActiveScope<'_> {
        self.swap(None)
    }

    /// Get the active effect, if any.
    pub fn current(&self) -> Option<EffectId> {
        self.current.get()
    }

    /// Check if an effect is currently executing.
    pub fn is_active(&self) -> bool {
        self.current.get().is_some()
    }

    fn swap(&self, next: Option<EffectId>) -> ActiveScope<'_> {
        let previous = self.current.replace(next);
        ActiveScope {
            register: self,
            installed: next,
            previous,
        }
    }
}

/// Guard that restores the previous active effect when dropped.
pub struct ActiveScope<'a> {
    register: &'a ActiveEffect,
    installed: Option<EffectId>,
    previous: Option<EffectId>,
}

impl Drop for ActiveScope<'_> {
    fn drop(&mut self) {
        let popped = self.register.current.replace(self.previous);

        // Scopes must unwind in strict LIFO order.
        debug_assert_eq!(
            popped, self.installed,
            "active effect mismatch: expected {:?}, got {:?}",
            self.installed, popped
        );
    }
}
