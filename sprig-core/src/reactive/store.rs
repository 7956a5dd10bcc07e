//! Store Implementation
//!
//! A Store is the fundamental reactive primitive. It holds one value and
//! tracks which effects depend on it.
//!
//! # How Stores Work
//!
//! 1. When a store is read while an effect is active, the runtime links the
//!    store to that effect.
//!
//! 2. When a store is written with a value that is not the
//!    [same value](SameValue) as the current one, the linked effects run
//!    (or are queued if a batch is open).
//!
//! 3. Reads and writes outside any effect are always legal and skip the
//!    graph bookkeeping.

use std::cell::RefCell;
use std::fmt::{self, Debug};
use std::rc::Rc;

use super::runtime::Runtime;
use super::subscriber::StoreId;
use crate::dom::Node;

/// Identity check used to decide whether a write is a change.
///
/// This is the `Object.is` relation: plain values compare by value, floats
/// by bit pattern except that every NaN is the same as every other NaN
/// (so `+0.0` and `-0.0` differ), and shared handles by pointer.
///
/// Collections have no impl: a list store holds an
/// `Rc<Vec<_>>`, so every freshly built list is a change even when its
/// contents match. [`Runtime::create_store_with`] takes any other relation.
pub trait SameValue {
    fn same_value(&self, other: &Self) -> bool;
}

macro_rules! same_value_by_eq {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SameValue for $ty {
                #[inline]
                fn same_value(&self, other: &Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

same_value_by_eq!(
    (), bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, String,
    &'static str,
);

impl SameValue for f64 {
    fn same_value(&self, other: &Self) -> bool {
        (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
    }
}

impl SameValue for f32 {
    fn same_value(&self, other: &Self) -> bool {
        (self.is_nan() && other.is_nan()) || self.to_bits() == other.to_bits()
    }
}

impl<T: SameValue> SameValue for Option<T> {
    fn same_value(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.same_value(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: ?Sized> SameValue for Rc<T> {
    fn same_value(&self, other: &Self) -> bool {
        Rc::ptr_eq(self, other)
    }
}

impl SameValue for Node {
    fn same_value(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

struct StoreInner<T> {
    id: StoreId,
    value: RefCell<T>,
    same: Box<dyn Fn(&T, &T) -> bool>,
    runtime: Runtime,
}

impl<T> Drop for StoreInner<T> {
    fn drop(&mut self) {
        self.runtime.forget_store(self.id);
    }
}

/// A single reactively-observable mutable value.
///
/// Clones share the same cell.
///
/// # Example
///
/// ```rust
/// use sprig_core::Runtime;
///
/// let rt = Runtime::new();
/// let count = rt.create_store(0);
///
/// assert_eq!(count.get(), 0);
/// count.set(5);
/// count.update(|v| v + 1);
/// assert_eq!(count.get(), 6);
/// ```
pub struct Store<T: 'static> {
    inner: Rc<StoreInner<T>>,
}

impl<T: 'static> Store<T> {
    pub(crate) fn new<F>(runtime: Runtime, value: T, same: F) -> Self
    where
        F: Fn(&T, &T) -> bool + 'static,
    {
        Self {
            inner: Rc::new(StoreInner {
                id: StoreId::new(),
                value: RefCell::new(value),
                same: Box::new(same),
                runtime,
            }),
        }
    }

    pub fn id(&self) -> StoreId {
        self.inner.id
    }

    /// Get the current value.
    ///
    /// If called while an effect is running, the effect now depends on
    /// this store.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.inner.runtime.track(self.inner.id);
        self.inner.value.borrow().clone()
    }

    /// Read the current value by reference, tracking like [`get`](Self::get).
    ///
    /// `f` must not write to this store.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.runtime.track(self.inner.id);
        f(&*self.inner.value.borrow())
    }

    /// Get the current value without tracking dependencies.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.inner.value.borrow().clone()
    }

    /// Replace the value and notify dependents.
    ///
    /// Does nothing if `value` is the same as the current value.
    pub fn set(&self, value: T) {
        if (self.inner.same)(&*self.inner.value.borrow(), &value) {
            return;
        }
        // The previous value drops here, after the borrow is released.
        let _previous = self.inner.value.replace(value);
        self.inner.runtime.notify(self.inner.id);
    }

    /// Update the value using a function of the current value.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&T) -> T,
    {
        let next = f(&*self.inner.value.borrow());
        self.set(next);
    }

    /// Get the number of effects linked to this store.
    pub fn subscriber_count(&self) -> usize {
        self.inner.runtime.subscriber_count(self.inner.id)
    }

    pub fn runtime(&self) -> &Runtime {
        &self.inner.runtime
    }
}

impl<T: 'static> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Debug + 'static> Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("id", &self.inner.id)
            .field("value", &*self.inner.value.borrow())
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counting_effect<T: Clone + 'static>(
        rt: &Runtime,
        store: &Store<T>,
    ) -> (crate::reactive::Effect, Rc<Cell<usize>>) {
        let runs = Rc::new(Cell::new(0));
        let effect = rt.create_effect({
            let store = store.clone();
            let runs = runs.clone();
            move || {
                store.get();
                runs.set(runs.get() + 1);
            }
        });
        (effect, runs)
    }

    #[test]
    fn store_get_and_set() {
        let rt = Runtime::new();
        let store = rt.create_store(0);
        assert_eq!(store.get(), 0);

        store.set(42);
        assert_eq!(store.get(), 42);
    }

    #[test]
    fn store_update() {
        let rt = Runtime::new();
        let store = rt.create_store(10);
        store.update(|v| v + 5);
        assert_eq!(store.get(), 15);
    }

    #[test]
    fn setting_same_value_is_a_noop() {
        let rt = Runtime::new();
        let store = rt.create_store(String::from("a"));
        let (_effect, runs) = counting_effect(&rt, &store);

        store.set(String::from("b"));
        store.set(String::from("b"));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn nan_is_same_as_nan() {
        let rt = Runtime::new();
        let store = rt.create_store(f64::NAN);
        let (_effect, runs) = counting_effect(&rt, &store);

        store.set(f64::NAN);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn signed_zeros_differ() {
        let rt = Runtime::new();
        let store = rt.create_store(0.0_f64);
        let (_effect, runs) = counting_effect(&rt, &store);

        store.set(-0.0);
        assert_eq!(runs.get(), 2);
        store.set(-0.0);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn rc_values_compare_by_identity() {
        let rt = Runtime::new();
        let first = Rc::new(vec![1, 2, 3]);
        let store = rt.create_store(first.clone());
        let (_effect, runs) = counting_effect(&rt, &store);

        store.set(first);
        assert_eq!(runs.get(), 1);

        // Equal contents, different allocation
        store.set(Rc::new(vec![1, 2, 3]));
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn custom_identity() {
        let rt = Runtime::new();
        let store = rt.create_store_with(String::from("Hello"), |a, b| a.eq_ignore_ascii_case(b));
        let (_effect, runs) = counting_effect(&rt, &store);

        store.set(String::from("HELLO"));
        assert_eq!(runs.get(), 1);
        assert_eq!(store.get(), "Hello");
    }

    #[test]
    fn read_outside_effect_does_not_track() {
        let rt = Runtime::new();
        let store = rt.create_store(1);
        store.get();
        store.with(|v| *v + 1);
        assert_eq!(store.subscriber_count(), 0);
        assert_eq!(rt.edge_count(), 0);
    }

    #[test]
    fn store_clone_shares_state() {
        let rt = Runtime::new();
        let store1 = rt.create_store(0);
        let store2 = store1.clone();

        store1.set(42);
        assert_eq!(store2.get(), 42);
        assert_eq!(store1.id(), store2.id());
    }

    #[test]
    fn dropping_store_removes_edges() {
        let rt = Runtime::new();
        let store = rt.create_store(0);
        let effect = rt.create_effect({
            let store = store.clone();
            move || {
                store.get();
            }
        });
        assert_eq!(rt.edge_count(), 1);

        // The effect's closure still owns a clone; dropping both releases it
        drop(store);
        drop(effect);
        assert_eq!(rt.edge_count(), 0);
    }
}
