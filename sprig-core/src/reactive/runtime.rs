//! Reactive Runtime
//!
//! The runtime is the context object that connects stores and effects. It
//! owns the dependency graph, the active-effect register and the batch
//! queue, and it decides whether a change runs effects now or later.
//!
//! # How It Works
//!
//! 1. When an effect runs, it installs itself in the active-effect register.
//!
//! 2. When a store is read while an effect is active, the runtime records
//!    the edge `(store, effect)`.
//!
//! 3. When a store's value changes, the runtime:
//!    a. Looks up the effects linked to the store
//!    b. Runs them immediately if no batch is open
//!    c. Otherwise queues the store until the outermost batch ends
//!
//! # Scoping
//!
//! Every store, effect and element is created through a runtime handle.
//! Two runtimes share nothing, so independent trees (or tests) cannot
//! observe each other's updates.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use super::context::ActiveEffect;
use super::effect::{Effect, EffectInner};
use super::store::{SameValue, Store};
use super::subscriber::{EffectId, StoreId};
use crate::config::RuntimeConfig;
use crate::graph::{DependencyGraph, UpdateScheduler};

pub(crate) struct RuntimeInner {
    config: RuntimeConfig,

    /// The effect currently executing, if any.
    active: ActiveEffect,

    graph: RefCell<DependencyGraph>,

    /// Live effects by ID. Weak so that only DOM nodes (or the caller) keep
    /// an effect alive.
    effects: RefCell<HashMap<EffectId, Weak<EffectInner>>>,

    /// Nesting depth of `batch` calls. Zero means not batching.
    batch_depth: Cell<usize>,

    scheduler: RefCell<UpdateScheduler>,
}

/// Handle to a reactive scope.
///
/// Cloning the handle is cheap and yields the same scope.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use sprig_core::Runtime;
///
/// let rt = Runtime::new();
/// let count = rt.create_store(0);
/// let seen = Rc::new(Cell::new(0));
///
/// let _effect = rt.create_effect({
///     let count = count.clone();
///     let seen = seen.clone();
///     move || seen.set(count.get())
/// });
///
/// count.set(5);
/// assert_eq!(seen.get(), 5);
/// ```
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    /// Create a runtime with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RuntimeConfig::default())
    }

    pub fn with_config(config: RuntimeConfig) -> Self {
        debug!(
            runtime = %config.label(),
            prune_stale_edges = config.prune_stale_edges(),
            "runtime created"
        );
        Self {
            inner: Rc::new(RuntimeInner {
                config,
                active: ActiveEffect::new(),
                graph: RefCell::new(DependencyGraph::new()),
                effects: RefCell::new(HashMap::new()),
                batch_depth: Cell::new(0),
                scheduler: RefCell::new(UpdateScheduler::new()),
            }),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.inner.config
    }

    /// Create a store whose changes are detected with [`SameValue`].
    pub fn create_store<T>(&self, initial: T) -> Store<T>
    where
        T: SameValue + 'static,
    {
        Store::new(self.clone(), initial, T::same_value)
    }

    /// Create a store with a custom identity check.
    ///
    /// `set` is a no-op whenever `same(current, new)` returns `true`.
    pub fn create_store_with<T, F>(&self, initial: T, same: F) -> Store<T>
    where
        T: 'static,
        F: Fn(&T, &T) -> bool + 'static,
    {
        Store::new(self.clone(), initial, same)
    }

    /// Create an effect and run it immediately to collect its dependencies.
    pub fn create_effect<F>(&self, run: F) -> Effect
    where
        F: Fn() + 'static,
    {
        Effect::new(self, run)
    }

    /// Run `f` with change notifications deferred.
    ///
    /// Effects triggered inside `f` run once each when the outermost batch
    /// returns, even if `f` panics. The panic then resumes.
    pub fn batch<R>(&self, f: impl FnOnce() -> R) -> R {
        let depth = self.inner.batch_depth.get() + 1;
        self.inner.batch_depth.set(depth);

        let result = panic::catch_unwind(AssertUnwindSafe(f));

        let depth = self.inner.batch_depth.get() - 1;
        self.inner.batch_depth.set(depth);
        if depth == 0 {
            self.flush();
        }

        match result {
            Ok(value) => value,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Run `f` without tracking any store reads.
    pub fn untrack<R>(&self, f: impl FnOnce() -> R) -> R {
        let _scope = self.inner.active.suspend();
        f()
    }

    /// The effect currently executing, if any.
    pub fn active_effect(&self) -> Option<EffectId> {
        self.inner.active.current()
    }

    pub fn is_batching(&self) -> bool {
        self.inner.batch_depth.get() > 0
    }

    pub fn batch_depth(&self) -> usize {
        self.inner.batch_depth.get()
    }

    /// Total number of store/effect edges.
    pub fn edge_count(&self) -> usize {
        self.inner.graph.borrow().edge_count()
    }

    /// Number of live effects.
    pub fn effect_count(&self) -> usize {
        self.inner.effects.borrow().len()
    }

    /// Check if two handles refer to the same runtime.
    pub fn ptr_eq(&self, other: &Runtime) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    // ------------------------------------------------------------------------
    // Crate-internal plumbing for stores and effects
    // ------------------------------------------------------------------------

    pub(crate) fn active(&self) -> &ActiveEffect {
        &self.inner.active
    }

    /// Link `store` to the active effect, if there is one.
    pub(crate) fn track(&self, store: StoreId) {
        let Some(effect) = self.inner.active.current() else {
            return;
        };
        if self.inner.graph.borrow_mut().track(store, effect) {
            trace!(runtime = %self.inner.config.label(), %store, %effect, "tracked");
        }
    }

    /// React to a change of `store`.
    pub(crate) fn notify(&self, store: StoreId) {
        if !self.inner.graph.borrow().has_subscribers(store) {
            return;
        }

        if self.is_batching() {
            self.inner.scheduler.borrow_mut().enqueue(store);
            trace!(runtime = %self.inner.config.label(), %store, "queued");
            return;
        }

        let effects = self.inner.graph.borrow().subscribers(store);
        self.run_effects(&effects);
    }

    fn flush(&self) {
        let stores = self.inner.scheduler.borrow_mut().drain();
        if stores.is_empty() {
            return;
        }

        let plan = UpdateScheduler::plan(&self.inner.graph.borrow(), stores.iter().copied());
        debug!(
            runtime = %self.inner.config.label(),
            pending = stores.len(),
            effects = plan.len(),
            "flushing batch"
        );
        self.run_effects(&plan);
    }

    fn run_effects(&self, ids: &[EffectId]) {
        let effects: Vec<Effect> = {
            let registry = self.inner.effects.borrow();
            ids.iter()
                .filter_map(|id| registry.get(id).and_then(Weak::upgrade))
                .map(Effect::from_inner)
                .collect()
        };

        for effect in &effects {
            effect.execute();
        }
    }

    pub(crate) fn register_effect(&self, id: EffectId, effect: Weak<EffectInner>) {
        self.inner.effects.borrow_mut().insert(id, effect);
    }

    /// Drop an effect from the registry and the graph.
    ///
    /// Called from destructors, so it tolerates a busy graph and leaves the
    /// stale entry for the next unregister instead of panicking.
    pub(crate) fn unregister_effect(&self, id: EffectId) {
        if let Ok(mut registry) = self.inner.effects.try_borrow_mut() {
            registry.remove(&id);
        }
        if let Ok(mut graph) = self.inner.graph.try_borrow_mut() {
            graph.remove_effect(id);
        }
    }

    pub(crate) fn clear_dependencies(&self, id: EffectId) {
        self.inner.graph.borrow_mut().clear_effect(id);
    }

    pub(crate) fn forget_store(&self, id: StoreId) {
        if let Ok(mut graph) = self.inner.graph.try_borrow_mut() {
            graph.remove_store(id);
        }
    }

    pub(crate) fn subscriber_count(&self, store: StoreId) -> usize {
        self.inner.graph.borrow().subscriber_count(store)
    }

    pub(crate) fn dependency_count(&self, effect: EffectId) -> usize {
        self.inner.graph.borrow().dependency_count(effect)
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("label", &self.inner.config.label())
            .field("batch_depth", &self.batch_depth())
            .field("effect_count", &self.effect_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn counter() -> (Rc<Cell<i32>>, Rc<Cell<i32>>) {
        let count = Rc::new(Cell::new(0));
        (count.clone(), count)
    }

    #[test]
    fn runtimes_are_isolated() {
        let rt1 = Runtime::new();
        let rt2 = Runtime::new();
        assert!(!rt1.ptr_eq(&rt2));
        assert!(rt1.ptr_eq(&rt1.clone()));

        let store = rt1.create_store(0);
        let (runs, runs_clone) = counter();
        let _effect = rt2.create_effect(move || {
            store.get();
            runs_clone.set(runs_clone.get() + 1);
        });

        // Read happened under rt2's effect, but rt1 has no active effect
        assert_eq!(rt1.edge_count(), 0);
        assert_eq!(rt2.edge_count(), 0);
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn batch_defers_until_outermost_exit() {
        let rt = Runtime::new();
        let store = rt.create_store(0);
        let (runs, runs_clone) = counter();

        let _effect = rt.create_effect({
            let store = store.clone();
            move || {
                store.get();
                runs_clone.set(runs_clone.get() + 1);
            }
        });
        assert_eq!(runs.get(), 1);

        rt.batch(|| {
            store.set(1);
            rt.batch(|| store.set(2));
            // Inner batch must not flush early
            assert_eq!(runs.get(), 1);
            assert_eq!(rt.batch_depth(), 1);
            store.set(3);
        });

        assert_eq!(runs.get(), 2);
        assert!(!rt.is_batching());
    }

    #[test]
    fn batch_flushes_when_closure_panics() {
        let rt = Runtime::new();
        let store = rt.create_store(0);
        let (runs, runs_clone) = counter();

        let _effect = rt.create_effect({
            let store = store.clone();
            move || {
                store.get();
                runs_clone.set(runs_clone.get() + 1);
            }
        });

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            rt.batch(|| {
                store.set(7);
                panic!("boom");
            })
        }));

        assert!(result.is_err());
        assert_eq!(runs.get(), 2);
        assert_eq!(rt.batch_depth(), 0);
    }

    #[test]
    fn batch_returns_closure_value() {
        let rt = Runtime::new();
        assert_eq!(rt.batch(|| 40 + 2), 42);
    }

    #[test]
    fn untrack_skips_bookkeeping() {
        let rt = Runtime::new();
        let store = rt.create_store(1);

        let effect = rt.create_effect({
            let rt = rt.clone();
            let store = store.clone();
            move || {
                rt.untrack(|| store.get());
            }
        });

        assert_eq!(effect.dependency_count(), 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn dropped_effect_leaves_registry() {
        let rt = Runtime::new();
        let store = rt.create_store(0);

        let effect = rt.create_effect({
            let store = store.clone();
            move || {
                store.get();
            }
        });
        assert_eq!(rt.effect_count(), 1);
        assert_eq!(store.subscriber_count(), 1);

        drop(effect);
        assert_eq!(rt.effect_count(), 0);
        assert_eq!(store.subscriber_count(), 0);
    }
}
