//! Effect Implementation
//!
//! An Effect is a side-effecting computation that runs whenever its
//! dependencies change.
//!
//! # How Effects Work
//!
//! 1. When created, the effect runs its function immediately to establish
//!    initial dependencies.
//!
//! 2. When any dependency changes, the runtime re-runs the effect (or queues
//!    it while a batch is open).
//!
//! 3. Every run happens inside an active-effect scope, so reads performed
//!    during a re-run are tracked too. With edge pruning enabled (the
//!    default) the effect drops its old edges first and ends up linked to
//!    exactly the stores its latest run read.
//!
//! # Ownership
//!
//! The runtime only holds weak references to effects. An effect lives as
//! long as some handle does; the element builder parks its handles on the
//! DOM node they keep in sync, so dropping the node drops its effects.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{trace, warn};

use super::runtime::Runtime;
use super::subscriber::EffectId;

/// Reruns an effect may trigger on itself before the loop is cut off.
pub const MAX_RERUNS: usize = 100;

pub(crate) struct EffectInner {
    id: EffectId,

    /// The effect function.
    run: Box<dyn Fn()>,

    runtime: Runtime,

    /// Whether the effect has been disposed.
    disposed: Cell<bool>,

    /// Set while the effect function is on the stack.
    running: Cell<bool>,

    /// Set when the effect is triggered during its own run.
    dirty: Cell<bool>,

    /// Number of times the effect has run.
    run_count: Cell<usize>,
}

impl Drop for EffectInner {
    fn drop(&mut self) {
        self.runtime.unregister_effect(self.id);
    }
}

/// A side-effecting computation that runs when dependencies change.
///
/// # Example
///
/// ```rust
/// use sprig_core::Runtime;
///
/// let rt = Runtime::new();
/// let name = rt.create_store(String::from("world"));
///
/// let effect = rt.create_effect({
///     let name = name.clone();
///     move || println!("hello, {}", name.get())
/// });
///
/// name.set(String::from("sprig")); // prints "hello, sprig"
/// assert_eq!(effect.run_count(), 2);
/// ```
#[derive(Clone)]
pub struct Effect {
    inner: Rc<EffectInner>,
}

impl Effect {
    /// Create a new effect and run it immediately.
    pub fn new<F>(runtime: &Runtime, run: F) -> Self
    where
        F: Fn() + 'static,
    {
        let effect = Self::new_lazy(runtime, run);
        effect.execute();
        effect
    }

    /// Create a new effect without running it.
    ///
    /// The effect has no dependencies until its first `execute`.
    pub fn new_lazy<F>(runtime: &Runtime, run: F) -> Self
    where
        F: Fn() + 'static,
    {
        let inner = Rc::new(EffectInner {
            id: EffectId::new(),
            run: Box::new(run),
            runtime: runtime.clone(),
            disposed: Cell::new(false),
            running: Cell::new(false),
            dirty: Cell::new(false),
            run_count: Cell::new(0),
        });
        runtime.register_effect(inner.id, Rc::downgrade(&inner));
        Self { inner }
    }

    pub(crate) fn from_inner(inner: Rc<EffectInner>) -> Self {
        Self { inner }
    }

    pub fn id(&self) -> EffectId {
        self.inner.id
    }

    /// Execute the effect function inside its tracking scope.
    ///
    /// A trigger that arrives while the effect is already running is not
    /// re-entered. It marks the effect dirty, and the effect runs again
    /// right after the current run returns, up to [`MAX_RERUNS`] times.
    pub fn execute(&self) {
        let inner = &*self.inner;
        if inner.disposed.get() {
            return;
        }
        if inner.running.get() {
            trace!(
                runtime = %inner.runtime.config().label(),
                effect = %inner.id,
                "effect triggered while running; deferring"
            );
            inner.dirty.set(true);
            return;
        }

        let mut reruns = 0;
        loop {
            inner.dirty.set(false);
            self.run_once();

            if !inner.dirty.get() || inner.disposed.get() {
                break;
            }
            if reruns == MAX_RERUNS {
                warn!(
                    runtime = %inner.runtime.config().label(),
                    effect = %inner.id,
                    reruns,
                    "effect keeps triggering itself; giving up"
                );
                inner.dirty.set(false);
                break;
            }
            reruns += 1;
        }
    }

    fn run_once(&self) {
        let inner = &*self.inner;
        // Edges are cleared before the run, so a run that panics before
        // reading anything leaves the effect unsubscribed.
        if inner.runtime.config().prune_stale_edges() {
            inner.runtime.clear_dependencies(inner.id);
        }

        trace!(runtime = %inner.runtime.config().label(), effect = %inner.id, "running effect");

        let _running = RunningGuard::set(&inner.running);
        let _scope = inner.runtime.active().enter(inner.id);
        (inner.run)();

        inner.run_count.set(inner.run_count.get() + 1);
    }

    /// Dispose of the effect.
    ///
    /// After disposal the effect never runs again and holds no edges.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        self.inner.runtime.clear_dependencies(self.inner.id);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Get the number of times the effect has run.
    pub fn run_count(&self) -> usize {
        self.inner.run_count.get()
    }

    /// Get the number of stores this effect is linked to.
    pub fn dependency_count(&self) -> usize {
        self.inner.runtime.dependency_count(self.inner.id)
    }
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Effect")
            .field("id", &self.inner.id)
            .field("run_count", &self.run_count())
            .field("dependency_count", &self.dependency_count())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Clears the running flag on every exit path.
struct RunningGuard<'a>(&'a Cell<bool>);

impl<'a> RunningGuard<'a> {
    fn set(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;

    #[test]
    fn effect_runs_on_creation() {
        let rt = Runtime::new();
        let run_count = Rc::new(Cell::new(0));
        let run_count_clone = run_count.clone();

        let _effect = rt.create_effect(move || {
            run_count_clone.set(run_count_clone.get() + 1);
        });

        assert_eq!(run_count.get(), 1);
    }

    #[test]
    fn effect_lazy_does_not_run_on_creation() {
        let rt = Runtime::new();
        let run_count = Rc::new(Cell::new(0));
        let run_count_clone = run_count.clone();

        let effect = Effect::new_lazy(&rt, move || {
            run_count_clone.set(run_count_clone.get() + 1);
        });

        assert_eq!(run_count.get(), 0);
        assert_eq!(effect.run_count(), 0);

        effect.execute();
        assert_eq!(run_count.get(), 1);
        assert_eq!(effect.run_count(), 1);
    }

    #[test]
    fn effect_reruns_on_store_change() {
        let rt = Runtime::new();
        let store = rt.create_store(1);
        let seen = Rc::new(Cell::new(0));

        let effect = rt.create_effect({
            let store = store.clone();
            let seen = seen.clone();
            move || seen.set(store.get())
        });

        store.set(2);
        store.set(3);
        assert_eq!(seen.get(), 3);
        assert_eq!(effect.run_count(), 3);
    }

    #[test]
    fn effect_does_not_run_after_disposal() {
        let rt = Runtime::new();
        let store = rt.create_store(0);

        let effect = rt.create_effect({
            let store = store.clone();
            move || {
                store.get();
            }
        });
        assert_eq!(effect.dependency_count(), 1);

        effect.dispose();
        assert!(effect.is_disposed());
        assert_eq!(effect.dependency_count(), 0);

        store.set(1);
        effect.execute();
        assert_eq!(effect.run_count(), 1);
    }

    #[test]
    fn pruning_drops_stores_no_longer_read() {
        let rt = Runtime::new();
        let flag = rt.create_store(true);
        let a = rt.create_store(0);
        let b = rt.create_store(0);

        let effect = rt.create_effect({
            let (flag, a, b) = (flag.clone(), a.clone(), b.clone());
            move || {
                if flag.get() {
                    a.get();
                } else {
                    b.get();
                }
            }
        });
        assert_eq!(effect.dependency_count(), 2);

        flag.set(false);
        assert_eq!(effect.dependency_count(), 2);
        assert_eq!(a.subscriber_count(), 0);

        // `a` is no longer read, so changing it does nothing
        a.set(10);
        assert_eq!(effect.run_count(), 2);
    }

    #[test]
    fn additive_edges_when_pruning_disabled() {
        let rt = Runtime::with_config(RuntimeConfig::new().with_pruning(false));
        let flag = rt.create_store(true);
        let a = rt.create_store(0);
        let b = rt.create_store(0);

        let effect = rt.create_effect({
            let (flag, a, b) = (flag.clone(), a.clone(), b.clone());
            move || {
                if flag.get() {
                    a.get();
                } else {
                    b.get();
                }
            }
        });

        flag.set(false);
        assert_eq!(effect.dependency_count(), 3);

        // Stale edge still fires
        a.set(10);
        assert_eq!(effect.run_count(), 3);
    }

    #[test]
    fn self_trigger_reruns_after_current_run() {
        let rt = Runtime::new();
        let store = rt.create_store(0);

        let effect = rt.create_effect({
            let store = store.clone();
            move || {
                let value = store.get();
                if value < 5 {
                    store.set(value + 1);
                }
            }
        });

        assert_eq!(effect.run_count(), 6);
        assert_eq!(store.get_untracked(), 5);
    }

    #[test]
    fn deferred_rerun_sees_latest_value() {
        let rt = Runtime::new();
        let store = rt.create_store(0);
        let seen = Rc::new(std::cell::RefCell::new(Vec::new()));

        let _effect = rt.create_effect({
            let (store, seen) = (store.clone(), seen.clone());
            move || {
                let value = store.get();
                seen.borrow_mut().push(value);
                if value % 2 == 1 {
                    store.set(value + 1);
                }
            }
        });

        store.set(1);
        assert_eq!(store.get_untracked(), 2);
        assert_eq!(*seen.borrow(), [0, 1, 2]);
        assert_eq!(seen.borrow().last().copied(), Some(store.get_untracked()));
    }

    #[test]
    fn runaway_self_trigger_is_capped() {
        let rt = Runtime::new();
        let store = rt.create_store(0usize);

        let effect = rt.create_effect({
            let store = store.clone();
            move || store.set(store.get() + 1)
        });

        assert_eq!(effect.run_count(), MAX_RERUNS + 1);
        assert_eq!(store.get_untracked(), MAX_RERUNS + 1);

        // The effect is still subscribed and capped again on the next change.
        store.set(0);
        assert_eq!(effect.run_count(), 2 * (MAX_RERUNS + 1));
    }

    #[test]
    fn panic_before_first_read_leaves_effect_unsubscribed() {
        let rt = Runtime::new();
        let store = rt.create_store(0);
        let fail = Rc::new(Cell::new(false));

        let effect = rt.create_effect({
            let (store, fail) = (store.clone(), fail.clone());
            move || {
                if fail.get() {
                    panic!("effect failed");
                }
                store.get();
            }
        });
        assert_eq!(store.subscriber_count(), 1);

        fail.set(true);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| store.set(1)));
        assert!(result.is_err());
        assert_eq!(effect.run_count(), 1);
        assert_eq!(store.subscriber_count(), 0);
        assert_eq!(rt.active_effect(), None);

        // Nothing links the store to the effect any more.
        fail.set(false);
        store.set(2);
        assert_eq!(effect.run_count(), 1);

        // An explicit run subscribes it again.
        effect.execute();
        store.set(3);
        assert_eq!(effect.run_count(), 3);
    }

    #[test]
    fn effect_clone_shares_state() {
        let rt = Runtime::new();
        let effect1 = rt.create_effect(|| {});
        let effect2 = effect1.clone();

        assert_eq!(effect1.id(), effect2.id());

        effect1.execute();
        assert_eq!(effect2.run_count(), 2);

        effect1.dispose();
        assert!(effect2.is_disposed());
    }
}
