//! Reactive Primitives
//!
//! This module implements the reactive system: stores, effects and
//! batching, all scoped to an explicit [`Runtime`].
//!
//! # Concepts
//!
//! ## Stores
//!
//! A Store is a container for mutable state. When a store's value is read
//! while an effect is running, the store registers that effect as a
//! dependent. When the store's value changes, all dependents are re-run.
//!
//! ## Effects
//!
//! An Effect is a side-effecting computation that runs whenever its
//! dependencies change. The element builder uses effects to keep DOM
//! children in sync with the stores they read.
//!
//! ## Batching
//!
//! [`Runtime::batch`] defers effect re-runs until the closure returns, then
//! runs each affected effect once. Batches nest; only the outermost one
//! flushes.
//!
//! # Implementation Notes
//!
//! Tracking is implicit: a single active-effect register, owned by the
//! runtime, names the effect currently executing. `Store::get` is the same
//! call inside and outside an effect; only the register decides whether a
//! dependency is recorded.

mod context;
mod effect;
mod runtime;
mod store;
mod subscriber;

pub use context::{ActiveEffect, ActiveScope};
pub use effect::{Effect, MAX_RERUNS};
pub use runtime::Runtime;
pub use store::{SameValue, Store};
pub use subscriber::{EffectId, StoreId};
