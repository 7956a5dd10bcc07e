//! Dependency Graph
//!
//! This module implements the graph that links stores to the effects that
//! read them.
//!
//! # Overview
//!
//! The graph is bipartite:
//!
//! - Sources are stores, identified by [`StoreId`](crate::reactive::StoreId)
//! - Sinks are effects, identified by [`EffectId`](crate::reactive::EffectId)
//! - An edge `(store, effect)` means the effect read the store while active
//!
//! When a store changes, its subscribers are looked up and run (or queued if
//! a batch is open). The scheduler turns queued stores into a deduplicated
//! run list.
//!
//! # Design Decisions
//!
//! 1. The graph stores only IDs. It never owns effects or stores, so it
//!    cannot keep a dropped DOM subtree alive.
//!
//! 2. Both directions are indexed: store -> effects for notification and
//!    effect -> stores for clearing stale edges before a re-run.
//!
//! 3. Subscriber sets preserve insertion order, which fixes notification
//!    order for a given store.

mod deps;
mod scheduler;

pub use deps::DependencyGraph;
pub use scheduler::UpdateScheduler;
