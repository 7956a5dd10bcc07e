//! Flush Scheduler
//!
//! The scheduler turns a set of changed stores into the ordered list of
//! effects to run.
//!
//! # Algorithm
//!
//! 1. Visit changed stores in the order they were first queued
//! 2. For each store, append its subscribers in insertion order
//! 3. Skip any effect that is already in the list
//!
//! The result runs each affected effect exactly once, no matter how many of
//! its stores changed. Ordering is fully deterministic.

use indexmap::IndexSet;

use super::deps::DependencyGraph;
use crate::reactive::{EffectId, StoreId};

/// Stores changed while batching, waiting for the outermost batch to end.
#[derive(Debug, Default)]
pub struct UpdateScheduler {
    pending: IndexSet<StoreId>,
}

impl UpdateScheduler {
    /// Create a new empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a changed store. Queuing the same store twice is a no-op.
    pub fn enqueue(&mut self, store: StoreId) -> bool {
        self.pending.insert(store)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Take every queued store, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<StoreId> {
        self.pending.drain(..).collect()
    }

    /// Expand `stores` into the deduplicated, ordered list of effects to run.
    pub fn plan<I>(graph: &DependencyGraph, stores: I) -> Vec<EffectId>
    where
        I: IntoIterator<Item = StoreId>,
    {
        let mut effects = IndexSet::new();
        for store in stores {
            effects.extend(graph.subscribers(store));
        }
        effects.into_iter().collect()
    }
}
