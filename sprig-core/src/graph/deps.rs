//! Store/Effect Edges
//!
//! The graph is bipartite: stores on one side, effects on the other. Both
//! directions are indexed so that notifying a store and clearing an effect
//! before it re-runs are each a single map lookup.

use std::collections::HashMap;

use indexmap::{IndexMap, IndexSet};

use crate::reactive::{EffectId, StoreId};

/// Bidirectional mapping between stores and the effects that read them.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Store -> effects that read it, in first-read order.
    subscribers: IndexMap<StoreId, IndexSet<EffectId>>,

    /// Effect -> stores it read.
    dependencies: HashMap<EffectId, IndexSet<StoreId>>,
}

impl DependencyGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `effect` depends on `store`.
    ///
    /// Returns `true` if the edge is new.
    pub fn track(&mut self, store: StoreId, effect: EffectId) -> bool {
        let added = self.subscribers.entry(store).or_default().insert(effect);
        self.dependencies.entry(effect).or_default().insert(store);
        added
    }

    /// Effects currently linked to `store`, in insertion order.
    pub fn subscribers(&self, store: StoreId) -> Vec<EffectId> {
        self.subscribers
            .get(&store)
            .map(|effects| effects.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Whether any effect is linked to `store`.
    pub fn has_subscribers(&self, store: StoreId) -> bool {
        self.subscribers
            .get(&store)
            .is_some_and(|effects| !effects.is_empty())
    }

    pub fn subscriber_count(&self, store: StoreId) -> usize {
        self.subscribers.get(&store).map_or(0, IndexSet::len)
    }

    pub fn dependency_count(&self, effect: EffectId) -> usize {
        self.dependencies.get(&effect).map_or(0, IndexSet::len)
    }

    /// Check whether the edge `(store, effect)` exists.
    pub fn contains(&self, store: StoreId, effect: EffectId) -> bool {
        self.subscribers
            .get(&store)
            .is_some_and(|effects| effects.contains(&effect))
    }

    /// Remove every edge leaving `effect`.
    ///
    /// Called before re-running an effect so it re-tracks from scratch.
    /// The effect keeps its slot in the dependency index.
    pub fn clear_effect(&mut self, effect: EffectId) {
        let Some(stores) = self.dependencies.get_mut(&effect) else {
            return;
        };
        for store in stores.drain(..) {
            if let Some(effects) = self.subscribers.get_mut(&store) {
                // shift_remove keeps the remaining subscribers in order
                effects.shift_remove(&effect);
            }
        }
    }

    /// Forget `effect` entirely.
    pub fn remove_effect(&mut self, effect: EffectId) {
        self.clear_effect(effect);
        self.dependencies.remove(&effect);
    }

    /// Forget `store` entirely.
    pub fn remove_store(&mut self, store: StoreId) {
        let Some(effects) = self.subscribers.shift_remove(&store) else {
            return;
        };
        for effect in effects {
            if let Some(stores) = self.dependencies.get_mut(&effect) {
                stores.shift_remove(&store);
            }
        }
    }

    /// Number of stores with at least one recorded entry.
    pub fn store_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.subscribers.values().map(IndexSet::len).sum()
    }
}
