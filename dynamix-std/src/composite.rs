//! The composite reducer.
//!
//! Wraps the root reducer so that on every action:
//!
//! 1. each registered dynamic reducer computes its slice from the previous
//!    value of that slice (`None` on first occurrence), in registry order;
//! 2. the root reducer computes the static slice from a state holding only
//!    the static keys;
//! 3. both results are merged into one state, dynamic slices winning on key
//!    collision.
//!
//! Slices of ejected reducers are neither passed to the root reducer nor
//! carried over, so they disappear on the first reduction after ejection.

use crate::registry::SharedRegistry;
use dynamix_core::{Action, Reducer, RootReducer, State};
use indexmap::IndexSet;
use std::sync::Arc;

/// The immutable set of keys owned by the root reducer.
///
/// Captured once from the host store's state right after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticKeys(Arc<IndexSet<String>>);

impl StaticKeys {
    /// Capture the keys present in `state`.
    pub fn from_state<V>(state: &State<V>) -> Self {
        state.keys().cloned().collect()
    }

    /// Check if `key` belongs to the static shape.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Iterate over static keys in state order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Get the number of static keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the static shape is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<String> for StaticKeys {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

/// Root reducer extended by the dynamic reducers of a [`SharedRegistry`].
pub struct CompositeReducer<V, A> {
    root: RootReducer<V, A>,
    static_keys: StaticKeys,
    registry: SharedRegistry<V, A>,
}

impl<V, A> CompositeReducer<V, A> {
    /// Create a composite reducer over `root`.
    pub fn new(
        root: RootReducer<V, A>,
        static_keys: StaticKeys,
        registry: SharedRegistry<V, A>,
    ) -> Self {
        Self {
            root,
            static_keys,
            registry,
        }
    }

    /// The keys the root reducer is allowed to see.
    pub fn static_keys(&self) -> &StaticKeys {
        &self.static_keys
    }
}

impl<V, A> Reducer<State<V>, A> for CompositeReducer<V, A>
where
    V: Clone + Send + Sync + 'static,
    A: Action,
{
    fn reduce(&self, state: Option<State<V>>, action: &A) -> State<V> {
        let mut state = state.unwrap_or_default();

        // Run dynamic reducers off a snapshot so none of them executes under
        // the registry lock.
        let entries = self.registry.read().snapshot();

        let mut dynamic = State::with_capacity(entries.len());
        for entry in &entries {
            let key = entry.key();
            // A dynamic key shadowing a static one still leaves the static
            // value to the root reducer.
            let previous = if self.static_keys.contains(key) {
                state.get(key).cloned()
            } else {
                state.shift_remove(key)
            };
            dynamic.insert(key.to_owned(), entry.reducer().reduce(previous, action));
        }

        state.retain(|key, _| self.static_keys.contains(key));

        #[cfg(feature = "tracing")]
        tracing::trace!(
            action = %action.action_type(),
            static_slices = state.len(),
            dynamic_slices = dynamic.len(),
            "Reducing state"
        );

        let mut next = self.root.reduce(Some(state), action);
        next.extend(dynamic);
        next
    }
}
