//! Ordered registry of dynamic reducers.
//!
//! Entries keep their insertion order, which is the order dynamic slices are
//! computed in. Keys are unique; the uniqueness check happens before any
//! mutation, so a rejected operation never changes the registry.

use dynamix_core::{Reducer, RegistryWarning, SharedReducer};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A registered dynamic reducer.
pub struct ReducerEntry<V, A> {
    key: String,
    reducer: SharedReducer<V, A>,
}

impl<V, A> ReducerEntry<V, A> {
    /// Create a new entry.
    pub fn new<R: Reducer<V, A>>(key: impl Into<String>, reducer: R) -> Self {
        Self::shared(key, Arc::new(reducer))
    }

    /// Create a new entry from an already shared reducer.
    pub fn shared(key: impl Into<String>, reducer: SharedReducer<V, A>) -> Self {
        Self {
            key: key.into(),
            reducer,
        }
    }

    /// The slice key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The slice reducer.
    pub fn reducer(&self) -> &dyn Reducer<V, A> {
        &*self.reducer
    }
}

impl<V, A> Clone for ReducerEntry<V, A> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            reducer: Arc::clone(&self.reducer),
        }
    }
}

impl<V, A> std::fmt::Debug for ReducerEntry<V, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReducerEntry").field("key", &self.key).finish_non_exhaustive()
    }
}

/// The mutable set of dynamic reducers.
pub struct ReducerRegistry<V, A> {
    entries: Vec<ReducerEntry<V, A>>,
}

impl<V, A> ReducerRegistry<V, A> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a reducer under `key`.
    ///
    /// Fails without touching the registry if `key` is already present; the
    /// previously registered reducer stays in place.
    pub fn inject(
        &mut self,
        key: impl Into<String>,
        reducer: SharedReducer<V, A>,
    ) -> Result<(), RegistryWarning> {
        let key = key.into();
        if self.contains(&key) {
            return Err(RegistryWarning::DuplicateInjection(key));
        }
        self.entries.push(ReducerEntry::shared(key, reducer));
        Ok(())
    }

    /// Remove the reducer registered under `key`, returning it.
    pub fn eject(&mut self, key: &str) -> Result<SharedReducer<V, A>, RegistryWarning> {
        let Some(index) = self.position(key) else {
            return Err(RegistryWarning::UnknownEjection(key.to_owned()));
        };
        Ok(self.entries.remove(index).reducer)
    }

    /// Check if a reducer is registered under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Look up the reducer registered under `key`.
    pub fn get(&self, key: &str) -> Option<&dyn Reducer<V, A>> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.reducer())
    }

    /// Iterate over registered keys in registry order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key())
    }

    /// Iterate over all entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &ReducerEntry<V, A>> {
        self.entries.iter()
    }

    /// Clone the entries so they can be run without holding a lock on the
    /// registry. Cloning only bumps reference counts.
    pub fn snapshot(&self) -> Vec<ReducerEntry<V, A>> {
        self.entries.clone()
    }

    /// Get the number of registered reducers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }
}

impl<V, A> Default for ReducerRegistry<V, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// A registry shared between the composite reducer and the inject/eject API.
///
/// Guards must not be held across a dispatch: the composite reducer takes a
/// read guard on every reduction.
pub struct SharedRegistry<V, A>(Arc<RwLock<ReducerRegistry<V, A>>>);

impl<V, A> SharedRegistry<V, A> {
    /// Create a new empty shared registry.
    pub fn new() -> Self {
        Self(Arc::new(RwLock::new(ReducerRegistry::new())))
    }

    /// Lock for reading. A poisoned lock is recovered: registry mutations
    /// cannot panic halfway through.
    pub fn read(&self) -> RwLockReadGuard<'_, ReducerRegistry<V, A>> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Lock for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, ReducerRegistry<V, A>> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V, A> Clone for SharedRegistry<V, A> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<V, A> Default for SharedRegistry<V, A> {
    fn default() -> Self {
        Self::new()
    }
}
