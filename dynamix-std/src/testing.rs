//! Testing utilities for Dynamix.
//!
//! This module provides a minimal host store and a few instrumented helpers
//! so reducers and contexts can be exercised without a real application.
//!
//! # Features
//!
//! - [`MemoryStore`]: An in-memory store honoring the [`Store`] contract
//! - [`RecordingSink`]: A diagnostic sink that records every warning
//! - [`CountingReducer`]: A reducer wrapper that counts invocations

use crate::diagnostics::DiagnosticSink;
use dynamix_core::{
    Action, DynamixError, Reducer, RegistryWarning, RootReducer, State, Store, StoreFactory,
};
use std::sync::{
    Arc, Mutex, PoisonError, RwLock,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

// ============================================================================
// Memory Store
// ============================================================================

/// A synchronous in-memory store.
///
/// Creation reduces the preloaded state (or `None`) with the init action.
/// Every dispatched action type is recorded, in order, for inspection.
///
/// # Example
///
/// ```rust,ignore
/// let store = MemoryStore::create(Arc::new(root), None, AnyAction::new("INIT"));
/// store.dispatch(AnyAction::new("INC"));
/// assert_eq!(store.history(), ["INIT", "INC"]);
/// ```
pub struct MemoryStore<V, A> {
    state: Mutex<State<V>>,
    reducer: RwLock<RootReducer<V, A>>,
    history: Mutex<Vec<String>>,
    dispatching: AtomicBool,
}

impl<V, A> MemoryStore<V, A>
where
    V: Clone + Send + Sync + 'static,
    A: Action,
{
    /// Create a store and reduce the init action.
    pub fn create(reducer: RootReducer<V, A>, preloaded: Option<State<V>>, init: A) -> Arc<Self> {
        let state = reducer.reduce(preloaded, &init);
        Arc::new(Self {
            state: Mutex::new(state),
            reducer: RwLock::new(reducer),
            history: Mutex::new(vec![init.action_type().to_owned()]),
            dispatching: AtomicBool::new(false),
        })
    }

    /// A factory creating memory stores with the given init action.
    pub fn factory(init: A) -> StoreFactory<V, A, Self> {
        Box::new(
            move |reducer: RootReducer<V, A>,
                  preloaded: Option<State<V>>|
                  -> Result<Arc<Self>, DynamixError> {
                Ok(Self::create(reducer, preloaded, init))
            },
        )
    }

    /// Action types dispatched so far, init action first.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl<V, A> Store<V, A> for MemoryStore<V, A>
where
    V: Clone + Send + Sync + 'static,
    A: Action,
{
    fn state(&self) -> State<V> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// # Panics
    ///
    /// Panics when called from inside a reducer, or when the reducer panics.
    /// A panicking reducer leaves the state as it was before the action.
    fn dispatch(&self, action: A) -> A {
        let _guard = DispatchGuard::enter(&self.dispatching);

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(action = %action.action_type(), "Dispatching action");
        }

        let reducer = self
            .reducer
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let next = reducer.reduce(Some(state.clone()), &action);
        *state = next;
        drop(state);

        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(action.action_type().to_owned());
        action
    }

    fn replace_reducer(&self, reducer: RootReducer<V, A>) {
        *self.reducer.write().unwrap_or_else(PoisonError::into_inner) = reducer;
    }
}

/// Marks a dispatch in progress; cleared on drop, unwinding included.
struct DispatchGuard<'a>(&'a AtomicBool);

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a AtomicBool) -> Self {
        assert!(
            !flag.swap(true, Ordering::AcqRel),
            "reducers may not dispatch actions"
        );
        Self(flag)
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ============================================================================
// Recording Sink
// ============================================================================

/// A sink that records all warnings it receives.
///
/// # Example
///
/// ```rust,ignore
/// let sink = RecordingSink::new();
/// let dynamix = Dynamix::builder().sink(sink.clone()).build();
///
/// let _ = dynamix.eject_reducer("missing");
/// assert_eq!(sink.count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct RecordingSink {
    warnings: Arc<Mutex<Vec<RegistryWarning>>>,
}

impl RecordingSink {
    /// Create a new empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a clone of the recorded warnings.
    pub fn warnings(&self) -> Vec<RegistryWarning> {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Get the number of recorded warnings.
    pub fn count(&self) -> usize {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Clear all recorded warnings.
    pub fn clear(&self) {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn warn(&self, warning: &RegistryWarning) {
        self.warnings.lock().unwrap_or_else(PoisonError::into_inner).push(warning.clone());
    }
}

// ============================================================================
// Counting Reducer
// ============================================================================

/// A reducer wrapper that counts invocations.
///
/// # Example
///
/// ```rust,ignore
/// let counting = CountingReducer::new(counter);
/// let calls = counting.clone();
///
/// dynamix.inject_reducer("counter", counting)?;
/// store.dispatch(AnyAction::new("INC"));
///
/// assert_eq!(calls.count(), 2); // announcement + INC
/// ```
pub struct CountingReducer<R> {
    inner: Arc<R>,
    count: Arc<AtomicUsize>,
}

impl<R> CountingReducer<R> {
    /// Wrap `reducer`.
    pub fn new(reducer: R) -> Self {
        Self {
            inner: Arc::new(reducer),
            count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Get the number of invocations so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Reset the counter.
    pub fn reset(&self) {
        self.count.store(0, Ordering::SeqCst);
    }
}

impl<R> Clone for CountingReducer<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            count: self.count.clone(),
        }
    }
}

impl<S, A, R> Reducer<S, A> for CountingReducer<R>
where
    R: Reducer<S, A>,
{
    fn reduce(&self, state: Option<S>, action: &A) -> S {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.reduce(state, action)
    }
}
