//! Host store contract and enhancer composition.
//!
//! Dynamix does not implement a store. It wraps one: anything that can hand
//! out a state snapshot, process actions synchronously and swap its reducer
//! can be enhanced.

use crate::{
    error::DynamixError,
    reducer::{RootReducer, State},
};
use std::sync::Arc;

/// The host state container.
///
/// Implementations must call the installed reducer with `(current, action)`
/// on every dispatch, one action at a time.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Store` of `{V}` slices driven by `{A}`",
    label = "missing `Store` implementation",
    note = "Stores expose `state`, `dispatch` and `replace_reducer`."
)]
pub trait Store<V, A>: Send + Sync + 'static {
    /// A snapshot of the current state.
    fn state(&self) -> State<V>;

    /// Run the installed reducer for `action` and return the action.
    fn dispatch(&self, action: A) -> A;

    /// Replace the reducer used by subsequent dispatches.
    fn replace_reducer(&self, reducer: RootReducer<V, A>);
}

/// Creates a store from a root reducer and an optional preloaded state.
pub type StoreFactory<V, A, S> =
    Box<dyn FnOnce(RootReducer<V, A>, Option<State<V>>) -> Result<Arc<S>, DynamixError>>;

/// Wraps store creation to add behavior.
///
/// Enhancers compose right to left: `outer.enhance(inner.enhance(base))`
/// runs `outer` last, so it sees the store produced by `inner`.
///
/// Closures `FnOnce(StoreFactory) -> StoreFactory` are enhancers.
pub trait StoreEnhancer<V, A, S> {
    /// Wrap `create` into a new factory.
    fn enhance(self, create: StoreFactory<V, A, S>) -> StoreFactory<V, A, S>;
}

impl<V, A, S, F> StoreEnhancer<V, A, S> for F
where
    F: FnOnce(StoreFactory<V, A, S>) -> StoreFactory<V, A, S>,
{
    fn enhance(self, create: StoreFactory<V, A, S>) -> StoreFactory<V, A, S> {
        self(create)
    }
}
