//! # Transition Functions (Reducer)
//!
//! A reducer maps the previous value of a slice (or `None` the first time the
//! slice is computed) and an action to the next value of that slice.
//!
//! Plain functions and closures of shape `Fn(Option<S>, &A) -> S` are
//! reducers through a blanket implementation, so most code never implements
//! [`Reducer`] by hand.

use indexmap::IndexMap;
use std::sync::Arc;

/// A state object: slice key to slice value, in insertion order.
pub type State<V> = IndexMap<String, V>;

/// A transition function from `(previous, action)` to the next value.
///
/// # Example
///
/// ```rust,ignore
/// fn counter(state: Option<i64>, action: &AnyAction) -> i64 {
///     let count = state.unwrap_or(0);
///     if action.is("INC") { count + 1 } else { count }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `Reducer<{S}, {A}>`",
    label = "missing `Reducer` implementation",
    note = "Reducers are `Fn(Option<{S}>, &{A}) -> {S}` functions or implement `reduce` directly."
)]
pub trait Reducer<S, A>: Send + Sync + 'static {
    /// Compute the next value.
    fn reduce(&self, state: Option<S>, action: &A) -> S;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(Option<S>, &A) -> S + Send + Sync + 'static,
{
    fn reduce(&self, state: Option<S>, action: &A) -> S {
        self(state, action)
    }
}

/// A reference-counted, type-erased reducer.
pub type SharedReducer<S, A> = Arc<dyn Reducer<S, A>>;

/// The shape of a root reducer: whole state in, whole state out.
pub type RootReducer<V, A> = SharedReducer<State<V>, A>;

#[cfg(test)]
mod tests {
    use super::*;

    fn double(state: Option<u32>, _action: &()) -> u32 {
        state.unwrap_or(1) * 2
    }

    #[test]
    fn test_fn_is_reducer() {
        assert_eq!(double.reduce(None, &()), 2);
        assert_eq!(double.reduce(Some(4), &()), 8);
    }

    #[test]
    fn test_shared_reducer_dispatches_dynamically() {
        let shared: SharedReducer<u32, ()> = Arc::new(double);
        let cloned = Arc::clone(&shared);
        assert_eq!(cloned.reduce(Some(3), &()), 6);
    }

    #[test]
    fn test_closure_is_reducer() {
        let offset = 10;
        let add = move |state: Option<u32>, _action: &()| state.unwrap_or(0) + offset;
        assert_eq!(add.reduce(Some(5), &()), 15);
    }
}
