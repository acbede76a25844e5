//! # dynamix - Runtime Reducer Injection
//!
//! `dynamix` lets independent parts of an application register and remove
//! named slices of state at runtime, without the root reducer knowing about
//! them in advance.
//!
//! The root reducer keeps owning the keys it produced when the store was
//! created (the static slice). Reducers injected later each own one more key
//! (a dynamic slice). On every action, the composite reducer installed by
//! Dynamix computes both and merges them, dynamic slices winning on key
//! collision.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dynamix::prelude::*;
//! use dynamix::testing::MemoryStore;
//!
//! fn root(state: Option<State<i64>>, _action: &AnyAction) -> State<i64> {
//!     let mut state = state.unwrap_or_default();
//!     state.entry("a".into()).or_insert(1);
//!     state
//! }
//!
//! fn counter(state: Option<i64>, action: &AnyAction) -> i64 {
//!     let count = state.unwrap_or(0);
//!     if action.is("INC") { count + 1 } else { count }
//! }
//!
//! let dynamix = dynamix::create_dynamix();
//! let store = dynamix.create_store(MemoryStore::factory(AnyAction::new("INIT")), root, None)?;
//!
//! dynamix.inject_reducer("b", counter)?;
//! store.dispatch(AnyAction::new("INC"));
//! assert_eq!(store.state().get("b"), Some(&1));
//! ```
//!
//! ## Composing with other enhancers
//!
//! Dynamix must be the outermost enhancer so the store it binds to is the
//! one the rest of the application dispatches through:
//!
//! ```rust,ignore
//! let create = dynamix.wrap(middleware.enhance(MemoryStore::factory(init)));
//! let store = create(Arc::new(root), None)?;
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub use dynamix_core::{
    // Actions
    Action,
    Announcement,
    AnyAction,
    // Error types
    BoxError,
    DynamixError,
    EnhancerError,
    // Reducers
    Reducer,
    RegistryWarning,
    RootReducer,
    SharedReducer,
    State,
    // Store contract
    Store,
    StoreEnhancer,
    StoreFactory,
    action_types,
};

// Composition engine
pub use dynamix_std::{
    composite::{CompositeReducer, StaticKeys},
    context::{Dynamix, DynamixBuilder, DynamixConfig},
    registry::{ReducerEntry, ReducerRegistry, SharedRegistry},
};

/// Diagnostic sinks for ignored registry operations.
pub mod diagnostics {
    pub use dynamix_std::diagnostics::{DiagnosticSink, SilentSink, TracingSink};
}

/// Testing utilities.
pub mod testing {
    pub use dynamix_std::testing::{CountingReducer, MemoryStore, RecordingSink};
}

/// Create an unbound Dynamix context with default settings.
///
/// The context is the store enhancer: hand it a store factory through
/// [`Dynamix::wrap`] or [`StoreEnhancer::enhance`], then inject and eject
/// reducers through it.
pub fn create_dynamix<V, A>() -> Dynamix<V, A> {
    Dynamix::new()
}

/// Prelude module - common imports for Dynamix.
///
/// # Usage
///
/// ```rust,ignore
/// use dynamix::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        // Actions
        Action,
        Announcement,
        AnyAction,
        // Context
        Dynamix,
        DynamixError,
        // Reducers
        Reducer,
        RegistryWarning,
        State,
        // Store contract
        Store,
        StoreEnhancer,
        action_types,
    };
}

#[cfg(feature = "macros")]
pub use dynamix_macros::Action;
