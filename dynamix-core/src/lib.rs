//! # dynamix-core
//!
//! Core traits for the Dynamix reducer composition engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! feature modules that only need to describe their reducers and actions,
//! without pulling in the composition engine from `dynamix-std`.
//!
//! # Vocabulary
//!
//! ## Reducer ([`Reducer`])
//!
//! A transition function `(previous slice or None, action) -> next slice`.
//! The root reducer produces the whole [`State`]; dynamic reducers each
//! produce one named slice of it.
//!
//! ## Action ([`Action`])
//!
//! Anything a store processes. Dynamix dispatches its own [`Announcement`]s
//! when the set of dynamic reducers changes, so action types used with
//! Dynamix must be constructible from one.
//!
//! ## Store ([`Store`])
//!
//! The host container contract: read state, dispatch, replace the reducer.
//! Stores are created by a [`StoreFactory`], which [`StoreEnhancer`]s wrap.
//!
//! # Error Types
//!
//! - [`DynamixError`] - Top-level error type
//! - [`RegistryWarning`] - Ignored registry operations
//! - [`EnhancerError`] - Store wrapping errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod action;
mod error;
mod reducer;
mod store;

// Re-exports
pub use action::{Action, Announcement, AnyAction, action_types};
pub use error::{BoxError, DynamixError, EnhancerError, RegistryWarning};
pub use reducer::{Reducer, RootReducer, SharedReducer, State};
pub use store::{Store, StoreEnhancer, StoreFactory};
