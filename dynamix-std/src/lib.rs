//! # dynamix-std
//!
//! Standard implementations for the Dynamix reducer composition engine.
//!
//! This crate provides:
//! - **Registry**: [`ReducerRegistry`], the ordered set of dynamic reducers
//! - **Composition**: [`CompositeReducer`], merging static and dynamic slices
//! - **Context**: [`Dynamix`], the enhancer and the inject/eject API
//! - **Diagnostics**: [`DiagnosticSink`] and its standard sinks
//! - **Testing**: an in-memory host store and instrumented helpers

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use dynamix_core;

// Modules
pub mod composite;
pub mod context;
pub mod diagnostics;
pub mod registry;
pub mod testing;

pub use composite::{CompositeReducer, StaticKeys};
pub use context::{Dynamix, DynamixBuilder, DynamixConfig};
pub use diagnostics::{DiagnosticSink, SilentSink, TracingSink};
pub use registry::{ReducerEntry, ReducerRegistry, SharedRegistry};
