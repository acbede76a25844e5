//! Error types for Dynamix.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`DynamixError`] - Top-level error type for all Dynamix operations
//! - [`RegistryWarning`] - Non-fatal misuse of the dynamic reducer registry
//! - [`EnhancerError`] - Errors while wrapping a host store

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Dynamix operations.
#[derive(Error, Debug)]
pub enum DynamixError {
    /// The enhancer could not bind to the host store.
    #[error("enhancer error: {0}")]
    Enhancer(#[from] EnhancerError),

    /// A registry operation was ignored.
    #[error("registry warning: {0}")]
    Registry(#[from] RegistryWarning),

    /// A custom error occurred, usually raised by a host store factory.
    #[error(transparent)]
    Custom(BoxError),
}

/// Misuse of the dynamic reducer registry.
///
/// Warnings never abort anything: the operation that produced one left the
/// registry untouched and dispatched no announcement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryWarning {
    /// A reducer was injected under a key that is already registered.
    #[error("Reducer with key [{0}] has already been injected. Injection was ignored.")]
    DuplicateInjection(String),

    /// A key that is not registered was ejected.
    #[error(
        "You attempted to eject reducer with key [{0}] but no such reducer has been injected. Ejection was ignored."
    )]
    UnknownEjection(String),
}

impl RegistryWarning {
    /// The key the ignored operation referred to.
    pub fn key(&self) -> &str {
        match self {
            RegistryWarning::DuplicateInjection(key) | RegistryWarning::UnknownEjection(key) => key,
        }
    }
}

/// Errors that can occur while enhancing a store.
#[derive(Error, Debug)]
pub enum EnhancerError {
    /// The context already wraps a store.
    #[error("dynamix context is already bound to a store")]
    AlreadyInstalled,

    /// The wrapped store factory failed.
    #[error("store creation failed")]
    StoreCreation(#[source] BoxError),
}

// Convenience conversions
impl From<BoxError> for DynamixError {
    fn from(err: BoxError) -> Self {
        DynamixError::Custom(err)
    }
}

impl From<BoxError> for EnhancerError {
    fn from(err: BoxError) -> Self {
        EnhancerError::StoreCreation(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        let duplicate = RegistryWarning::DuplicateInjection("todos".into());
        assert_eq!(
            duplicate.to_string(),
            "Reducer with key [todos] has already been injected. Injection was ignored."
        );

        let unknown = RegistryWarning::UnknownEjection("todos".into());
        assert!(unknown.to_string().starts_with("You attempted to eject reducer with key [todos]"));
        assert_eq!(unknown.key(), "todos");
    }

    #[test]
    fn test_warning_converts_to_top_level() {
        let err: DynamixError = RegistryWarning::UnknownEjection("x".into()).into();
        assert!(matches!(
            err,
            DynamixError::Registry(RegistryWarning::UnknownEjection(_))
        ));
    }

    #[test]
    fn test_box_error_converts_to_store_creation() {
        let boxed: BoxError = "factory exploded".into();
        let err = EnhancerError::from(boxed);
        assert!(matches!(err, EnhancerError::StoreCreation(_)));
        assert_eq!(err.to_string(), "store creation failed");
    }
}
