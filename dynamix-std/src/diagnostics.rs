//! Diagnostic sinks for registry warnings.
//!
//! Every ignored inject or eject is reported to a [`DiagnosticSink`] in
//! addition to being returned to the caller. The default sink writes the
//! warning to `tracing` when the `tracing` feature is enabled.

use dynamix_core::RegistryWarning;

/// Receives warnings about ignored registry operations.
///
/// Closures `Fn(&RegistryWarning)` are sinks.
pub trait DiagnosticSink: Send + Sync + 'static {
    /// Called once per ignored operation.
    fn warn(&self, warning: &RegistryWarning);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&RegistryWarning) + Send + Sync + 'static,
{
    fn warn(&self, warning: &RegistryWarning) {
        self(warning)
    }
}

/// A sink that logs warnings through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    name: &'static str,
}

impl TracingSink {
    /// Create a sink labelled with the given context name.
    pub const fn named(name: &'static str) -> Self {
        Self { name }
    }
}

impl DiagnosticSink for TracingSink {
    fn warn(&self, warning: &RegistryWarning) {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!(name = %self.name, key = %warning.key(), "{warning}");
        }

        #[cfg(not(feature = "tracing"))]
        {
            let _ = (self.name, warning); // Suppress unused warnings
        }
    }
}

/// A sink that drops every warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn warn(&self, _warning: &RegistryWarning) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let sink = move |_warning: &RegistryWarning| {
            counter.fetch_add(1, Ordering::SeqCst);
        };

        sink.warn(&RegistryWarning::DuplicateInjection("a".into()));
        sink.warn(&RegistryWarning::UnknownEjection("b".into()));
        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        TracingSink::named("test").warn(&RegistryWarning::UnknownEjection("x".into()));
        SilentSink.warn(&RegistryWarning::UnknownEjection("x".into()));
    }
}
