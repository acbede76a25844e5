//! # Dynamix Context
//!
//! [`Dynamix`] owns everything the composition engine shares between the
//! store it wraps and the code that injects reducers at runtime:
//!
//! - the [`SharedRegistry`] of dynamic reducers,
//! - the [`StaticKeys`] captured from the store when it was wrapped,
//! - the dispatch function used to announce registry changes.
//!
//! A context is created unbound. It binds to exactly one store, inside the
//! factory returned by [`Dynamix::wrap`]. Until then, injection still
//! registers reducers but announces nothing.
//!
//! # Example
//!
//! ```rust,ignore
//! let dynamix = Dynamix::<i64, AnyAction>::new();
//! let store = dynamix.create_store(MemoryStore::factory(AnyAction::new("INIT")), root, None)?;
//!
//! dynamix.inject_reducer("counter", counter)?;
//! store.dispatch(AnyAction::new("INC"));
//! dynamix.eject_reducer("counter")?;
//! ```

use crate::{
    composite::{CompositeReducer, StaticKeys},
    diagnostics::{DiagnosticSink, TracingSink},
    registry::SharedRegistry,
};
use dynamix_core::{
    Action, Announcement, DynamixError, EnhancerError, Reducer, RegistryWarning, RootReducer,
    State, Store, StoreEnhancer, StoreFactory,
};
use std::{
    marker::PhantomData,
    sync::{Arc, OnceLock, Weak},
};

type DispatchFn<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Settings of a [`Dynamix`] context.
#[derive(Debug, Clone)]
pub struct DynamixConfig {
    /// Label attached to log records.
    pub name: &'static str,
    /// Whether inject and eject dispatch an [`Announcement`].
    pub announcements: bool,
}

impl Default for DynamixConfig {
    fn default() -> Self {
        Self {
            name: "dynamix",
            announcements: true,
        }
    }
}

/// Builder for a [`Dynamix`] context.
///
/// # Example
/// ```ignore
/// let dynamix: Dynamix<Value, AppAction> = Dynamix::builder()
///     .name("app")
///     .sink(|warning: &RegistryWarning| eprintln!("{warning}"))
///     .build();
/// ```
pub struct DynamixBuilder<V, A> {
    config: DynamixConfig,
    sink: Option<Box<dyn DiagnosticSink>>,
    _marker: PhantomData<fn() -> (V, A)>,
}

impl<V, A> DynamixBuilder<V, A> {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            config: DynamixConfig::default(),
            sink: None,
            _marker: PhantomData,
        }
    }

    /// Set the label used in log records.
    pub fn name(mut self, name: &'static str) -> Self {
        self.config.name = name;
        self
    }

    /// Enable or disable announcement dispatch.
    pub fn announcements(mut self, enabled: bool) -> Self {
        self.config.announcements = enabled;
        self
    }

    /// Set the sink receiving registry warnings.
    ///
    /// Defaults to a [`TracingSink`].
    pub fn sink<S: DiagnosticSink>(mut self, sink: S) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Build the context.
    pub fn build(self) -> Dynamix<V, A> {
        let sink = self
            .sink
            .unwrap_or_else(|| Box::new(TracingSink::named(self.config.name)));
        Dynamix {
            inner: Arc::new(Inner {
                config: self.config,
                sink,
                registry: SharedRegistry::new(),
                binding: OnceLock::new(),
            }),
        }
    }
}

impl<V, A> Default for DynamixBuilder<V, A> {
    fn default() -> Self {
        Self::new()
    }
}

struct Binding<A> {
    dispatch: DispatchFn<A>,
    static_keys: StaticKeys,
}

struct Inner<V, A> {
    config: DynamixConfig,
    sink: Box<dyn DiagnosticSink>,
    registry: SharedRegistry<V, A>,
    binding: OnceLock<Binding<A>>,
}

/// The reducer composition context.
///
/// Cloning is cheap; clones share the registry and the binding.
pub struct Dynamix<V, A> {
    inner: Arc<Inner<V, A>>,
}

impl<V, A> Clone for Dynamix<V, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, A> Dynamix<V, A> {
    /// Create an unbound context with default settings.
    pub fn new() -> Self {
        DynamixBuilder::new().build()
    }

    /// Start configuring a context.
    pub fn builder() -> DynamixBuilder<V, A> {
        DynamixBuilder::new()
    }

    /// The context settings.
    pub fn config(&self) -> &DynamixConfig {
        &self.inner.config
    }

    /// Check if the context wraps a store.
    pub fn is_bound(&self) -> bool {
        self.inner.binding.get().is_some()
    }

    /// The keys owned by the root reducer, once bound.
    pub fn static_keys(&self) -> Option<StaticKeys> {
        self.inner.binding.get().map(|b| b.static_keys.clone())
    }

    /// Check if a reducer is injected under `key`.
    pub fn is_injected(&self, key: &str) -> bool {
        self.inner.registry.read().contains(key)
    }

    /// Injected keys in registry order.
    pub fn injected_keys(&self) -> Vec<String> {
        self.inner.registry.read().keys().map(str::to_owned).collect()
    }

    /// Get the number of injected reducers.
    pub fn len(&self) -> usize {
        self.inner.registry.read().len()
    }

    /// Check if no reducer is injected.
    pub fn is_empty(&self) -> bool {
        self.inner.registry.read().is_empty()
    }
}

impl<V, A> Default for Dynamix<V, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, A> Dynamix<V, A>
where
    V: Clone + Send + Sync + 'static,
    A: Action + From<Announcement>,
{
    /// Wrap a store factory.
    ///
    /// The returned factory creates the store with the original root reducer,
    /// binds this context to it, then installs a [`CompositeReducer`] over the
    /// root reducer. It fails with [`EnhancerError::AlreadyInstalled`] when
    /// the context is already bound.
    pub fn wrap<S>(&self, create: StoreFactory<V, A, S>) -> StoreFactory<V, A, S>
    where
        S: Store<V, A>,
    {
        let dynamix = self.clone();
        Box::new(
            move |root: RootReducer<V, A>,
                  preloaded: Option<State<V>>|
                  -> Result<Arc<S>, DynamixError> {
                if dynamix.is_bound() {
                    return Err(EnhancerError::AlreadyInstalled.into());
                }

                let store = create(Arc::clone(&root), preloaded)?;
                let static_keys = dynamix.bind(&store)?;

                let composite =
                    CompositeReducer::new(root, static_keys, dynamix.inner.registry.clone());
                store.replace_reducer(Arc::new(composite));

                Ok(store)
            },
        )
    }

    /// Create a store through `create`, enhanced by this context.
    pub fn create_store<S, R>(
        &self,
        create: StoreFactory<V, A, S>,
        root: R,
        preloaded: Option<State<V>>,
    ) -> Result<Arc<S>, DynamixError>
    where
        S: Store<V, A>,
        R: Reducer<State<V>, A>,
    {
        let root: RootReducer<V, A> = Arc::new(root);
        self.wrap(create)(root, preloaded)
    }

    /// Add a dynamic reducer computing the slice under `key`.
    ///
    /// On success the reducer is appended to the registry and a
    /// `REDUCER_INJECTED` announcement is dispatched. If `key` is already
    /// injected nothing changes, nothing is dispatched and the warning is
    /// reported to the sink and returned.
    pub fn inject_reducer<R>(
        &self,
        key: impl Into<String>,
        reducer: R,
    ) -> Result<(), RegistryWarning>
    where
        R: Reducer<V, A>,
    {
        let key = key.into();
        // The write guard must be released before announcing: the store
        // reduces the announcement synchronously.
        let injected = self
            .inner
            .registry
            .write()
            .inject(key.clone(), Arc::new(reducer));
        if let Err(warning) = injected {
            self.inner.sink.warn(&warning);
            return Err(warning);
        }

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.inner.config.name, key = %key, "Reducer injected");
        }

        self.announce(Announcement::ReducerInjected(key));
        Ok(())
    }

    /// Remove the dynamic reducer registered under `key`.
    ///
    /// On success a `REDUCER_EJECTED` announcement is dispatched; reducing it
    /// already drops the slice from the state. Unknown keys are reported like
    /// in [`inject_reducer`](Self::inject_reducer).
    pub fn eject_reducer(&self, key: &str) -> Result<(), RegistryWarning> {
        let ejected = self.inner.registry.write().eject(key);
        if let Err(warning) = ejected {
            self.inner.sink.warn(&warning);
            return Err(warning);
        }

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(name = %self.inner.config.name, key = %key, "Reducer ejected");
        }

        self.announce(Announcement::ReducerEjected(key.to_owned()));
        Ok(())
    }

    fn bind<S: Store<V, A>>(&self, store: &Arc<S>) -> Result<StaticKeys, EnhancerError> {
        // Weak so the store -> composite -> context -> dispatch chain does
        // not keep the store alive.
        let handle: Weak<S> = Arc::downgrade(store);
        #[cfg(feature = "tracing")]
        let name = self.inner.config.name;
        let dispatch: DispatchFn<A> = Arc::new(move |action: A| match handle.upgrade() {
            Some(store) => {
                store.dispatch(action);
            }
            None => {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(
                        name = %name,
                        action = %action.action_type(),
                        "Store dropped, action discarded"
                    );
                }
            }
        });

        let static_keys = StaticKeys::from_state(&store.state());

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                name = %self.inner.config.name,
                static_keys = static_keys.len(),
                "Bound to store"
            );
        }

        self.inner
            .binding
            .set(Binding {
                dispatch,
                static_keys: static_keys.clone(),
            })
            .map_err(|_| EnhancerError::AlreadyInstalled)?;
        Ok(static_keys)
    }

    fn announce(&self, announcement: Announcement) {
        if !self.inner.config.announcements {
            return;
        }
        match self.inner.binding.get() {
            Some(binding) => (binding.dispatch)(A::from(announcement)),
            None => {
                #[cfg(feature = "tracing")]
                {
                    tracing::debug!(
                        name = %self.inner.config.name,
                        action = %announcement.action_type(),
                        key = %announcement.key(),
                        "Not bound to a store, announcement skipped"
                    );
                }
            }
        }
    }
}

impl<V, A, S> StoreEnhancer<V, A, S> for Dynamix<V, A>
where
    V: Clone + Send + Sync + 'static,
    A: Action + From<Announcement>,
    S: Store<V, A>,
{
    fn enhance(self, create: StoreFactory<V, A, S>) -> StoreFactory<V, A, S> {
        self.wrap(create)
    }
}
