//! Actions and the announcements Dynamix dispatches.
//!
//! An action is anything a store can be asked to process. Dynamix only needs
//! two things from an action type: a string tag for diagnostics, and a way to
//! build one from an [`Announcement`] so injection and ejection can notify the
//! host store.

/// Action types dispatched by Dynamix, prefixed by the Dynamix namespace.
///
/// They are fired after injection or ejection. Reducers can listen for them
/// to be notified of changes; the payload carries the affected key.
pub mod action_types {
    /// Dispatched after a dynamic reducer has been injected.
    pub const REDUCER_INJECTED: &str = "@@dynamix/REDUCER_INJECTED";

    /// Dispatched after a dynamic reducer has been ejected.
    pub const REDUCER_EJECTED: &str = "@@dynamix/REDUCER_EJECTED";
}

/// An action processed by a store.
///
/// Actions must be `Send + Sync + 'static` so reducers holding them can be
/// shared across the store and the registry.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone, Debug)]
/// enum CounterAction { Increment, Announce(Announcement) }
///
/// impl Action for CounterAction {
///     fn action_type(&self) -> &str {
///         match self {
///             CounterAction::Increment => "INC",
///             CounterAction::Announce(a) => a.action_type(),
///         }
///     }
/// }
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Action",
    label = "missing `Action` implementation",
    note = "Actions must be `Send + Sync + 'static` and expose an `action_type` tag."
)]
pub trait Action: Send + Sync + 'static {
    /// The tag identifying this action.
    fn action_type(&self) -> &str;
}

/// Notification that the set of dynamic reducers changed.
///
/// Dispatched through the host store right after the registry mutation, so
/// the very next reduction already reflects the new registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Announcement {
    /// A reducer was injected under the given key.
    ReducerInjected(String),
    /// The reducer registered under the given key was ejected.
    ReducerEjected(String),
}

impl Announcement {
    /// Announcement for an injected key.
    pub fn injected(key: impl Into<String>) -> Self {
        Announcement::ReducerInjected(key.into())
    }

    /// Announcement for an ejected key.
    pub fn ejected(key: impl Into<String>) -> Self {
        Announcement::ReducerEjected(key.into())
    }

    /// One of the [`action_types`] constants.
    pub fn action_type(&self) -> &'static str {
        match self {
            Announcement::ReducerInjected(_) => action_types::REDUCER_INJECTED,
            Announcement::ReducerEjected(_) => action_types::REDUCER_EJECTED,
        }
    }

    /// The payload: the key of the affected reducer.
    pub fn key(&self) -> &str {
        match self {
            Announcement::ReducerInjected(key) | Announcement::ReducerEjected(key) => key,
        }
    }

    /// Rebuild an announcement from a `{type, payload}` pair.
    ///
    /// Returns `None` when `action_type` is not a Dynamix action type.
    pub fn from_parts(action_type: &str, payload: impl Into<String>) -> Option<Self> {
        match action_type {
            action_types::REDUCER_INJECTED => Some(Announcement::ReducerInjected(payload.into())),
            action_types::REDUCER_EJECTED => Some(Announcement::ReducerEjected(payload.into())),
            _ => None,
        }
    }
}

impl Action for Announcement {
    fn action_type(&self) -> &str {
        Announcement::action_type(self)
    }
}

/// A loosely typed `{type, payload}` action.
///
/// Useful when the set of actions is open-ended, e.g. when independently
/// loaded modules bring their own action tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AnyAction {
    /// The action tag.
    pub action_type: String,
    /// Optional payload.
    pub payload: Option<String>,
}

impl AnyAction {
    /// Create an action without payload.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            payload: None,
        }
    }

    /// Set the payload.
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Check the action tag.
    pub fn is(&self, action_type: &str) -> bool {
        self.action_type == action_type
    }

    /// Interpret this action as a Dynamix announcement.
    pub fn announcement(&self) -> Option<Announcement> {
        let payload = self.payload.as_deref()?;
        Announcement::from_parts(&self.action_type, payload)
    }
}

impl Action for AnyAction {
    fn action_type(&self) -> &str {
        &self.action_type
    }
}

impl From<Announcement> for AnyAction {
    fn from(announcement: Announcement) -> Self {
        let action_type = announcement.action_type();
        let key = match announcement {
            Announcement::ReducerInjected(key) | Announcement::ReducerEjected(key) => key,
        };
        AnyAction::new(action_type).with_payload(key)
    }
}
