#![allow(dead_code)]

use dynamix::{AnyAction, Dynamix, State, testing::MemoryStore};
use std::sync::Arc;

pub type TestStore = MemoryStore<i64, AnyAction>;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

pub fn action(action_type: &str) -> AnyAction {
    AnyAction::new(action_type)
}

// ============================================================================
// Reducers
// ============================================================================

/// Root reducer owning `a`, which only `SET_A` changes.
pub fn root(state: Option<State<i64>>, action: &AnyAction) -> State<i64> {
    let mut state = state.unwrap_or_default();
    let a = state.get("a").copied().unwrap_or(1);
    let next = match action.payload.as_deref() {
        Some(value) if action.is("SET_A") => value.parse().unwrap_or(a),
        _ => a,
    };
    state.insert("a".into(), next);
    state
}

/// Counter reacting to `INC`.
pub fn counter(state: Option<i64>, action: &AnyAction) -> i64 {
    let count = state.unwrap_or(0);
    if action.is("INC") { count + 1 } else { count }
}

/// Counter reacting to `DEC`, starting at 100.
pub fn countdown(state: Option<i64>, action: &AnyAction) -> i64 {
    let count = state.unwrap_or(100);
    if action.is("DEC") { count - 1 } else { count }
}

// ============================================================================
// Setup
// ============================================================================

pub fn setup() -> (Dynamix<i64, AnyAction>, Arc<TestStore>) {
    init_tracing();
    let dynamix = dynamix::create_dynamix();
    let store = dynamix
        .create_store(MemoryStore::factory(action("INIT")), root, None)
        .expect("store creation");
    (dynamix, store)
}

pub fn state(entries: &[(&str, i64)]) -> State<i64> {
    entries
        .iter()
        .map(|(key, value)| ((*key).to_owned(), *value))
        .collect()
}
