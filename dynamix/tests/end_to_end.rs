//! End-to-end scenarios: a store, a root reducer and runtime injection.

use dynamix::{
    AnyAction, Store, action_types,
    testing::{CountingReducer, MemoryStore},
};
use std::panic::{self, AssertUnwindSafe};

mod common;
use common::{action, counter, countdown, setup, state};

#[test]
fn test_inject_count_eject() {
    let (dynamix, store) = setup();
    assert_eq!(store.state(), state(&[("a", 1)]));

    dynamix.inject_reducer("b", counter).unwrap();
    store.dispatch(action("INC"));
    store.dispatch(action("INC"));
    assert_eq!(store.state(), state(&[("a", 1), ("b", 2)]));

    dynamix.eject_reducer("b").unwrap();
    store.dispatch(action("INC"));
    assert_eq!(store.state(), state(&[("a", 1)]));
    assert!(!store.state().contains_key("b"));
}

#[test]
fn test_injected_slice_visible_after_announcement() {
    let (dynamix, store) = setup();

    dynamix.inject_reducer("b", countdown).unwrap();

    // The announcement itself is the next transition.
    assert_eq!(store.state().get("b"), Some(&100));
}

#[test]
fn test_dynamic_overlays_static_key() {
    let (dynamix, store) = setup();

    dynamix
        .inject_reducer("a", |s: Option<i64>, _a: &AnyAction| {
            s.map_or(-1, |value| value + 1000)
        })
        .unwrap();

    // The dynamic reducer saw the static value and its result wins.
    assert_eq!(store.state(), state(&[("a", 1001)]));
}

#[test]
fn test_announcements_are_dispatched() {
    let (dynamix, store) = setup();

    dynamix.inject_reducer("b", counter).unwrap();
    dynamix.eject_reducer("b").unwrap();

    assert_eq!(
        store.history(),
        [
            "INIT",
            action_types::REDUCER_INJECTED,
            action_types::REDUCER_EJECTED
        ]
    );
}

#[test]
fn test_ejected_reducer_is_not_invoked() {
    let (dynamix, store) = setup();
    let counting = CountingReducer::new(counter);
    let calls = counting.clone();

    dynamix.inject_reducer("b", counting).unwrap();
    store.dispatch(action("INC"));
    // Announcement + INC
    assert_eq!(calls.count(), 2);

    dynamix.eject_reducer("b").unwrap();
    store.dispatch(action("INC"));
    store.dispatch(action("INC"));
    assert_eq!(calls.count(), 2);
}

#[test]
fn test_reinjection_starts_from_none() {
    let (dynamix, store) = setup();

    dynamix.inject_reducer("b", counter).unwrap();
    store.dispatch(action("INC"));
    store.dispatch(action("INC"));
    dynamix.eject_reducer("b").unwrap();

    dynamix.inject_reducer("b", counter).unwrap();
    store.dispatch(action("INC"));
    assert_eq!(store.state().get("b"), Some(&1));
}

#[test]
fn test_slices_follow_registry_order() {
    let (dynamix, store) = setup();

    dynamix.inject_reducer("z", counter).unwrap();
    dynamix.inject_reducer("c", countdown).unwrap();
    dynamix.inject_reducer("m", counter).unwrap();
    store.dispatch(action("INC"));
    store.dispatch(action("DEC"));

    let snapshot = store.state();
    assert_eq!(snapshot.keys().collect::<Vec<_>>(), ["a", "z", "c", "m"]);
    assert_eq!(snapshot, state(&[("a", 1), ("z", 1), ("c", 99), ("m", 1)]));
    assert_eq!(dynamix.injected_keys(), ["z", "c", "m"]);
}

#[test]
fn test_root_actions_still_reach_root() {
    let (dynamix, store) = setup();
    dynamix.inject_reducer("b", counter).unwrap();

    store.dispatch(action("SET_A").with_payload("42"));
    store.dispatch(action("INC"));

    assert_eq!(store.state(), state(&[("a", 42), ("b", 1)]));
}

#[test]
fn test_preloaded_keys_become_static() {
    common::init_tracing();
    let dynamix = dynamix::create_dynamix();
    let preloaded = state(&[("a", 5), ("b", 3)]);
    let store = dynamix
        .create_store(
            MemoryStore::factory(action("INIT")),
            common::root,
            Some(preloaded),
        )
        .unwrap();

    // Every key present once the store exists belongs to the root reducer.
    let static_keys = dynamix.static_keys().unwrap();
    assert_eq!(static_keys.iter().collect::<Vec<_>>(), ["a", "b"]);

    // A reducer injected over a preloaded key continues from its value.
    dynamix.inject_reducer("b", counter).unwrap();
    assert_eq!(store.state(), state(&[("a", 5), ("b", 3)]));
    store.dispatch(action("INC"));
    assert_eq!(store.state(), state(&[("a", 5), ("b", 4)]));
}

#[test]
fn test_eject_drops_slice_on_announcement() {
    let (dynamix, store) = setup();
    dynamix.inject_reducer("b", counter).unwrap();
    dynamix.inject_reducer("c", countdown).unwrap();

    dynamix.eject_reducer("b").unwrap();

    // The ejection announcement is the transition that removes the slice.
    let snapshot = store.state();
    assert!(!snapshot.contains_key("b"));
    assert_eq!(snapshot, state(&[("a", 1), ("c", 100)]));
}

#[test]
fn test_panicking_reducer_leaves_store_usable() {
    let (dynamix, store) = setup();
    dynamix.inject_reducer("b", counter).unwrap();
    store.dispatch(action("INC"));
    dynamix
        .inject_reducer("fragile", |s: Option<i64>, a: &AnyAction| {
            assert!(!a.is("BOOM"), "fragile reducer failed");
            s.unwrap_or(0)
        })
        .unwrap();
    let before = store.state();

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        store.dispatch(action("BOOM"));
    }));
    assert!(outcome.is_err());
    assert_eq!(store.state(), before);

    store.dispatch(action("INC"));
    assert_eq!(store.state().get("b"), Some(&2));
}
