//! Registry behavior and the state-shape guarantees of the composite reducer.

use dynamix::{
    AnyAction, CompositeReducer, Dynamix, Reducer, RegistryWarning, RootReducer, SharedRegistry,
    StaticKeys, Store, action_types, testing::RecordingSink,
};
use proptest::prelude::*;
use std::{collections::BTreeSet, sync::Arc};

mod common;
use common::{action, counter, countdown, setup, state};

#[test]
fn test_duplicate_injection_keeps_first_reducer() {
    let (dynamix, store) = setup();

    dynamix.inject_reducer("b", counter).unwrap();
    let result = dynamix.inject_reducer("b", countdown);

    assert_eq!(result, Err(RegistryWarning::DuplicateInjection("b".into())));
    assert_eq!(dynamix.len(), 1);
    store.dispatch(action("INC"));
    assert_eq!(store.state().get("b"), Some(&1));
}

#[test]
fn test_duplicate_injection_is_not_announced() {
    let (dynamix, store) = setup();

    dynamix.inject_reducer("b", counter).unwrap();
    let _ = dynamix.inject_reducer("b", counter);

    let injected = store
        .history()
        .iter()
        .filter(|t| *t == action_types::REDUCER_INJECTED)
        .count();
    assert_eq!(injected, 1);
}

#[test]
fn test_unknown_ejection_is_noop() {
    let (dynamix, store) = setup();
    dynamix.inject_reducer("b", counter).unwrap();
    let before = store.history().len();

    let result = dynamix.eject_reducer("missing");

    assert_eq!(result, Err(RegistryWarning::UnknownEjection("missing".into())));
    assert_eq!(dynamix.len(), 1);
    assert_eq!(store.history().len(), before);
}

#[test]
fn test_warnings_reach_custom_sink() {
    common::init_tracing();
    let sink = RecordingSink::new();
    let dynamix: Dynamix<i64, AnyAction> = Dynamix::builder()
        .name("sink-test")
        .sink(sink.clone())
        .build();

    let _ = dynamix.eject_reducer("nothing");
    dynamix.inject_reducer("x", counter).unwrap();
    let _ = dynamix.inject_reducer("x", counter);

    assert_eq!(sink.count(), 2);
    assert_eq!(sink.warnings()[0].key(), "nothing");
    assert!(matches!(
        sink.warnings()[1],
        RegistryWarning::DuplicateInjection(_)
    ));
}

#[test]
fn test_ignored_action_keeps_content() {
    let (dynamix, store) = setup();
    dynamix.inject_reducer("b", counter).unwrap();
    dynamix.inject_reducer("c", countdown).unwrap();
    store.dispatch(action("INC"));

    let before = store.state();
    store.dispatch(action("UNKNOWN"));
    assert_eq!(store.state(), before);
}

fn composite_over(registry: &SharedRegistry<i64, AnyAction>) -> CompositeReducer<i64, AnyAction> {
    let root: RootReducer<i64, AnyAction> = Arc::new(common::root);
    CompositeReducer::new(root, StaticKeys::from_iter(["a".to_owned()]), registry.clone())
}

fn key_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[b-z][a-z0-9_]{0,8}", 0..12)
}

proptest! {
    #[test]
    fn prop_distinct_keys_all_appear(keys in key_strategy()) {
        let registry: SharedRegistry<i64, AnyAction> = SharedRegistry::new();
        for key in &keys {
            registry.write().inject(key.clone(), Arc::new(counter)).unwrap();
        }

        let next = composite_over(&registry).reduce(Some(state(&[("a", 1)])), &action("INC"));

        for key in &keys {
            prop_assert_eq!(next.get(key.as_str()), Some(&1));
        }
        prop_assert_eq!(next.len(), keys.len() + 1);
    }

    #[test]
    fn prop_static_partition_matches_root(
        keys in key_strategy(),
        stale in key_strategy(),
        a in -1000i64..1000,
    ) {
        let registry: SharedRegistry<i64, AnyAction> = SharedRegistry::new();
        for key in &keys {
            registry.write().inject(key.clone(), Arc::new(countdown)).unwrap();
        }

        let mut input = state(&[("a", a)]);
        for key in &stale {
            input.insert(key.clone(), 7);
        }
        let set_a = action("SET_A").with_payload((a * 2).to_string());
        let next = composite_over(&registry).reduce(Some(input), &set_a);

        let expected = common::root(Some(state(&[("a", a)])), &set_a);
        prop_assert_eq!(next.get("a"), expected.get("a"));
        // Stale slices of unregistered keys are gone.
        for key in stale.difference(&keys) {
            prop_assert!(!next.contains_key(key.as_str()));
        }
    }
}
