//! End-to-end tests for phase sets built with default and changed phase names

use phase_actions_core::fsa::{is_error, is_fsa};
use phase_actions_core::prelude::*;

const TYPE: &str = "TYPE";

fn foobar() -> Value {
    json!({ "foo": "bar" })
}

fn increment() -> PhaseCreators {
    PhaseCreators::new()
        .with_payload_creator(|args| Ok(args.first().and_then(Value::as_i64).map(|n| json!(n + 1))))
}

#[test]
fn test_returns_a_standard_message() {
    let actions = PhaseSetFactory::new().create(TYPE, None);
    let message = actions.invoke(&[foobar()]).unwrap();
    assert!(is_fsa(&message.into_value()));
}

#[test]
fn test_displays_the_base_type() {
    let actions = PhaseSetFactory::new().create(TYPE, None);
    assert_eq!(actions.to_string(), TYPE);
    assert_eq!(actions.base().to_string(), TYPE);
}

#[test]
fn test_exactly_three_phase_keys() {
    for base in ["TYPE", "fetch_user", "a"] {
        let actions = PhaseSetFactory::new().create(base, None);
        assert_eq!(actions.to_string(), base);
        assert_eq!(actions.len(), 3);
        assert_eq!(
            actions.keys().collect::<Vec<_>>(),
            vec!["start", "success", "error"]
        );
    }
}

#[test]
fn test_creates_default_phase_types() {
    let actions = PhaseSetFactory::new().create(TYPE, None);

    assert_eq!(actions["start"].to_string(), "TYPE_START");
    assert_eq!(actions["success"].to_string(), "TYPE_SUCCESS");
    assert_eq!(actions["error"].to_string(), "TYPE_ERROR");
}

#[test]
fn test_base_name_is_upper_cased_in_phase_types() {
    let actions = PhaseSetFactory::new().create("fetchUser", None);

    assert_eq!(actions.to_string(), "fetchUser");
    assert_eq!(actions["start"].to_string(), "FETCHUSER_START");
}

#[test]
fn test_each_descriptor_returns_type_and_payload_only() {
    let actions = PhaseSetFactory::new().create(TYPE, None);

    let base = actions.invoke(&[foobar()]).unwrap();
    assert_eq!(base.into_value(), json!({"type": "TYPE", "payload": {"foo": "bar"}}));

    for (key, descriptor) in actions.iter() {
        let message = descriptor.invoke(&[foobar()]).unwrap().into_value();
        assert!(is_fsa(&message), "{key} is not a standard message");
        assert!(!is_error(&message));
        assert_eq!(
            message,
            json!({"type": descriptor.to_string(), "payload": {"foo": "bar"}})
        );
    }
}

#[test]
fn test_uses_action_options() {
    let options = ActionOptions::new()
        .phase("start", PhaseCreators::new().with_payload_creator(|args| Ok(args.first().cloned())))
        .phase("success", PhaseCreators::new().with_payload_creator(|args| Ok(args.first().cloned())))
        .phase("error", PhaseCreators::new().with_payload_creator(|args| Ok(args.first().cloned())));
    let actions = PhaseSetFactory::new().create(TYPE, Some(&options));

    for (_, descriptor) in actions.iter() {
        let message = descriptor.invoke(&[foobar()]).unwrap();
        assert_eq!(message.payload, Some(foobar()));
        assert!(is_fsa(&message.into_value()));
    }
}

#[test]
fn test_uses_only_provided_action_options() {
    let options = ActionOptions::new().phase("error", increment());
    let actions = PhaseSetFactory::new().create(TYPE, Some(&options));

    assert_eq!(
        actions["start"].invoke(&[json!(5)]).unwrap().into_value(),
        json!({"type": "TYPE_START", "payload": 5})
    );
    assert_eq!(
        actions["success"].invoke(&[json!(5)]).unwrap().into_value(),
        json!({"type": "TYPE_SUCCESS", "payload": 5})
    );
    assert_eq!(
        actions["error"].invoke(&[json!(5)]).unwrap().into_value(),
        json!({"type": "TYPE_ERROR", "payload": 6})
    );
}

#[test]
fn test_meta_creator_from_options() {
    let options = ActionOptions::new().phase(
        "success",
        PhaseCreators::new().with_meta_creator(|args| Ok(Some(json!({"args": args.len()})))),
    );
    let actions = PhaseSetFactory::new().create(TYPE, Some(&options));

    let message = actions["success"].invoke(&[json!(1), json!(2)]).unwrap();
    assert_eq!(
        message.into_value(),
        json!({"type": "TYPE_SUCCESS", "payload": 1, "meta": {"args": 2}})
    );
}

#[test]
fn test_does_not_use_non_plain_action_options() {
    struct CustomOptions {
        #[allow(dead_code)]
        start: PhaseCreators,
    }

    let options = ActionOptions::opaque(CustomOptions { start: increment() });
    let actions = PhaseSetFactory::new().create(TYPE, Some(&options));

    assert_eq!(
        actions["start"].invoke(&[json!(0)]).unwrap().into_value(),
        json!({"type": "TYPE_START", "payload": 0})
    );
}

#[test]
fn test_does_not_use_non_plain_phase_entry() {
    let options = ActionOptions::new()
        .phase("start", PhaseOptions::Opaque)
        .phase("error", increment());
    let actions = PhaseSetFactory::new().create(TYPE, Some(&options));

    assert_eq!(actions["start"].invoke(&[json!(0)]).unwrap().payload, Some(json!(0)));
    assert_eq!(actions["error"].invoke(&[json!(0)]).unwrap().payload, Some(json!(1)));
}

#[test]
fn test_error_phase_rejects_with_error_flag() {
    let actions = PhaseSetFactory::new().create(TYPE, None);
    let failure = std::io::Error::other("connection reset");

    let message = actions["error"].reject(&failure).unwrap().into_value();
    assert!(is_error(&message));
    assert_eq!(
        message,
        json!({
            "type": "TYPE_ERROR",
            "payload": {"name": "Error", "message": "connection reset"},
            "error": true
        })
    );
}

#[test]
fn test_creates_new_phase_types_after_rename() {
    let mut factory = PhaseSetFactory::new();
    let before = factory.create(TYPE, None);

    factory.set_phase_names(PhaseNames::new("BEGIN", "OK", "FAILED"));
    assert_eq!(factory.phase_names(), &PhaseNames::new("BEGIN", "OK", "FAILED"));

    let actions = factory.create(TYPE, None);
    assert_eq!(actions["begin"].to_string(), "TYPE_BEGIN");
    assert_eq!(actions["ok"].to_string(), "TYPE_OK");
    assert_eq!(actions["failed"].to_string(), "TYPE_FAILED");
    assert!(actions.phase("start").is_none());

    // Sets built earlier keep the names they were built with
    assert_eq!(before["start"].to_string(), "TYPE_START");
    assert_eq!(before.phase_names(), &PhaseNames::default());
    assert!(before.phase("begin").is_none());
}

#[test]
fn test_options_follow_renamed_phases() {
    let factory = PhaseSetFactory::with_phase_names(PhaseNames::new("BEGIN", "OK", "FAILED"));

    // Options are looked up by the configured name, not the slot
    let options = ActionOptions::new()
        .phase("FAILED", increment())
        .phase("error", increment());
    let actions = factory.create(TYPE, Some(&options));

    assert_eq!(actions["failed"].invoke(&[json!(1)]).unwrap().payload, Some(json!(2)));
    assert_eq!(actions["begin"].invoke(&[json!(1)]).unwrap().payload, Some(json!(1)));
}

#[test]
fn test_phase_set_is_shareable_across_threads() {
    let actions = std::sync::Arc::new(PhaseSetFactory::new().create(TYPE, None));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let actions = actions.clone();
            std::thread::spawn(move || actions["success"].invoke(&[json!(i)]).unwrap())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let message = handle.join().unwrap();
        assert_eq!(message.action_type, "TYPE_SUCCESS");
        assert_eq!(message.payload, Some(json!(i)));
    }
}
