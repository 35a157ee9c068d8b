//! Property tests for materialization and change notification

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use content_tree::{ContentNode, Field, NodeEvent, PayloadParser};
use proptest::prelude::*;
use serde_json::{json, Value};

fn arb_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

fn arb_leaf() -> impl Strategy<Value = Value> {
    (arb_id(), proptest::option::of("[A-Za-z ]{1,16}"), any::<bool>()).prop_map(
        |(id, name, published)| json!({"id": id, "display_name": name, "published": published}),
    )
}

/// Payloads up to three levels deep, with optional child_info at each level
fn arb_payload() -> impl Strategy<Value = Value> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        (arb_id(), proptest::collection::vec(inner, 0..4)).prop_map(|(id, children)| {
            json!({"id": id, "child_info": {"category": "vertical", "children": children}})
        })
    })
}

fn raw_children(payload: &Value) -> Vec<Value> {
    payload["child_info"]["children"]
        .as_array()
        .cloned()
        .unwrap_or_default()
}

proptest! {
    #[test]
    fn children_keep_length_and_order(payload in arb_payload()) {
        common::init_test_setup();
        let node = ContentNode::from_payload(payload.clone()).unwrap();
        let raw = raw_children(&payload);

        prop_assert_eq!(node.children().len(), raw.len());
        for (child, raw_child) in node.children().iter().zip(&raw) {
            prop_assert_eq!(child.id(), raw_child["id"].as_str());
        }
    }

    #[test]
    fn ancestors_keep_order(ids in proptest::collection::vec(arb_id(), 0..6)) {
        let ancestors: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
        let node = ContentNode::from_payload(json!({
            "id": "leaf",
            "ancestor_info": {"ancestors": ancestors}
        }))
        .unwrap();

        let parsed: Vec<&str> = node.ancestors().iter().filter_map(ContentNode::id).collect();
        let expected: Vec<&str> = ids.iter().map(String::as_str).collect();
        prop_assert_eq!(parsed, expected);
    }

    #[test]
    fn has_children_matches_payload(payload in arb_payload()) {
        let node = ContentNode::from_payload(payload.clone()).unwrap();
        prop_assert_eq!(node.has_children(), !raw_children(&payload).is_empty());
        for child in node.descendants() {
            prop_assert_eq!(child.has_children(), !child.children().is_empty());
        }
    }

    #[test]
    fn reparse_is_idempotent(payload in arb_payload()) {
        let parser = PayloadParser::default();
        let node = parser.create_child(payload).unwrap();

        let from_payload = parser.create_child(node.to_payload()).unwrap();
        prop_assert_eq!(&from_payload, &node);

        let children = node.children().to_vec();
        let passed = parser.parse_entries(children.clone()).unwrap();
        prop_assert_eq!(passed, children);
    }

    #[test]
    fn one_notification_per_mutation(
        names in proptest::collection::vec("[A-Za-z]{1,8}", 1..10),
        observers in 1usize..4,
    ) {
        let mut node = ContentNode::from_payload(json!({"id": "a"})).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));
        for index in 0..observers {
            let sink = Rc::clone(&log);
            node.observe(move |node, event| {
                if let NodeEvent::Changed { fields } = event {
                    let name = node.display_name().map(str::to_string);
                    sink.borrow_mut().push((index, name, fields.clone()));
                }
            });
        }

        let mut expected = Vec::new();
        let mut current: Option<String> = None;
        for name in &names {
            let changed = node.set(Field::DisplayName, json!(name)).unwrap();
            prop_assert_eq!(changed, current.as_deref() != Some(name.as_str()));
            if changed {
                for index in 0..observers {
                    expected.push((index, Some(name.clone()), vec![Field::DisplayName]));
                }
            }
            current = Some(name.clone());
        }

        prop_assert_eq!(&*log.borrow(), &expected);
    }
}
