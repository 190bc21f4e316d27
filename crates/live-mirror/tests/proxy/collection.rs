//! Tests for `CollectionProxy`.

use std::sync::Arc;

use serde_json::{json, Map};

use live_mirror::mirror::MemberKind;
use live_mirror::{Collection, CollectionProxy, Entity};

fn collection() -> Arc<Collection> {
    Arc::new(Collection::from_entities([
        Arc::new(Entity::from_json(json!({"id": 1, "name": "ann"}))),
        Arc::new(Entity::from_json(json!({"id": 2, "name": "bob"}))),
        Arc::new(Entity::from_json(json!({"id": 3, "name": "cy"}))),
    ]))
}

#[test]
fn members_wrap_each_entity_in_order() {
    let source = collection();
    let p = CollectionProxy::new(Arc::clone(&source));

    assert_eq!(p.len(), source.len());
    let names: Vec<_> = p.iter().map(|m| m.field("name").unwrap()).collect();
    assert_eq!(names, vec![json!("ann"), json!("bob"), json!("cy")]);
    for (proxy, entity) in p.models().iter().zip(p.original_models()) {
        assert!(Arc::ptr_eq(proxy.original(), entity));
    }
}

#[test]
fn member_sequence_is_a_one_time_snapshot() {
    let source = collection();
    let p = CollectionProxy::new(Arc::clone(&source));

    source.add(Map::new());
    source.remove(&json!(1));

    assert_eq!(source.len(), 3);
    assert_eq!(p.len(), 3);
    assert_eq!(p.at(0).unwrap().field("name"), Some(json!("ann")));
    assert!(p.at(3).is_none());
}

#[test]
fn mirrored_length_property_stays_live_unlike_members() {
    let source = collection();
    let p = CollectionProxy::new(Arc::clone(&source));

    source.add(Map::new());

    assert_eq!(p.field("length"), Some(json!(4)));
    assert_eq!(p.len(), 3);
}

#[test]
fn member_proxies_stay_live() {
    let source = collection();
    let p = CollectionProxy::new(Arc::clone(&source));

    p.at(1).unwrap().assign("name", json!("bert")).unwrap();
    assert_eq!(source.at(1).unwrap().get("name"), Some(json!("bert")));

    source.at(2).unwrap().set("name", json!("cyd")).unwrap();
    assert_eq!(p.at(2).unwrap().field("name"), Some(json!("cyd")));
}

#[test]
fn collection_methods_forward_to_the_source() {
    let source = collection();
    let p = CollectionProxy::new(Arc::clone(&source));
    assert_eq!(p.members().kind("pluck"), Some(MemberKind::Method));

    p.call("add", &[json!({"id": 4, "name": "dee"})]).unwrap();

    assert_eq!(source.len(), 4);
    assert_eq!(p.call("size", &[]).unwrap(), json!(4));
    assert_eq!(
        p.call("pluck", &[json!("name")]).unwrap(),
        json!(["ann", "bob", "cy", "dee"])
    );
    assert_eq!(p.len(), 3);
}

#[test]
fn empty_collection_builds_empty_proxy() {
    let p = CollectionProxy::new(Arc::new(Collection::new()));
    assert!(p.is_empty());
    assert_eq!(p.field("length"), Some(json!(0)));
    assert_eq!((&p).into_iter().count(), 0);
}
