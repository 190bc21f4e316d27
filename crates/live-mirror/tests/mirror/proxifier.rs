//! Tests for the `Proxifier` service.

use std::sync::Arc;

use serde_json::json;

use live_mirror::mirror::{AccessorOrigin, MemberKind, Members};
use live_mirror::{Collection, Entity, Proxifier};

#[test]
fn primitives_compose_on_a_bare_destination() {
    let proxifier = Proxifier::new();
    let entity = Arc::new(Entity::from_json(json!({"title": "draft"})));
    let dst = Members::new();

    assert_eq!(proxifier.install_methods(&dst, &entity), 7);
    assert_eq!(proxifier.install_properties(&dst, &entity), 2);
    proxifier.install_attribute(&dst, &entity, "title");

    assert_eq!(
        dst.kind("title"),
        Some(MemberKind::Accessor(AccessorOrigin::Attribute))
    );
    assert_eq!(
        dst.kind("cid"),
        Some(MemberKind::Accessor(AccessorOrigin::Property))
    );
    assert_eq!(dst.kind("toJSON"), Some(MemberKind::Method));
}

#[test]
fn install_property_works_for_collections() {
    let proxifier = Proxifier::new();
    let collection = Arc::new(Collection::new());
    collection.properties().set("url", json!("/items"));
    let dst = Members::new();

    proxifier.install_property(&dst, &collection, "url");

    assert_eq!(dst.read("url").unwrap(), Some(json!("/items")));
    dst.write("url", json!("/things")).unwrap();
    assert_eq!(collection.properties().get("url"), Some(json!("/things")));
}
