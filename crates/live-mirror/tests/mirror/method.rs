//! Tests for `MethodMirror`.

use std::sync::Arc;

use serde_json::{json, Map, Value};

use live_mirror::mirror::{Members, MethodMirror};
use live_mirror::{Entity, MirrorError, Prototype};

fn text(entity: &Entity, key: &str) -> String {
    entity
        .get(key)
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn person_prototype() -> Arc<Prototype<Entity>> {
    Arc::new(
        Prototype::extend(&Entity::base_prototype(), "Person")
            .method("fullName", |e: &Entity, _| {
                Ok(json!(format!("{} {}", text(e, "first"), text(e, "last"))))
            })
            .method("whoami", |e: &Entity, _| Ok(json!(e.cid())))
            .method("toJSON", |e: &Entity, _| Ok(json!({ "person": e.to_json() }))),
    )
}

fn person() -> Arc<Entity> {
    let mut attrs = Map::new();
    attrs.insert("first".into(), json!("Ada"));
    attrs.insert("last".into(), json!("Lovelace"));
    Arc::new(Entity::with_prototype(attrs, person_prototype()))
}

#[test]
fn forwards_own_and_inherited_methods() {
    let entity = person();
    let dst = Members::new();

    let installed = MethodMirror::install(&dst, &entity);

    let names = dst.method_names();
    assert_eq!(installed, names.len());
    for name in ["fullName", "whoami", "toJSON", "get", "set", "unset", "has", "keys", "isNew"] {
        assert!(names.iter().any(|n| n == name), "missing {name}");
    }
}

#[test]
fn nearest_definition_is_forwarded() {
    let entity = person();
    let dst = Members::new();
    MethodMirror::install(&dst, &entity);

    let json = dst.invoke("toJSON", &[]).unwrap();

    assert_eq!(json["person"]["first"], json!("Ada"));
}

#[test]
fn source_is_the_receiver() {
    let entity = person();
    let dst = Members::new();
    MethodMirror::install(&dst, &entity);

    assert_eq!(dst.invoke("whoami", &[]).unwrap(), json!(entity.cid()));
    assert_eq!(
        dst.invoke("fullName", &[]).unwrap(),
        entity.invoke("fullName", &[]).unwrap()
    );
}

#[test]
fn forwarded_call_has_the_same_side_effects_as_a_direct_call() {
    let direct = person();
    let mirrored = person();
    let dst = Members::new();
    MethodMirror::install(&dst, &mirrored);

    let args = [json!("first"), json!("Grace")];
    let direct_result = direct.invoke("set", &args).unwrap();
    let mirrored_result = dst.invoke("set", &args).unwrap();

    assert_eq!(direct_result, mirrored_result);
    assert_eq!(direct.to_json(), mirrored.to_json());
    assert_eq!(dst.invoke("fullName", &[]).unwrap(), json!("Grace Lovelace"));
}

#[test]
fn errors_from_the_method_pass_through() {
    let entity = person();
    let dst = Members::new();
    MethodMirror::install(&dst, &entity);

    let err = dst.invoke("get", &[Value::Null]).unwrap_err();

    assert!(matches!(err, MirrorError::InvalidArguments { ref method, .. } if method == "get"));
}

#[test]
fn root_prototype_without_methods_installs_nothing() {
    let entity = Arc::new(Entity::with_prototype(
        Map::new(),
        Arc::new(Prototype::new("Bare")),
    ));
    let dst = Members::new();

    assert_eq!(MethodMirror::install(&dst, &entity), 0);
    assert!(dst.is_empty());
}
