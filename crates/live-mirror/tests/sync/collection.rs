//! Tests for `CollectionWithSync`.

use std::sync::Arc;

use serde_json::json;

use live_mirror::{
    Collection, CollectionWithSync, Entity, ProxyCache, ResultTranslator, SyncMethod, SyncOptions,
    SyncTransport,
};

use super::mock::MockTransport;

fn wrap(collection: Collection, transport: &Arc<MockTransport>) -> CollectionWithSync {
    let transport: Arc<dyn SyncTransport> = transport.clone();
    CollectionWithSync::new(
        Arc::new(collection),
        transport,
        ResultTranslator::new(),
        Arc::new(ProxyCache::new()),
        SyncOptions {
            url_root: Some("/api/items".to_string()),
            ..SyncOptions::default()
        },
    )
}

fn two_items() -> Collection {
    Collection::from_entities([
        Arc::new(Entity::from_json(json!({"id": 1}))),
        Arc::new(Entity::from_json(json!({"id": 2}))),
    ])
}

#[tokio::test]
async fn fetch_reads_the_collection_url() {
    let transport = Arc::new(MockTransport::new());
    let synced = wrap(two_items(), &transport);

    let promise = synced.fetch();
    let request = transport.last_request().unwrap();
    assert_eq!(request.method, SyncMethod::Read);
    assert_eq!(request.url.as_deref(), Some("/api/items"));
    assert_eq!(request.payload, None);

    transport.resolve(0, json!([{"id": 1}, {"id": 2}]));
    assert_eq!(promise.await, Ok(json!([{"id": 1}, {"id": 2}])));
}

#[test]
fn url_property_overrides_configured_root() {
    let transport = Arc::new(MockTransport::new());
    let synced = wrap(Collection::new(), &transport);

    synced.properties().set("url", json!("/custom"));

    assert_eq!(synced.url().as_deref(), Some("/custom"));
}

#[test]
fn update_sends_every_model() {
    let transport = Arc::new(MockTransport::new());
    let synced = wrap(two_items(), &transport);

    let _promise = synced.sync(SyncMethod::Update);

    assert_eq!(
        transport.last_request().unwrap().payload,
        Some(json!([{"id": 1}, {"id": 2}]))
    );
}

#[test]
fn proxy_is_memoized_with_its_first_snapshot() {
    let transport = Arc::new(MockTransport::new());
    let synced = wrap(two_items(), &transport);

    let first = synced.proxy();
    synced.push(Arc::new(Entity::from_json(json!({"id": 3}))));
    let second = synced.proxy();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 2);
    assert_eq!(second.field("length"), Some(json!(3)));
}
