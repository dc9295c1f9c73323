//! Integration tests for the catalog records and collections.
//!
//! Collection tests bind to a lazily-connecting client, so no server is needed:
//! they only inspect the translated finds and the bound descriptors.

use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use podcat::model::{ModelInfo, ModelRegistry, copy_model};
use podcat::prelude::*;
use podcat::catalog::{FEEDS, FEED_UPDATE_IGNORED, LOGS};
use podcat::store::document::to_document;
use pretty_assertions::assert_eq;
use serde_json::json;

fn sample_feed() -> Feed {
    Feed {
        id: Some(ObjectId::new()),
        title: "Rust Radio".into(),
        url: "https://example.com/rss".into(),
        author: "Ferris".into(),
        itunes_id: Some(42),
        items: vec![Item {
            guid: "ep-1".into(),
            title: "Ownership".into(),
            duration: 1800,
            publication_time: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn test_feed_indexes() {
    let info = ModelInfo::of::<Feed>();
    let names: Vec<_> = info.indexes().map(|i| i.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["title", "url", "itunes_id", "category", "modification_time"]
    );

    let title = info.index("title").unwrap();
    assert!(title.text);
    assert!(!title.unique);

    let url = info.index("url").unwrap();
    assert!(url.unique);
    assert_eq!(url.key, vec!["url"]);
}

#[test]
fn test_serialized_keys_match_storage_names() {
    let info = ModelInfo::of::<Feed>();
    let doc = to_document(&sample_feed()).unwrap();

    let stored: BTreeSet<_> = doc.keys().map(String::as_str).collect();
    let declared: BTreeSet<_> = info.fields().iter().map(|f| f.bson_name.as_str()).collect();
    assert_eq!(stored, declared);

    let log_info = ModelInfo::of::<Log>();
    let log = Log {
        id: Some(ObjectId::new()),
        ..Default::default()
    };
    let doc = to_document(&log).unwrap();
    let stored: BTreeSet<_> = doc.keys().map(String::as_str).collect();
    let declared: BTreeSet<_> = log_info
        .fields()
        .iter()
        .map(|f| f.bson_name.as_str())
        .collect();
    assert_eq!(stored, declared);
}

#[test]
fn test_unset_id_is_omitted_from_storage() {
    let doc = to_document(&Feed::default()).unwrap();
    assert!(!doc.contains_key("_id"));
}

#[test]
fn test_feed_api_json() {
    let feed = sample_feed();
    let info = ModelInfo::of::<Feed>();
    let value = to_api_json(&info, &feed).unwrap();

    assert_eq!(value["id"], json!(feed.id.unwrap().to_hex()));
    assert_eq!(value["title"], json!("Rust Radio"));
    assert_eq!(value["itunes_id"], json!(42));
    assert!(value.get("summary").is_none());
    assert!(value.get("category").is_none());
    assert_eq!(
        value["items"][0]["publication_time"],
        json!("2024-05-01T12:00:00Z")
    );
}

#[test]
fn test_item_api_json_drops_empty_optional_fields() {
    let feed = Feed {
        items: vec![Item {
            guid: "g".into(),
            link: String::new(),
            summary: "Pilot episode".into(),
            ..Default::default()
        }],
        ..Default::default()
    };
    let value = to_api_json(&ModelInfo::of::<Feed>(), &feed).unwrap();

    let item = &value["items"][0];
    assert_eq!(item["guid"], json!("g"));
    assert_eq!(item["summary"], json!("Pilot episode"));
    assert_eq!(item["title"], json!(""));
    assert!(item.get("link").is_none());
}

#[test]
fn test_api_names_in_queries() {
    let info = ModelInfo::of::<Feed>();
    let query = Query::new()
        .sort_by("id", true)
        .omit(["items"])
        .with_api_names(&info);
    assert_eq!(query.sort(), Some(doc! { "_id": -1 }));
}

#[test]
fn test_update_contract_in_memory() {
    let stored = sample_feed();
    let mut current = stored.clone();

    let mut candidate = stored.clone();
    candidate.id = Some(ObjectId::new());
    candidate.modification_time = Utc::now();
    assert!(!copy_model(&mut current, &candidate, FEED_UPDATE_IGNORED));
    assert_eq!(current, stored);

    candidate.summary = "Weekly Rust news".into();
    assert!(copy_model(&mut current, &candidate, FEED_UPDATE_IGNORED));
    assert_eq!(current.summary, "Weekly Rust news");
    assert_eq!(current.id, stored.id);
    assert_eq!(current.modification_time, stored.modification_time);
}

#[test]
fn test_merge_then_update_detects_change() {
    let stored = sample_feed();
    let snapshot = Feed {
        title: stored.title.clone(),
        url: stored.url.clone(),
        author: stored.author.clone(),
        itunes_id: stored.itunes_id,
        items: vec![Item {
            guid: "ep-2".into(),
            title: "Borrowing".into(),
            ..Default::default()
        }],
        ..Default::default()
    };

    let merged = merge_feeds(&stored, &snapshot);
    assert_eq!(merged.items.len(), 2);

    let mut current = stored.clone();
    assert!(copy_model(&mut current, &merged, FEED_UPDATE_IGNORED));
    assert_eq!(current.items, merged.items);
}

async fn lazy_client() -> MongoClient {
    MongoClient::new(StoreConfig::from_uri(
        "mongodb://localhost:27017",
        "podcat_test",
    ))
    .await
    .unwrap()
}

#[tokio::test]
async fn test_catalog_binds_collections() {
    let catalog = Catalog::with_client(lazy_client().await, Catalog::registry()).unwrap();

    assert_eq!(catalog.feeds().name(), FEEDS);
    assert_eq!(catalog.logs().name(), LOGS);
    assert_eq!(catalog.feeds().info().name(), "Feed");
    assert_eq!(catalog.models().len(), 2);
    assert_eq!(catalog.client().config().database, "podcat_test");
}

#[tokio::test]
async fn test_unregistered_model_is_contract_violation() {
    let registry = ModelRegistry::new().with::<Feed>();
    let err = Catalog::with_client(lazy_client().await, registry).unwrap_err();
    assert!(err.is_contract_violation());
}

#[tokio::test]
async fn test_find_without_query_is_unconstrained() {
    let catalog = Catalog::with_client(lazy_client().await, Catalog::registry()).unwrap();

    let a = catalog.feeds().find(None);
    let b = catalog.feeds().find(None);
    assert!(a.spec().is_unconstrained());
    assert!(b.spec().is_unconstrained());
    assert_eq!(a.spec().filter, b.spec().filter);
}

#[tokio::test]
async fn test_find_translates_query() {
    let catalog = Catalog::with_client(lazy_client().await, Catalog::registry()).unwrap();

    let query = Query::new()
        .filter(FilterBuilder::new().eq("category", "Technology").build())
        .sort_by("modification_time", true)
        .select(["title", "url"])
        .limit(20);
    let cursor = catalog.feeds().find(Some(&query));

    assert_eq!(cursor.spec().filter, doc! { "category": "Technology" });
    assert_eq!(cursor.spec().options.sort, Some(doc! { "modification_time": -1 }));
    assert_eq!(
        cursor.spec().options.projection,
        Some(doc! { "title": 1, "url": 1 })
    );
    assert_eq!(cursor.spec().options.limit, Some(20));
}

#[tokio::test]
async fn test_find_by_id_filters_identifier() {
    let catalog = Catalog::with_client(lazy_client().await, Catalog::registry()).unwrap();
    let id = ObjectId::new();

    let cursor = catalog.logs().find_by_id(id);
    assert_eq!(cursor.spec().filter, doc! { "_id": id });
}

#[tokio::test]
async fn test_pipeline_keeps_stages() {
    let catalog = Catalog::with_client(lazy_client().await, Catalog::registry()).unwrap();
    let stages = vec![
        doc! { "$match": { "status_code": { "$gte": 500 } } },
        doc! { "$group": { "_id": "$url", "count": { "$sum": 1 } } },
    ];

    let pipe = catalog.logs().pipeline(stages.clone());
    assert_eq!(pipe.stages(), stages.as_slice());
}
