//! Integration tests for the shop document round-trip.

mod common;

use std::collections::HashMap;

use chestshop::shop::ShopRecord;
use chestshop::store::{ShopStore, SHOPS_FILE};
use chestshop::world::Location;
use common::{desc, sign_at};
use tempfile::tempdir;
use uuid::Uuid;

fn record_at(x: f64, world: &str, owner: Uuid) -> ShopRecord {
    let sign = Location::new(world, x, 65.0, 0.0);
    ShopRecord {
        chest_location: sign.below(1.0),
        sign_location: sign,
        owner,
        owner_name: "Alice".to_string(),
        want: desc("Bread", 64),
        give: desc("Diamond", 1),
    }
}

fn registry_of(records: Vec<ShopRecord>) -> HashMap<Location, ShopRecord> {
    records
        .into_iter()
        .map(|record| (record.sign_location.clone(), record))
        .collect()
}

#[tokio::test]
async fn save_then_load_is_identity() {
    let tmp = tempdir().unwrap();
    let store = ShopStore::open(tmp.path()).await.unwrap();
    let owner = Uuid::new_v4();

    let mut original = registry_of(vec![
        record_at(0.0, "overworld", owner),
        record_at(3.5, "overworld", owner),
        record_at(-12.0, "the_nether", owner),
    ]);
    // Mix in fractional coordinates and facing angles.
    if let Some(record) = original.get_mut(&sign_at(3.5)) {
        record.sign_location.yaw = 90.0;
    }
    let original = registry_of(original.into_values().collect());

    store.save(&original).await.unwrap();
    let loaded = store.load(|_| true).await.unwrap();
    assert_eq!(loaded, original);
}

#[tokio::test]
async fn load_without_a_document_starts_empty() {
    let tmp = tempdir().unwrap();
    let store = ShopStore::open(tmp.path()).await.unwrap();
    let loaded = store.load(|_| true).await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn unknown_worlds_are_dropped_on_load() {
    let tmp = tempdir().unwrap();
    let store = ShopStore::open(tmp.path()).await.unwrap();
    let owner = Uuid::new_v4();

    let registry = registry_of(vec![
        record_at(0.0, "overworld", owner),
        record_at(1.0, "deleted_world", owner),
    ]);
    store.save(&registry).await.unwrap();

    let loaded = store.load(|world| world == "overworld").await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains_key(&sign_at(0.0)));
}

#[tokio::test]
async fn corrupt_records_are_skipped_not_fatal() {
    let tmp = tempdir().unwrap();
    let store = ShopStore::open(tmp.path()).await.unwrap();
    let owner = Uuid::new_v4();

    store
        .save(&registry_of(vec![record_at(0.0, "overworld", owner)]))
        .await
        .unwrap();

    // Splice a record with a garbled owner id and an oversized amount into
    // the document by hand.
    let path = tmp.path().join(SHOPS_FILE);
    let mut document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    document.as_object_mut().unwrap().insert(
        "overworld,9,65,0,0,0".to_string(),
        serde_json::json!({
            "signLocation": "overworld,9,65,0,0,0",
            "chestLocation": "overworld,9,64,0,0,0",
            "owner": "not-a-uuid",
            "ownerName": "Mallory",
            "wantItem": {"type": "BREAD", "amount": 64},
            "giveItem": {"type": "DIAMOND", "amount": 1}
        }),
    );
    document.as_object_mut().unwrap().insert(
        "overworld,8,65,0,0,0".to_string(),
        serde_json::json!({
            "signLocation": "overworld,8,65,0,0,0",
            "chestLocation": "overworld,8,64,0,0,0",
            "owner": Uuid::new_v4().to_string(),
            "ownerName": "Mallory",
            "wantItem": {"type": "BREAD", "amount": 100},
            "giveItem": {"type": "DIAMOND", "amount": 1}
        }),
    );
    std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();

    let loaded = store.load(|_| true).await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.contains_key(&sign_at(0.0)));
}

#[tokio::test]
async fn document_uses_the_contract_shape() {
    let tmp = tempdir().unwrap();
    let store = ShopStore::open(tmp.path()).await.unwrap();
    let owner = Uuid::new_v4();
    let record = record_at(2.0, "overworld", owner);
    let key = record.sign_location.to_string();

    store.save(&registry_of(vec![record])).await.unwrap();

    let text = std::fs::read_to_string(tmp.path().join(SHOPS_FILE)).unwrap();
    let document: serde_json::Value = serde_json::from_str(&text).unwrap();
    let entry = &document[&key];
    assert_eq!(entry["signLocation"], serde_json::json!(key));
    assert_eq!(entry["owner"], serde_json::json!(owner.to_string()));
    assert_eq!(entry["ownerName"], serde_json::json!("Alice"));
    assert_eq!(entry["wantItem"]["type"], serde_json::json!("BREAD"));
    assert_eq!(entry["wantItem"]["amount"], serde_json::json!(64));
    assert_eq!(entry["giveItem"]["type"], serde_json::json!("DIAMOND"));
    assert_eq!(entry["giveItem"]["amount"], serde_json::json!(1));
}

#[tokio::test]
async fn saves_leave_no_temp_residue() {
    let tmp = tempdir().unwrap();
    let store = ShopStore::open(tmp.path()).await.unwrap();
    let owner = Uuid::new_v4();

    for round in 0..3 {
        store
            .save(&registry_of(vec![record_at(round as f64, "overworld", owner)]))
            .await
            .unwrap();
    }

    let stray: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name != SHOPS_FILE)
        .collect();
    assert!(stray.is_empty(), "unexpected files: {:?}", stray);
}
