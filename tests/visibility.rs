// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Default visibility of soft-deleted rows in read queries.

mod common;

use common::*;
use soft_cascade::{
    FilterOp, MemoryStore, Pagination, Query, SoftDelete, SortDirection, Value,
    Visibility
};

#[tokio::test]
async fn default_query_hides_deleted_rows() {
    let store = MemoryStore::new();
    let mut first = seed_chain(&store).await;
    let second = seed_chain(&store).await;
    let deleter = deleter(store.clone());

    deleter.delete(&mut first.site).await.unwrap();

    let live = deleter.fetch(&Query::live::<Site>()).await.unwrap();
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].key, second.site.key());

    let all = deleter.fetch(&Query::with_deleted::<Site>()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn cascaded_rows_are_hidden_too() {
    let store = MemoryStore::new();
    let mut chain = seed_chain(&store).await;
    let deleter = deleter(store.clone());

    deleter.delete(&mut chain.device).await.unwrap();

    assert!(deleter.fetch(&Query::live::<Connector>()).await.unwrap().is_empty());
    let deleted = deleter
        .fetch(&Query::with_deleted::<Connector>())
        .await
        .unwrap();
    assert_eq!(deleted.len(), 1);
    assert!(deleted[0].is_deleted());
}

#[tokio::test]
async fn restored_rows_reappear() {
    let store = MemoryStore::new();
    let mut chain = seed_chain(&store).await;
    let deleter = deleter(store.clone());

    deleter.delete(&mut chain.evse).await.unwrap();
    assert!(deleter.fetch(&Query::live::<Evse>()).await.unwrap().is_empty());

    deleter.restore(&mut chain.evse).await.unwrap();
    let live = deleter.fetch(&Query::live::<Evse>()).await.unwrap();
    assert_eq!(live.len(), 1);
    assert!(deleter.fetch(&Query::live::<Connector>()).await.unwrap().is_empty());
}

#[tokio::test]
async fn filters_compose_with_visibility() {
    let store = MemoryStore::new();
    let root = site();
    let mut devices: Vec<_> = (0..3).map(|_| device(&root)).collect();
    let elsewhere = device(&site());
    store.insert(&root).await;
    store.insert(&elsewhere).await;
    for device in &devices {
        store.insert(device).await;
    }
    let deleter = deleter(store.clone());

    deleter.delete(&mut devices[0]).await.unwrap();

    let live = Query::live::<Device>().eq("site_id", root.id);
    assert_eq!(deleter.fetch(&live).await.unwrap().len(), 2);

    let everything = Query::with_deleted::<Device>().eq("site_id", root.id);
    assert_eq!(deleter.fetch(&everything).await.unwrap().len(), 3);

    let only_deleted = Query::with_deleted::<Device>()
        .eq("site_id", root.id)
        .filter("deleted_at", FilterOp::IsNotNull, Value::Null);
    let rows = deleter.fetch(&only_deleted).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, devices[0].key());
}

#[tokio::test]
async fn pagination_counts_live_rows_only() {
    let store = MemoryStore::new();
    let site = site();
    let mut devices: Vec<_> = (0..5).map(|_| device(&site)).collect();
    store.insert(&site).await;
    for device in &devices {
        store.insert(device).await;
    }
    let deleter = deleter(store.clone());
    deleter.delete(&mut devices[2]).await.unwrap();

    let query = Query::live::<Device>()
        .order_by("id", SortDirection::Asc)
        .paginate(Pagination::new(3, 0));
    let page = deleter.fetch(&query).await.unwrap();

    let mut expected: Vec<_> = devices
        .iter()
        .filter(|device| device.deleted_at.is_none())
        .map(|device| device.id)
        .collect();
    expected.sort();
    let ids: Vec<_> = page.iter().map(|record| record.key.id).collect();
    assert_eq!(ids, expected[..3].to_vec());
}

#[tokio::test]
async fn transaction_reads_observe_visibility() {
    use soft_cascade::StoreTransaction;

    let store = MemoryStore::new();
    let mut chain = seed_chain(&store).await;
    let deleter = deleter(store.clone());

    let mut tx = deleter.begin().await.unwrap();
    deleter.delete_in(&mut tx, &mut chain.device).await.unwrap();

    let device = Device::descriptor();
    assert!(
        tx.find(device, chain.device.id, Visibility::Live)
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        tx.find(device, chain.device.id, Visibility::WithDeleted)
            .await
            .unwrap()
            .is_some()
    );

    let evses = tx
        .load_children(Evse::descriptor(), "device_id", chain.device.id, Visibility::WithDeleted)
        .await
        .unwrap();
    assert_eq!(evses.len(), 1);
    assert!(evses[0].is_deleted());
}

#[tokio::test]
async fn null_valued_filters_match_sql_semantics() {
    let store = MemoryStore::new();
    let head = Relay {
        id:          uuid::Uuid::new_v4(),
        upstream_id: None,
        deleted_at:  None
    };
    let tail = Relay {
        id:          uuid::Uuid::new_v4(),
        upstream_id: Some(head.id),
        deleted_at:  None
    };
    store.insert(&head).await;
    store.insert(&tail).await;
    let deleter = deleter(store.clone());

    let roots = Query::live::<Relay>().eq("upstream_id", None::<uuid::Uuid>);
    let rows = deleter.fetch(&roots).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].key, head.key());
    assert!(roots.to_sql().sql.contains("upstream_id IS NULL"));

    let never = Query::live::<Relay>().filter("deleted_at", FilterOp::Lt, Value::Null);
    assert!(deleter.fetch(&never).await.unwrap().is_empty());
    assert!(never.to_sql().sql.contains("WHERE FALSE"));
}
