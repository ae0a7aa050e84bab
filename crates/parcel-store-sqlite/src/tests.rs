//! Integration tests for `SqliteCollection` against an in-memory database.

use chrono::{DateTime, TimeZone, Utc};
use parcel_core::{
  collection::{DeleteOutcome, ParcelCollection, ParcelQuery},
  parcel::{CREATED_AT_KEY, CREATED_BY_KEY, NewParcel},
};
use serde_json::json;
use uuid::Uuid;

use crate::SqliteCollection;

async fn collection() -> SqliteCollection {
  SqliteCollection::open_in_memory()
    .await
    .expect("in-memory collection")
}

fn at(day: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 3, day, 9, 30, 0).unwrap()
}

fn parcel(created_by: Option<&str>, created_at: Option<DateTime<Utc>>) -> NewParcel {
  let mut input = NewParcel::new("Alice", "Bob", "123 Main St").unwrap();
  if let Some(who) = created_by {
    input = input.with(CREATED_BY_KEY, who);
  }
  if let Some(when) = created_at {
    input = input.with(CREATED_AT_KEY, when.to_rfc3339());
  }
  input
}

// ─── Ping ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn ping_succeeds_on_open_collection() {
  let c = collection().await;
  c.ping().await.unwrap();
}

// ─── Insert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_assigns_fresh_ids() {
  let c = collection().await;

  let first = c.insert(parcel(None, None)).await.unwrap();
  let second = c.insert(parcel(None, None)).await.unwrap();
  assert_ne!(first.parcel_id, second.parcel_id);

  let all = c.find(ParcelQuery::default()).await.unwrap();
  assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn inserted_parcel_roundtrips_with_extra_fields() {
  let c = collection().await;

  let input = parcel(Some("alice@example.com"), Some(at(1)))
    .with("weight", 2.5)
    .with("tags", json!(["fragile", "express"]));

  let stored = c.insert(input).await.unwrap();
  let all = c.find(ParcelQuery::default()).await.unwrap();

  assert_eq!(all, vec![stored.clone()]);
  assert_eq!(stored.sender, "Alice");
  assert_eq!(stored.extra.get("tags"), Some(&json!(["fragile", "express"])));
}

// ─── Find ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_on_empty_collection_is_empty() {
  let c = collection().await;
  assert!(c.find(ParcelQuery::default()).await.unwrap().is_empty());
  assert!(
    c.find(ParcelQuery::created_by("nobody@example.com"))
      .await
      .unwrap()
      .is_empty()
  );
}

#[tokio::test]
async fn find_filters_by_created_by() {
  let c = collection().await;
  c.insert(parcel(Some("foo@bar.com"), Some(at(1)))).await.unwrap();
  c.insert(parcel(Some("other@bar.com"), Some(at(2)))).await.unwrap();
  c.insert(parcel(Some("foo@bar.com"), Some(at(3)))).await.unwrap();
  c.insert(parcel(None, Some(at(4)))).await.unwrap();

  let mine = c.find(ParcelQuery::created_by("foo@bar.com")).await.unwrap();
  assert_eq!(mine.len(), 2);
  assert!(
    mine
      .iter()
      .all(|p| p.created_by() == Some("foo@bar.com"))
  );

  let all = c.find(ParcelQuery::default()).await.unwrap();
  assert_eq!(all.len(), 4);
}

#[tokio::test]
async fn find_orders_newest_created_at_first() {
  let c = collection().await;
  // Inserted out of order so insertion order can't explain the result.
  c.insert(parcel(None, Some(at(2)))).await.unwrap();
  c.insert(parcel(None, Some(at(3)))).await.unwrap();
  c.insert(parcel(None, Some(at(1)))).await.unwrap();

  let times: Vec<_> = c
    .find(ParcelQuery::default())
    .await
    .unwrap()
    .into_iter()
    .map(|p| p.created_at())
    .collect();
  assert_eq!(times, vec![Some(at(3)), Some(at(2)), Some(at(1))]);
}

#[tokio::test]
async fn parcels_without_created_at_sort_last() {
  let c = collection().await;
  let untimed_old = c.insert(parcel(None, None)).await.unwrap();
  c.insert(parcel(None, Some(at(1)))).await.unwrap();
  let untimed_new = c.insert(parcel(None, None)).await.unwrap();
  c.insert(parcel(None, Some(at(2)))).await.unwrap();

  let all = c.find(ParcelQuery::default()).await.unwrap();
  assert_eq!(all[0].created_at(), Some(at(2)));
  assert_eq!(all[1].created_at(), Some(at(1)));
  assert_eq!(all[2].parcel_id, untimed_new.parcel_id);
  assert_eq!(all[3].parcel_id, untimed_old.parcel_id);
}

#[tokio::test]
async fn created_at_offsets_compare_as_instants() {
  let c = collection().await;
  let later = NewParcel::new("A", "B", "C")
    .unwrap()
    .with(CREATED_AT_KEY, "2024-03-01T09:00:00Z");
  let earlier = NewParcel::new("A", "B", "C")
    .unwrap()
    .with(CREATED_AT_KEY, "2024-03-01T10:00:00+02:00");
  c.insert(later).await.unwrap();
  c.insert(earlier).await.unwrap();

  let all = c.find(ParcelQuery::default()).await.unwrap();
  assert_eq!(all[0].extra[CREATED_AT_KEY], json!("2024-03-01T09:00:00Z"));
  // Stored as sent, not rewritten to UTC.
  assert_eq!(all[1].extra[CREATED_AT_KEY], json!("2024-03-01T10:00:00+02:00"));
}

#[tokio::test]
async fn mixed_created_at_representations_sort_together() {
  let c = collection().await;
  let date_only = NewParcel::new("A", "B", "C")
    .unwrap()
    .with(CREATED_AT_KEY, "2024-03-02");
  let millis = NewParcel::new("A", "B", "C")
    .unwrap()
    .with(CREATED_AT_KEY, at(3).timestamp_millis());
  let unreadable = NewParcel::new("A", "B", "C")
    .unwrap()
    .with(CREATED_AT_KEY, "sometime in march");
  let unreadable = c.insert(unreadable).await.unwrap();
  c.insert(date_only).await.unwrap();
  c.insert(parcel(None, Some(at(1)))).await.unwrap();
  c.insert(millis).await.unwrap();

  let all = c.find(ParcelQuery::default()).await.unwrap();
  assert_eq!(all[0].extra[CREATED_AT_KEY], json!(at(3).timestamp_millis()));
  assert_eq!(all[1].extra[CREATED_AT_KEY], json!("2024-03-02"));
  assert_eq!(all[2].created_at(), Some(at(1)));
  assert_eq!(all[3].parcel_id, unreadable.parcel_id);
  assert_eq!(all[3].extra[CREATED_AT_KEY], json!("sometime in march"));
}

#[tokio::test]
async fn filtered_results_keep_the_same_order() {
  let c = collection().await;
  let untimed = c.insert(parcel(Some("foo@bar.com"), None)).await.unwrap();
  c.insert(parcel(Some("foo@bar.com"), Some(at(2)))).await.unwrap();
  c.insert(parcel(Some("other@bar.com"), Some(at(9)))).await.unwrap();
  c.insert(parcel(Some("foo@bar.com"), Some(at(4)))).await.unwrap();
  c.insert(parcel(Some("foo@bar.com"), Some(at(1)))).await.unwrap();

  let mine = c.find(ParcelQuery::created_by("foo@bar.com")).await.unwrap();
  let times: Vec<_> = mine.iter().map(|p| p.created_at()).collect();
  assert_eq!(times, vec![Some(at(4)), Some(at(2)), Some(at(1)), None]);
  assert_eq!(mine[3].parcel_id, untimed.parcel_id);
}

#[tokio::test]
async fn non_string_created_by_never_matches_a_filter() {
  let c = collection().await;
  let odd = NewParcel::new("A", "B", "C").unwrap().with(CREATED_BY_KEY, 42);
  let stored = c.insert(odd).await.unwrap();

  assert!(c.find(ParcelQuery::created_by("42")).await.unwrap().is_empty());
  let all = c.find(ParcelQuery::default()).await.unwrap();
  assert_eq!(all, vec![stored]);
  assert_eq!(all[0].extra[CREATED_BY_KEY], json!(42));
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_is_idempotent() {
  let c = collection().await;
  let keep = c.insert(parcel(None, None)).await.unwrap();
  let gone = c.insert(parcel(None, None)).await.unwrap();

  let first = c.delete(gone.parcel_id).await.unwrap();
  assert_eq!(first, DeleteOutcome { acknowledged: true, deleted_count: 1 });

  let second = c.delete(gone.parcel_id).await.unwrap();
  assert_eq!(second, DeleteOutcome { acknowledged: true, deleted_count: 0 });

  let remaining = c.find(ParcelQuery::default()).await.unwrap();
  assert_eq!(remaining.len(), 1);
  assert_eq!(remaining[0].parcel_id, keep.parcel_id);
}

#[tokio::test]
async fn delete_unknown_id_reports_zero() {
  let c = collection().await;
  let outcome = c.delete(Uuid::new_v4()).await.unwrap();
  assert_eq!(outcome.deleted_count, 0);
}

// ─── Lifecycle ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_parcels() {
  let dir = std::env::temp_dir().join(format!("parcels-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("parcels.db");

  let c = SqliteCollection::open(&path).await.unwrap();
  let stored = c.insert(parcel(Some("a@b.c"), Some(at(5)))).await.unwrap();
  c.close().await.unwrap();

  let c = SqliteCollection::open(&path).await.unwrap();
  let all = c.find(ParcelQuery::default()).await.unwrap();
  assert_eq!(all, vec![stored]);
  c.close().await.unwrap();

  std::fs::remove_dir_all(&dir).ok();
}
