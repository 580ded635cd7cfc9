//! Generic resource operations: list, create, update, delete against one backing table.

use crate::config::ResourceDescriptor;
use crate::error::AppError;
use crate::json_fields::{decode_record, encode_record};
use crate::store::{Record, RecordStore, UpdateOutcome};

pub struct ResourceService;

impl ResourceService {
    /// All rows of the resource with JSON fields decoded. No filtering, no pagination.
    pub async fn list(store: &dyn RecordStore, resource: &ResourceDescriptor) -> Result<Vec<Record>, AppError> {
        let mut rows = store.select_all(&resource.table).await?;
        for row in &mut rows {
            decode_record(row, &resource.json_fields);
        }
        Ok(rows)
    }

    /// Insert one row with JSON fields encoded. The returned row is not decoded.
    pub async fn create(
        store: &dyn RecordStore,
        resource: &ResourceDescriptor,
        mut body: Record,
    ) -> Result<Record, AppError> {
        encode_record(&mut body, &resource.json_fields);
        store.insert(&resource.table, &body).await
    }

    /// Update rows matching `id`. The id column is stripped from the body so it is never rewritten.
    /// JSON fields are encoded as on create, so an omitted JSON field is written as `"[]"`.
    pub async fn update(
        store: &dyn RecordStore,
        resource: &ResourceDescriptor,
        id: &str,
        mut body: Record,
    ) -> Result<UpdateOutcome, AppError> {
        body.remove(&resource.id_column);
        encode_record(&mut body, &resource.json_fields);
        let outcome = store
            .update_by_id(&resource.table, &resource.id_column, id, &body)
            .await?;
        if outcome.matched == 0 {
            tracing::debug!(resource = %resource.endpoint, id, "update matched no rows");
        }
        Ok(outcome)
    }

    /// Delete rows matching `id`. Returns the matched count; zero is not an error.
    pub async fn delete(store: &dyn RecordStore, resource: &ResourceDescriptor, id: &str) -> Result<u64, AppError> {
        store.delete_by_id(&resource.table, &resource.id_column, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::{json, Value};

    fn articles() -> ResourceDescriptor {
        ResourceDescriptor::new("articles", "articles").with_json_fields(["tags"])
    }

    fn record(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn json_fields_round_trip_through_text() {
        let store = MemoryStore::new();
        let created = ResourceService::create(&store, &articles(), record(json!({ "title": "A", "tags": [1, 2, 3] })))
            .await
            .unwrap();
        assert_eq!(created["tags"], json!("[1,2,3]"));

        let rows = ResourceService::list(&store, &articles()).await.unwrap();
        assert_eq!(rows[0]["tags"], json!([1, 2, 3]));
    }

    #[tokio::test]
    async fn create_without_json_field_stores_empty_list_text() {
        let store = MemoryStore::new();
        ResourceService::create(&store, &articles(), record(json!({ "title": "A" })))
            .await
            .unwrap();
        let stored = store.select_all("articles").await.unwrap();
        assert_eq!(stored[0]["tags"], json!("[]"));
    }

    #[tokio::test]
    async fn list_tolerates_bad_and_missing_values() {
        let store = MemoryStore::new();
        store
            .seed(
                "articles",
                vec![
                    record(json!({ "id": 1, "tags": "not json" })),
                    record(json!({ "id": 2, "tags": null })),
                    record(json!({ "id": 3 })),
                    record(json!({ "id": 4, "tags": ["already", "decoded"] })),
                ],
            )
            .unwrap();
        let rows = ResourceService::list(&store, &articles()).await.unwrap();
        assert_eq!(rows[0]["tags"], json!([]));
        assert_eq!(rows[1]["tags"], json!([]));
        assert_eq!(rows[2]["tags"], json!([]));
        assert_eq!(rows[3]["tags"], json!(["already", "decoded"]));
    }

    #[tokio::test]
    async fn update_never_rewrites_the_id() {
        let store = MemoryStore::new();
        ResourceService::create(&store, &articles(), record(json!({ "title": "A" })))
            .await
            .unwrap();
        let outcome = ResourceService::update(&store, &articles(), "1", record(json!({ "id": 42, "title": "B" })))
            .await
            .unwrap();
        assert_eq!(outcome.matched, 1);
        let row = outcome.first().unwrap();
        assert_eq!(row["id"], json!(1));
        assert_eq!(row["title"], json!("B"));
    }

    #[tokio::test]
    async fn update_encodes_json_fields_like_create() {
        let store = MemoryStore::new();
        ResourceService::create(&store, &articles(), record(json!({ "title": "A" })))
            .await
            .unwrap();

        ResourceService::update(&store, &articles(), "1", record(json!({ "tags": [1, 2] })))
            .await
            .unwrap();
        let stored = store.select_all("articles").await.unwrap();
        assert_eq!(stored[0]["tags"], json!("[1,2]"));

        // omitting the field overwrites it with the empty list text
        ResourceService::update(&store, &articles(), "1", record(json!({ "title": "B" })))
            .await
            .unwrap();
        let stored = store.select_all("articles").await.unwrap();
        assert_eq!(stored[0]["tags"], json!("[]"));
        assert_eq!(stored[0]["title"], json!("B"));
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_id_match_nothing() {
        let store = MemoryStore::new();
        let outcome = ResourceService::update(&store, &articles(), "404", record(json!({ "title": "B" })))
            .await
            .unwrap();
        assert_eq!(outcome.matched, 0);
        assert!(outcome.first().is_none());
        assert_eq!(ResourceService::delete(&store, &articles(), "404").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() {
        let store = MemoryStore::unavailable();
        let err = ResourceService::list(&store, &articles()).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }
}
