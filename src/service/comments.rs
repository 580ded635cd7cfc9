//! Comments attached to a parent resource row.

use crate::config::CommentsConfig;
use crate::error::AppError;
use crate::store::{Record, RecordStore};
use serde_json::Value;

pub struct CommentService;

impl CommentService {
    pub async fn list_for(
        store: &dyn RecordStore,
        comments: &CommentsConfig,
        parent_id: &str,
    ) -> Result<Vec<Record>, AppError> {
        store.select_where(&comments.table, &comments.parent_column, parent_id).await
    }

    /// Insert a comment. The parent column always comes from the path, never from the body.
    pub async fn create_for(
        store: &dyn RecordStore,
        comments: &CommentsConfig,
        parent_id: &str,
        mut body: Record,
    ) -> Result<Record, AppError> {
        body.insert(comments.parent_column.clone(), parent_value(parent_id));
        store.insert(&comments.table, &body).await
    }
}

/// Numeric ids are stored as numbers so they compare equal to integer foreign keys.
fn parent_value(parent_id: &str) -> Value {
    match parent_id.parse::<i64>() {
        Ok(n) => Value::Number(n.into()),
        Err(_) => Value::String(parent_id.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn record(v: Value) -> Record {
        v.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn comments_are_scoped_to_their_parent() {
        let store = MemoryStore::new();
        let cfg = CommentsConfig::default();
        CommentService::create_for(&store, &cfg, "1", record(json!({ "body": "first" })))
            .await
            .unwrap();
        CommentService::create_for(&store, &cfg, "2", record(json!({ "body": "other", "article_id": 1 })))
            .await
            .unwrap();

        let on_one = CommentService::list_for(&store, &cfg, "1").await.unwrap();
        assert_eq!(on_one.len(), 1);
        assert_eq!(on_one[0]["body"], json!("first"));
        assert_eq!(on_one[0]["article_id"], json!(1));

        let on_two = CommentService::list_for(&store, &cfg, "2").await.unwrap();
        assert_eq!(on_two[0]["article_id"], json!(2));
    }

    #[test]
    fn parent_values_keep_text_ids() {
        assert_eq!(parent_value("12"), json!(12));
        assert_eq!(parent_value("hello-world"), json!("hello-world"));
    }
}
