//! In-memory store for dev mode and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, ContentStore, Singleton, StoredSubmission};
use crate::types::{Result, SignpostError};
use signpost_client::FormType;

/// Non-persistent store. Insertion order is preserved per collection.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Value>>>,
    singletons: RwLock<HashMap<Singleton, Value>>,
    submissions: RwLock<Vec<StoredSubmission>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn find(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .and_then(|records| records.iter().find(|r| record_id(r) == Some(id)))
            .cloned())
    }

    async fn insert(&self, collection: Collection, record: Value) -> Result<()> {
        let id = record_id(&record)
            .ok_or_else(|| SignpostError::Internal("record missing id".into()))?
            .to_string();

        let mut collections = self.collections.write().await;
        let records = collections.entry(collection).or_default();
        if records.iter().any(|r| record_id(r) == Some(id.as_str())) {
            return Err(SignpostError::Internal(format!(
                "duplicate id '{id}' in {collection}"
            )));
        }
        records.push(record);
        Ok(())
    }

    async fn replace(&self, collection: Collection, id: &str, record: Value) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        match records.iter_mut().find(|r| record_id(r) == Some(id)) {
            Some(slot) => {
                *slot = record;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<bool> {
        let mut collections = self.collections.write().await;
        let Some(records) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|r| record_id(r) != Some(id));
        Ok(records.len() < before)
    }

    async fn count(&self, collection: Collection) -> Result<u64> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).map_or(0, |r| r.len() as u64))
    }

    async fn get_singleton(&self, singleton: Singleton) -> Result<Option<Value>> {
        Ok(self.singletons.read().await.get(&singleton).cloned())
    }

    async fn put_singleton(&self, singleton: Singleton, value: Value) -> Result<()> {
        self.singletons.write().await.insert(singleton, value);
        Ok(())
    }

    async fn append_submission(&self, submission: StoredSubmission) -> Result<()> {
        self.submissions.write().await.push(submission);
        Ok(())
    }

    async fn list_submissions(&self, form_type: Option<FormType>) -> Result<Vec<StoredSubmission>> {
        let submissions = self.submissions.read().await;
        let mut matching: Vec<StoredSubmission> = submissions
            .iter()
            .filter(|s| form_type.is_none_or(|ft| s.form_type == ft))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(matching)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_find_replace_remove() {
        let store = MemoryStore::new();
        let record = json!({ "id": "a", "title": "First" });

        store.insert(Collection::Programs, record).await.unwrap();
        assert_eq!(store.count(Collection::Programs).await.unwrap(), 1);

        let found = store.find(Collection::Programs, "a").await.unwrap().unwrap();
        assert_eq!(found["title"], "First");

        let replaced = store
            .replace(Collection::Programs, "a", json!({ "id": "a", "title": "Second" }))
            .await
            .unwrap();
        assert!(replaced);
        let found = store.find(Collection::Programs, "a").await.unwrap().unwrap();
        assert_eq!(found["title"], "Second");

        assert!(store.remove(Collection::Programs, "a").await.unwrap());
        assert!(!store.remove(Collection::Programs, "a").await.unwrap());
        assert!(store.find(Collection::Programs, "a").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_ids_are_rejected() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Events, json!({ "id": "e1" }))
            .await
            .unwrap();
        assert!(store
            .insert(Collection::Events, json!({ "id": "e1" }))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn replace_of_missing_id_reports_absent() {
        let store = MemoryStore::new();
        let replaced = store
            .replace(Collection::Events, "ghost", json!({ "id": "ghost" }))
            .await
            .unwrap();
        assert!(!replaced);
    }

    #[tokio::test]
    async fn singletons_overwrite_in_place() {
        let store = MemoryStore::new();
        assert!(store.get_singleton(Singleton::About).await.unwrap().is_none());

        store
            .put_singleton(Singleton::About, json!({ "mission": "a", "story": "b" }))
            .await
            .unwrap();
        store
            .put_singleton(Singleton::About, json!({ "mission": "c", "story": "d" }))
            .await
            .unwrap();

        let about = store.get_singleton(Singleton::About).await.unwrap().unwrap();
        assert_eq!(about["mission"], "c");
    }

    #[tokio::test]
    async fn submissions_list_newest_first_with_filter() {
        let store = MemoryStore::new();
        for (id, form_type, at) in [
            ("1", FormType::Contact, "2026-02-01T08:00:00+00:00"),
            ("2", FormType::Newsletter, "2026-02-01T09:00:00+00:00"),
            ("3", FormType::Newsletter, "2026-02-01T10:00:00+00:00"),
        ] {
            store
                .append_submission(StoredSubmission {
                    id: id.into(),
                    form_type,
                    data: json!({}),
                    submitted_at: at.into(),
                })
                .await
                .unwrap();
        }

        let all = store.list_submissions(None).await.unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "3");

        let newsletters = store
            .list_submissions(Some(FormType::Newsletter))
            .await
            .unwrap();
        assert_eq!(newsletters.len(), 2);
        assert!(newsletters.iter().all(|s| s.form_type == FormType::Newsletter));
    }
}
