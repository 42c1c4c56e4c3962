//! MongoDB-backed store.
//!
//! One Mongo collection per CMS collection, singleton collections holding a
//! single document each (replaced with upsert), and an append-only
//! `form_submissions` collection.

use async_trait::async_trait;
use bson::{doc, Document};
use futures_util::TryStreamExt;
use mongodb::options::IndexOptions;
use mongodb::IndexModel;
use serde_json::Value;

use super::{Collection, ContentStore, Singleton, StoredSubmission};
use crate::db::MongoClient;
use crate::types::{Result, SignpostError};
use signpost_client::FormType;

const SUBMISSIONS_COLLECTION: &str = "form_submissions";

pub struct MongoStore {
    client: MongoClient,
}

/// Unique index on `id`. Record id uniqueness is the store's invariant, so
/// MongoDB must enforce it server-side; check-then-insert in the content
/// layer is not atomic across gateway instances.
fn unique_id_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "id": 1 })
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        *err.kind,
        mongodb::error::ErrorKind::Write(mongodb::error::WriteFailure::WriteError(ref we))
            if we.code == 11000
    )
}

impl MongoStore {
    /// Wrap a connected client and ensure the per-collection unique `id`
    /// indexes exist.
    pub async fn new(client: MongoClient) -> Result<Self> {
        let store = Self { client };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<()> {
        for collection in Collection::ALL {
            self.records(collection)
                .create_index(unique_id_index())
                .await?;
        }
        Ok(())
    }

    fn records(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.client
            .database()
            .collection::<Document>(collection.storage_name())
    }

    fn singleton(&self, singleton: Singleton) -> mongodb::Collection<Document> {
        self.client
            .database()
            .collection::<Document>(singleton.storage_name())
    }

    fn submissions(&self) -> mongodb::Collection<StoredSubmission> {
        self.client
            .database()
            .collection::<StoredSubmission>(SUBMISSIONS_COLLECTION)
    }
}

fn to_document(value: &Value) -> Result<Document> {
    bson::to_document(value).map_err(|e| SignpostError::Internal(format!("BSON encode: {e}")))
}

/// Strip Mongo's `_id` and hand back plain JSON.
fn to_value(mut document: Document) -> Result<Value> {
    document.remove("_id");
    serde_json::to_value(&document)
        .map_err(|e| SignpostError::Internal(format!("BSON decode: {e}")))
}

#[async_trait]
impl ContentStore for MongoStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        let documents: Vec<Document> = self
            .records(collection)
            .find(doc! {})
            .await?
            .try_collect()
            .await?;
        documents.into_iter().map(to_value).collect()
    }

    async fn find(&self, collection: Collection, id: &str) -> Result<Option<Value>> {
        let document = self
            .records(collection)
            .find_one(doc! { "id": id })
            .await?;
        document.map(to_value).transpose()
    }

    async fn insert(&self, collection: Collection, record: Value) -> Result<()> {
        self.records(collection)
            .insert_one(to_document(&record)?)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    let id = record.get("id").and_then(Value::as_str).unwrap_or("?");
                    SignpostError::Internal(format!("duplicate id '{id}' in {collection}"))
                } else {
                    e.into()
                }
            })?;
        Ok(())
    }

    async fn replace(&self, collection: Collection, id: &str, record: Value) -> Result<bool> {
        let result = self
            .records(collection)
            .replace_one(doc! { "id": id }, to_document(&record)?)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn remove(&self, collection: Collection, id: &str) -> Result<bool> {
        let result = self
            .records(collection)
            .delete_one(doc! { "id": id })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn count(&self, collection: Collection) -> Result<u64> {
        Ok(self.records(collection).count_documents(doc! {}).await?)
    }

    async fn get_singleton(&self, singleton: Singleton) -> Result<Option<Value>> {
        let document = self.singleton(singleton).find_one(doc! {}).await?;
        document.map(to_value).transpose()
    }

    async fn put_singleton(&self, singleton: Singleton, value: Value) -> Result<()> {
        self.singleton(singleton)
            .replace_one(doc! {}, to_document(&value)?)
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn append_submission(&self, submission: StoredSubmission) -> Result<()> {
        self.submissions().insert_one(submission).await?;
        Ok(())
    }

    async fn list_submissions(&self, form_type: Option<FormType>) -> Result<Vec<StoredSubmission>> {
        let filter = match form_type {
            Some(ft) => doc! { "formType": ft.as_str() },
            None => doc! {},
        };
        let submissions: Vec<StoredSubmission> = self
            .submissions()
            .find(filter)
            .sort(doc! { "submittedAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(submissions)
    }

    async fn ping(&self) -> Result<()> {
        self.client.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_index_is_unique_per_collection() {
        let index = unique_id_index();
        assert_eq!(index.keys, doc! { "id": 1 });
        assert_eq!(index.options.unwrap().unique, Some(true));
    }
}
