//! Persistent store abstraction.
//!
//! The store holds named collections of JSON records keyed by `id`, two
//! singleton documents (about, settings), and an append-only form-submission
//! log. `MongoStore` is the production implementation; `MemoryStore` backs
//! dev mode and tests.

pub mod memory;
pub mod mongo_store;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::Result;
use signpost_client::FormType;

pub use memory::MemoryStore;
pub use mongo_store::MongoStore;

/// The CMS collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Programs,
    Events,
    Announcements,
    Opportunities,
    Stats,
    ImpactStories,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Programs,
        Collection::Events,
        Collection::Announcements,
        Collection::Opportunities,
        Collection::Stats,
        Collection::ImpactStories,
    ];

    /// Name as it appears in URL paths.
    pub fn path_name(&self) -> &'static str {
        match self {
            Self::Programs => "programs",
            Self::Events => "events",
            Self::Announcements => "announcements",
            Self::Opportunities => "opportunities",
            Self::Stats => "stats",
            Self::ImpactStories => "impact-stories",
        }
    }

    /// Name of the backing storage collection.
    pub fn storage_name(&self) -> &'static str {
        match self {
            Self::ImpactStories => "impact_stories",
            other => other.path_name(),
        }
    }

    pub fn from_path(segment: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.path_name() == segment)
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_name())
    }
}

/// The singleton documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Singleton {
    About,
    Settings,
}

impl Singleton {
    pub fn storage_name(&self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Settings => "settings",
        }
    }
}

/// A recorded form submission. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSubmission {
    pub id: String,
    pub form_type: FormType,
    pub data: Value,
    /// RFC 3339 timestamp; lexicographic order is chronological order.
    pub submitted_at: String,
}

/// Storage operations the content layer builds on.
///
/// Records are JSON objects carrying a unique `id` within their collection;
/// id uniqueness is the store's responsibility, not the caller's. Any
/// connectivity failure surfaces as `SignpostError::Unavailable` — the store
/// never retries internally.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All records in a collection, active or not.
    async fn list(&self, collection: Collection) -> Result<Vec<Value>>;

    async fn find(&self, collection: Collection, id: &str) -> Result<Option<Value>>;

    /// Insert a record. The record's `id` must not already exist.
    async fn insert(&self, collection: Collection, record: Value) -> Result<()>;

    /// Replace the record with the given id. Returns false if absent.
    async fn replace(&self, collection: Collection, id: &str, record: Value) -> Result<bool>;

    /// Hard-remove the record with the given id. Returns false if absent.
    async fn remove(&self, collection: Collection, id: &str) -> Result<bool>;

    async fn count(&self, collection: Collection) -> Result<u64>;

    async fn get_singleton(&self, singleton: Singleton) -> Result<Option<Value>>;

    async fn put_singleton(&self, singleton: Singleton, value: Value) -> Result<()>;

    async fn append_submission(&self, submission: StoredSubmission) -> Result<()>;

    /// Submissions, newest first, optionally filtered by form type.
    async fn list_submissions(&self, form_type: Option<FormType>) -> Result<Vec<StoredSubmission>>;

    /// Connectivity probe for the readiness endpoint.
    async fn ping(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_path_names_round_trip() {
        for collection in Collection::ALL {
            assert_eq!(Collection::from_path(collection.path_name()), Some(collection));
        }
        assert_eq!(Collection::from_path("impact-stories"), Some(Collection::ImpactStories));
        assert_eq!(Collection::from_path("impact_stories"), None);
        assert_eq!(Collection::from_path("users"), None);
    }

    #[test]
    fn storage_names_use_underscores() {
        assert_eq!(Collection::ImpactStories.storage_name(), "impact_stories");
        assert_eq!(Collection::Programs.storage_name(), "programs");
    }

    #[test]
    fn submission_serializes_with_camel_case_keys() {
        let submission = StoredSubmission {
            id: "1".into(),
            form_type: FormType::Newsletter,
            data: serde_json::json!({ "email": "a@b.com" }),
            submitted_at: "2026-02-01T10:00:00+00:00".into(),
        };
        let value = serde_json::to_value(&submission).unwrap();
        assert_eq!(value["formType"], "newsletter");
        assert_eq!(value["submittedAt"], "2026-02-01T10:00:00+00:00");
    }
}
