//! Content service: CRUD over the CMS collections and singletons, seeding,
//! and the form submission sink.
//!
//! All records are held as canonical JSON. Writes always pass through the
//! typed entity structs, so unknown fields are dropped and closed enum names
//! (icons, colors, priorities) are rejected before anything is stored.

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::notify;
use crate::store::{Collection, ContentStore, Singleton, StoredSubmission};
use crate::types::{Result, SignpostError};
use signpost_client::types::{
    AboutContent, AllContent, Announcement, Event, FormType, ImpactStory, NewAnnouncement,
    NewEvent, NewImpactStory, NewOpportunity, NewProgram, Opportunity, Program, Settings, Stat,
    SubmitReceipt,
};
use signpost_client::seed;

#[derive(Clone)]
pub struct ContentService {
    store: Arc<dyn ContentStore>,
}

impl ContentService {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    // -------------------------------------------------------------------------
    // Collections
    // -------------------------------------------------------------------------

    pub async fn list(&self, collection: Collection) -> Result<Vec<Value>> {
        self.store.list(collection).await
    }

    /// Create a record. The server assigns `id` and sets `active`; required
    /// string fields must be non-blank. Stats are a fixed set and cannot be
    /// created, only updated.
    pub async fn create(&self, collection: Collection, body: Value) -> Result<Value> {
        let record = match collection {
            Collection::Programs => {
                let new: NewProgram = parse_payload(collection, body)?;
                canonical(
                    collection,
                    Program {
                        id: new_id(),
                        title: new.title,
                        description: new.description,
                        frequency: new.frequency,
                        location: new.location,
                        impact: new.impact,
                        icon: new.icon,
                        color: new.color,
                        active: true,
                        slug: new.slug,
                    },
                )?
            }
            Collection::Events => {
                let new: NewEvent = parse_payload(collection, body)?;
                canonical(
                    collection,
                    Event {
                        id: new_id(),
                        title: new.title,
                        date: new.date,
                        time: new.time,
                        location: new.location,
                        description: new.description,
                        registration_link: new.registration_link,
                        image: new.image,
                        active: true,
                    },
                )?
            }
            Collection::Announcements => {
                let new: NewAnnouncement = parse_payload(collection, body)?;
                canonical(
                    collection,
                    Announcement {
                        id: new_id(),
                        title: new.title,
                        content: new.content,
                        date: Utc::now().format("%Y-%m-%d").to_string(),
                        priority: new.priority,
                        active: true,
                    },
                )?
            }
            Collection::Opportunities => {
                let new: NewOpportunity = parse_payload(collection, body)?;
                canonical(
                    collection,
                    Opportunity {
                        id: new_id(),
                        title: new.title,
                        description: new.description,
                        category: new.category,
                        commitment: new.commitment,
                        skills: new.skills,
                        active: true,
                    },
                )?
            }
            Collection::Stats => {
                return Err(SignpostError::Validation(
                    "stats are a fixed set; update an existing entry instead".into(),
                ));
            }
            Collection::ImpactStories => {
                let new: NewImpactStory = parse_payload(collection, body)?;
                canonical(
                    collection,
                    ImpactStory {
                        id: new_id(),
                        title: new.title,
                        description: new.description,
                        image: new.image,
                        active: true,
                    },
                )?
            }
        };
        self.store.insert(collection, record.clone()).await?;
        Ok(record)
    }

    /// Merge-update a record. Fields present in the patch overwrite; `id` is
    /// immutable. The merged result is re-validated through the typed entity,
    /// so a patch can never leave a record in a shape a create would reject.
    pub async fn update(&self, collection: Collection, id: &str, patch: Value) -> Result<Value> {
        let patch = patch
            .as_object()
            .ok_or_else(|| SignpostError::Validation("update body must be a JSON object".into()))?
            .clone();

        let current = self
            .store
            .find(collection, id)
            .await?
            .ok_or_else(|| not_found(collection, id))?;

        let mut merged = current
            .as_object()
            .cloned()
            .unwrap_or_default();
        for (key, value) in patch {
            if key == "id" {
                continue;
            }
            merged.insert(key, value);
        }

        let record = canonical_value(collection, Value::Object(merged))?;
        if !self.store.replace(collection, id, record.clone()).await? {
            return Err(not_found(collection, id));
        }
        Ok(record)
    }

    pub async fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        if collection == Collection::Stats {
            return Err(SignpostError::Validation(
                "stats are a fixed set and cannot be deleted".into(),
            ));
        }
        if !self.store.remove(collection, id).await? {
            return Err(not_found(collection, id));
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Singletons
    // -------------------------------------------------------------------------

    pub async fn get_about(&self) -> Result<AboutContent> {
        match self.store.get_singleton(Singleton::About).await? {
            Some(value) => decode_singleton(value),
            None => Ok(AboutContent {
                mission: String::new(),
                story: String::new(),
            }),
        }
    }

    pub async fn put_about(&self, body: Value) -> Result<AboutContent> {
        let about: AboutContent = serde_json::from_value(body)
            .map_err(|e| SignpostError::Validation(format!("invalid about content: {e}")))?;
        self.store
            .put_singleton(Singleton::About, encode(&about)?)
            .await?;
        Ok(about)
    }

    pub async fn get_settings(&self) -> Result<Settings> {
        match self.store.get_singleton(Singleton::Settings).await? {
            Some(value) => decode_singleton(value),
            None => Ok(seed::default_settings()),
        }
    }

    pub async fn put_settings(&self, body: Value) -> Result<Settings> {
        let settings: Settings = serde_json::from_value(body)
            .map_err(|e| SignpostError::Validation(format!("invalid settings: {e}")))?;
        self.store
            .put_singleton(Singleton::Settings, encode(&settings)?)
            .await?;
        Ok(settings)
    }

    // -------------------------------------------------------------------------
    // Bulk read and seeding
    // -------------------------------------------------------------------------

    /// Read every collection and singleton in one pass.
    pub async fn get_all(&self) -> Result<AllContent> {
        Ok(AllContent {
            programs: self.list_typed(Collection::Programs).await?,
            events: self.list_typed(Collection::Events).await?,
            announcements: self.list_typed(Collection::Announcements).await?,
            opportunities: self.list_typed(Collection::Opportunities).await?,
            stats: self.list_typed(Collection::Stats).await?,
            impact_stories: self.list_typed(Collection::ImpactStories).await?,
            about: self.get_about().await?,
            settings: self.get_settings().await?,
        })
    }

    /// Seed absent content from the default dataset. Each collection is
    /// seeded independently and only when empty, so re-running never
    /// duplicates records or overwrites live edits. Returns the names of
    /// whatever was actually seeded.
    pub async fn initialize(&self) -> Result<Vec<String>> {
        let defaults = seed::default_content();
        let mut seeded = Vec::new();

        for collection in Collection::ALL {
            if self.store.count(collection).await? > 0 {
                continue;
            }
            let records = match collection {
                Collection::Programs => encode_all(&defaults.programs)?,
                Collection::Events => encode_all(&defaults.events)?,
                Collection::Announcements => encode_all(&defaults.announcements)?,
                Collection::Opportunities => encode_all(&defaults.opportunities)?,
                Collection::Stats => encode_all(&defaults.stats)?,
                Collection::ImpactStories => encode_all(&defaults.impact_stories)?,
            };
            for record in records {
                self.store.insert(collection, record).await?;
            }
            seeded.push(collection.path_name().to_string());
        }

        if self.store.get_singleton(Singleton::About).await?.is_none() {
            self.store
                .put_singleton(Singleton::About, encode(&defaults.about)?)
                .await?;
            seeded.push("about".to_string());
        }
        if self
            .store
            .get_singleton(Singleton::Settings)
            .await?
            .is_none()
        {
            self.store
                .put_singleton(Singleton::Settings, encode(&defaults.settings)?)
                .await?;
            seeded.push("settings".to_string());
        }

        if seeded.is_empty() {
            info!("content already present, nothing to seed");
        } else {
            info!(seeded = ?seeded, "seeded default content");
        }
        Ok(seeded)
    }

    // -------------------------------------------------------------------------
    // Form submissions
    // -------------------------------------------------------------------------

    /// Record a form submission and fire the notification task. Storage
    /// failure fails the call; notification failure never does.
    pub async fn submit_form(&self, form_type: FormType, data: Value) -> Result<SubmitReceipt> {
        let submission = StoredSubmission {
            id: new_id(),
            form_type,
            data: data.clone(),
            submitted_at: Utc::now().to_rfc3339(),
        };
        self.store.append_submission(submission).await?;
        info!(form_type = %form_type, "form submission recorded");
        notify::spawn_notification(form_type, data);
        Ok(SubmitReceipt {
            success: true,
            message: "Form submitted successfully".to_string(),
        })
    }

    pub async fn list_submissions(
        &self,
        form_type: Option<FormType>,
    ) -> Result<Vec<StoredSubmission>> {
        self.store.list_submissions(form_type).await
    }

    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await
    }

    async fn list_typed<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>> {
        let records = self.store.list(collection).await?;
        serde_json::from_value(Value::Array(records))
            .map_err(|e| SignpostError::Internal(format!("corrupt {collection} record: {e}")))
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(collection: Collection, id: &str) -> SignpostError {
    SignpostError::NotFound(format!("no {collection} record with id {id}"))
}

fn parse_payload<T: DeserializeOwned>(collection: Collection, body: Value) -> Result<T> {
    serde_json::from_value(body)
        .map_err(|e| SignpostError::Validation(format!("invalid {collection} payload: {e}")))
}

fn encode<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| SignpostError::Internal(format!("encode: {e}")))
}

fn encode_all<T: Serialize>(values: &[T]) -> Result<Vec<Value>> {
    values.iter().map(encode).collect()
}

fn decode_singleton<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| SignpostError::Internal(format!("corrupt singleton: {e}")))
}

fn require_filled(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SignpostError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Validate a typed entity and serialize it back to canonical JSON.
fn canonical<T: Serialize>(collection: Collection, entity: T) -> Result<Value> {
    let value = encode(&entity)?;
    // Required-string checks run on the canonical form so create and update
    // share one rule set.
    check_required(collection, &value)?;
    Ok(value)
}

/// Re-parse a merged JSON object through the entity type for its collection,
/// then serialize the typed value back. Unknown fields disappear and enum
/// fields are validated as a side effect of the round trip.
fn canonical_value(collection: Collection, merged: Value) -> Result<Value> {
    match collection {
        Collection::Programs => canonical(collection, parse_entity::<Program>(collection, merged)?),
        Collection::Events => canonical(collection, parse_entity::<Event>(collection, merged)?),
        Collection::Announcements => {
            canonical(collection, parse_entity::<Announcement>(collection, merged)?)
        }
        Collection::Opportunities => {
            canonical(collection, parse_entity::<Opportunity>(collection, merged)?)
        }
        Collection::Stats => canonical(collection, parse_entity::<Stat>(collection, merged)?),
        Collection::ImpactStories => {
            canonical(collection, parse_entity::<ImpactStory>(collection, merged)?)
        }
    }
}

fn parse_entity<T: DeserializeOwned>(collection: Collection, value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| SignpostError::Validation(format!("invalid {collection} record: {e}")))
}

fn check_required(collection: Collection, record: &Value) -> Result<()> {
    let fields: &[&'static str] = match collection {
        Collection::Programs => &[
            "title",
            "description",
            "frequency",
            "location",
            "impact",
            "slug",
        ],
        Collection::Events => &["title", "date", "location"],
        Collection::Announcements => &["title", "content"],
        Collection::Opportunities => &["title", "description"],
        Collection::Stats => &["label", "value", "description"],
        Collection::ImpactStories => &["title", "description", "image"],
    };
    for field in fields {
        let text = record
            .get(field)
            .and_then(Value::as_str)
            .unwrap_or_default();
        require_filled(field, text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn service() -> ContentService {
        ContentService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn initialize_seeds_once_and_is_idempotent() {
        let svc = service();

        let first = svc.initialize().await.unwrap();
        assert_eq!(first.len(), 8);

        let programs = svc.list(Collection::Programs).await.unwrap();
        assert_eq!(programs.len(), 4);
        let slugs: Vec<&str> = programs
            .iter()
            .map(|p| p["slug"].as_str().unwrap())
            .collect();
        assert_eq!(
            slugs,
            vec!["create-chapter", "service-event", "join-network", "leadership"]
        );

        let second = svc.initialize().await.unwrap();
        assert!(second.is_empty());
        assert_eq!(svc.list(Collection::Programs).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn initialize_refills_only_empty_collections() {
        let svc = service();
        svc.initialize().await.unwrap();

        let events = svc.list(Collection::Events).await.unwrap();
        for event in &events {
            svc.delete(Collection::Events, event["id"].as_str().unwrap())
                .await
                .unwrap();
        }

        let seeded = svc.initialize().await.unwrap();
        assert_eq!(seeded, vec!["events"]);
        assert_eq!(svc.list(Collection::Events).await.unwrap().len(), 1);
        assert_eq!(svc.list(Collection::Programs).await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn create_assigns_id_and_marks_active() {
        let svc = service();
        let body = json!({
            "title": "Fall Service Day",
            "date": "2026-10-03",
            "location": "Liberty Park"
        });

        let created = svc.create(Collection::Events, body).await.unwrap();
        let id = created["id"].as_str().unwrap();
        assert!(!id.is_empty());
        assert_eq!(created["active"], true);
        assert_eq!(created["title"], "Fall Service Day");

        let listed = svc.list(Collection::Events).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0]["id"], id);
    }

    #[tokio::test]
    async fn create_rejects_blank_required_fields_and_persists_nothing() {
        let svc = service();
        let body = json!({
            "title": "  ",
            "date": "2026-10-03",
            "location": "Liberty Park"
        });

        let err = svc.create(Collection::Events, body).await.unwrap_err();
        assert!(matches!(err, SignpostError::Validation(_)));
        assert!(svc.list(Collection::Events).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_unknown_icon_name() {
        let svc = service();
        let body = json!({
            "title": "T", "description": "D", "frequency": "F",
            "location": "L", "impact": "I", "slug": "t",
            "icon": "Sparkles", "color": "secondary"
        });
        let err = svc.create(Collection::Programs, body).await.unwrap_err();
        assert!(matches!(err, SignpostError::Validation(_)));
    }

    #[tokio::test]
    async fn stats_cannot_be_created_or_deleted() {
        let svc = service();
        svc.initialize().await.unwrap();

        let create = svc
            .create(Collection::Stats, json!({"label": "X", "value": "1", "description": "d"}))
            .await;
        assert!(matches!(create, Err(SignpostError::Validation(_))));

        let stats = svc.list(Collection::Stats).await.unwrap();
        let id = stats[0]["id"].as_str().unwrap().to_string();
        let delete = svc.delete(Collection::Stats, &id).await;
        assert!(matches!(delete, Err(SignpostError::Validation(_))));
    }

    #[tokio::test]
    async fn update_changes_only_supplied_fields() {
        let svc = service();
        svc.initialize().await.unwrap();

        let stats = svc.list(Collection::Stats).await.unwrap();
        let id = stats[0]["id"].as_str().unwrap().to_string();
        let before_label = stats[0]["label"].clone();

        let updated = svc
            .update(Collection::Stats, &id, json!({"value": "2,000+"}))
            .await
            .unwrap();
        assert_eq!(updated["value"], "2,000+");
        assert_eq!(updated["label"], before_label);
    }

    #[tokio::test]
    async fn update_ignores_id_in_patch_and_drops_unknown_fields() {
        let svc = service();
        let created = svc
            .create(
                Collection::Opportunities,
                json!({"title": "Tutor", "description": "Weekly tutoring"}),
            )
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        let updated = svc
            .update(
                Collection::Opportunities,
                &id,
                json!({"id": "hijacked", "title": "Mentor", "bogus": 1}),
            )
            .await
            .unwrap();
        assert_eq!(updated["id"], id.as_str());
        assert_eq!(updated["title"], "Mentor");
        assert!(updated.get("bogus").is_none());
    }

    #[tokio::test]
    async fn update_missing_record_is_not_found() {
        let svc = service();
        let err = svc
            .update(Collection::Events, "nope", json!({"title": "X"}))
            .await
            .unwrap_err();
        assert!(matches!(err, SignpostError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_is_not_found() {
        let svc = service();
        let created = svc
            .create(
                Collection::ImpactStories,
                json!({"title": "S", "description": "D", "image": "img.jpg"}),
            )
            .await
            .unwrap();
        let id = created["id"].as_str().unwrap().to_string();

        svc.delete(Collection::ImpactStories, &id).await.unwrap();
        assert!(svc.list(Collection::ImpactStories).await.unwrap().is_empty());

        let err = svc.delete(Collection::ImpactStories, &id).await.unwrap_err();
        assert!(matches!(err, SignpostError::NotFound(_)));
    }

    #[tokio::test]
    async fn announcement_date_is_server_assigned() {
        let svc = service();
        let created = svc
            .create(
                Collection::Announcements,
                json!({"title": "Heads up", "content": "Details", "priority": "high"}),
            )
            .await
            .unwrap();
        let date = created["date"].as_str().unwrap();
        assert_eq!(date.len(), 10);
        assert_eq!(&date[4..5], "-");
    }

    #[tokio::test]
    async fn singletons_fall_back_when_absent() {
        let svc = service();

        let about = svc.get_about().await.unwrap();
        assert!(about.mission.is_empty());

        let settings = svc.get_settings().await.unwrap();
        assert_eq!(settings, seed::default_settings());
    }

    #[tokio::test]
    async fn settings_round_trip_through_put() {
        let svc = service();
        let saved = svc
            .put_settings(json!({"donateEnabled": true, "emailNotifications": "web@uisn.org"}))
            .await
            .unwrap();
        assert!(saved.donate_enabled);

        let loaded = svc.get_settings().await.unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn get_all_combines_collections_and_singletons() {
        let svc = service();
        svc.initialize().await.unwrap();

        let all = svc.get_all().await.unwrap();
        assert_eq!(all.programs.len(), 4);
        assert_eq!(all.stats.len(), 4);
        assert_eq!(all.settings, seed::default_settings());
        assert!(!all.about.mission.is_empty());
    }

    #[tokio::test]
    async fn form_submissions_append_and_filter() {
        let svc = service();

        let receipt = svc
            .submit_form(FormType::Newsletter, json!({"email": "student@uvu.edu"}))
            .await
            .unwrap();
        assert!(receipt.success);

        svc.submit_form(FormType::Contact, json!({"name": "A", "message": "hi"}))
            .await
            .unwrap();

        let all = svc.list_submissions(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let newsletters = svc
            .list_submissions(Some(FormType::Newsletter))
            .await
            .unwrap();
        assert_eq!(newsletters.len(), 1);
        assert_eq!(newsletters[0].data["email"], "student@uvu.edu");
    }
}
