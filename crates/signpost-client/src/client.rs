//! Content accessor layer.
//!
//! `ContentClient` shields site code from per-collection round trips and from
//! gateway downtime:
//!
//! - the bulk snapshot is cached for [`crate::cache::DEFAULT_TTL`];
//! - single-collection reads serve from a valid snapshot when one exists,
//!   otherwise fall through to the per-collection endpoint;
//! - any read failure falls back to the canonical seed dataset so the public
//!   site always renders something;
//! - mutations bypass the cache entirely and surface their errors. They do
//!   NOT invalidate the snapshot — call [`ContentClient::clear_cache`] for
//!   read-your-writes, or tolerate staleness up to the TTL.

use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::warn;

use crate::cache::SnapshotCache;
use crate::error::ClientError;
use crate::seed;
use crate::transport::ContentTransport;
use crate::types::{
    AboutContent, AllContent, Announcement, AnnouncementPatch, Event, EventPatch, FormType,
    ImpactStory, ImpactStoryPatch, NewAnnouncement, NewEvent, NewImpactStory, NewOpportunity,
    NewProgram, Opportunity, OpportunityPatch, Program, ProgramPatch, Settings, Stat, StatPatch,
    SubmitReceipt,
};

pub struct ContentClient<T: ContentTransport> {
    api: T,
    cache: RwLock<SnapshotCache>,
}

#[cfg(feature = "client")]
impl ContentClient<crate::transport::HttpTransport> {
    /// Client against a gateway base URL, with the default 30-second TTL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(crate::transport::HttpTransport::new(base_url))
    }
}

impl<T: ContentTransport> ContentClient<T> {
    pub fn with_transport(api: T) -> Self {
        Self {
            api,
            cache: RwLock::new(SnapshotCache::default()),
        }
    }

    pub fn with_ttl(api: T, ttl: Duration) -> Self {
        Self {
            api,
            cache: RwLock::new(SnapshotCache::new(ttl)),
        }
    }

    /// Ask the gateway to seed default content for any absent collection.
    /// Idempotent; safe to call on every site start.
    pub async fn initialize(&self) -> Result<(), ClientError> {
        self.api.post("/cms/initialize", json!({})).await.map(|_| ())
    }

    /// Drop the cached bulk snapshot.
    pub async fn clear_cache(&self) {
        self.cache.write().await.clear();
    }

    /// The bulk content snapshot, from cache when fresh.
    ///
    /// Falls back to the seed dataset if the gateway cannot be reached; the
    /// fallback is not cached, so the next read tries the network again.
    pub async fn get_all(&self) -> AllContent {
        let now = Instant::now();
        if let Some(snapshot) = self.cache.read().await.get(now) {
            return snapshot.clone();
        }

        match self.api.get("/cms/all").await.and_then(decode::<AllContent>) {
            Ok(all) => {
                self.cache.write().await.put(all.clone(), now);
                all
            }
            Err(e) => {
                warn!("bulk content fetch failed, serving seed defaults: {e}");
                seed::default_content()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Collection reads (snapshot first, then endpoint, then seed fallback)
    // -------------------------------------------------------------------------

    pub async fn get_programs(&self) -> Vec<Program> {
        self.read_collection("/cms/programs", |all| all.programs.clone(), seed::default_programs)
            .await
    }

    pub async fn get_events(&self) -> Vec<Event> {
        self.read_collection("/cms/events", |all| all.events.clone(), seed::default_events)
            .await
    }

    pub async fn get_announcements(&self) -> Vec<Announcement> {
        self.read_collection(
            "/cms/announcements",
            |all| all.announcements.clone(),
            seed::default_announcements,
        )
        .await
    }

    pub async fn get_opportunities(&self) -> Vec<Opportunity> {
        self.read_collection(
            "/cms/opportunities",
            |all| all.opportunities.clone(),
            seed::default_opportunities,
        )
        .await
    }

    pub async fn get_stats(&self) -> Vec<Stat> {
        self.read_collection("/cms/stats", |all| all.stats.clone(), seed::default_stats)
            .await
    }

    pub async fn get_impact_stories(&self) -> Vec<ImpactStory> {
        self.read_collection(
            "/cms/impact-stories",
            |all| all.impact_stories.clone(),
            seed::default_impact_stories,
        )
        .await
    }

    pub async fn get_about(&self) -> AboutContent {
        self.read_collection("/cms/about", |all| all.about.clone(), seed::default_about)
            .await
    }

    pub async fn get_settings(&self) -> Settings {
        self.read_collection("/cms/settings", |all| all.settings.clone(), seed::default_settings)
            .await
    }

    async fn read_collection<R: DeserializeOwned>(
        &self,
        path: &str,
        pick: impl Fn(&AllContent) -> R,
        fallback: impl Fn() -> R,
    ) -> R {
        let now = Instant::now();
        if let Some(snapshot) = self.cache.read().await.get(now) {
            return pick(snapshot);
        }

        match self.api.get(path).await.and_then(decode::<R>) {
            Ok(records) => records,
            Err(e) => {
                warn!("read of {path} failed, serving seed defaults: {e}");
                fallback()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Mutations (cache bypass; failures always surface)
    // -------------------------------------------------------------------------

    pub async fn add_program(&self, new: NewProgram) -> Result<Program, ClientError> {
        self.create("/cms/programs", &new).await
    }

    pub async fn update_program(&self, id: &str, patch: ProgramPatch) -> Result<(), ClientError> {
        self.patch(&format!("/cms/programs/{id}"), &patch).await
    }

    pub async fn delete_program(&self, id: &str) -> Result<(), ClientError> {
        self.remove(&format!("/cms/programs/{id}")).await
    }

    pub async fn add_event(&self, new: NewEvent) -> Result<Event, ClientError> {
        self.create("/cms/events", &new).await
    }

    pub async fn update_event(&self, id: &str, patch: EventPatch) -> Result<(), ClientError> {
        self.patch(&format!("/cms/events/{id}"), &patch).await
    }

    pub async fn delete_event(&self, id: &str) -> Result<(), ClientError> {
        self.remove(&format!("/cms/events/{id}")).await
    }

    pub async fn add_announcement(
        &self,
        new: NewAnnouncement,
    ) -> Result<Announcement, ClientError> {
        self.create("/cms/announcements", &new).await
    }

    pub async fn update_announcement(
        &self,
        id: &str,
        patch: AnnouncementPatch,
    ) -> Result<(), ClientError> {
        self.patch(&format!("/cms/announcements/{id}"), &patch).await
    }

    pub async fn delete_announcement(&self, id: &str) -> Result<(), ClientError> {
        self.remove(&format!("/cms/announcements/{id}")).await
    }

    pub async fn add_opportunity(&self, new: NewOpportunity) -> Result<Opportunity, ClientError> {
        self.create("/cms/opportunities", &new).await
    }

    pub async fn update_opportunity(
        &self,
        id: &str,
        patch: OpportunityPatch,
    ) -> Result<(), ClientError> {
        self.patch(&format!("/cms/opportunities/{id}"), &patch).await
    }

    pub async fn delete_opportunity(&self, id: &str) -> Result<(), ClientError> {
        self.remove(&format!("/cms/opportunities/{id}")).await
    }

    /// Stats are update-only; there is no add or delete.
    pub async fn update_stat(&self, id: &str, patch: StatPatch) -> Result<(), ClientError> {
        self.patch(&format!("/cms/stats/{id}"), &patch).await
    }

    pub async fn add_impact_story(&self, new: NewImpactStory) -> Result<ImpactStory, ClientError> {
        self.create("/cms/impact-stories", &new).await
    }

    pub async fn update_impact_story(
        &self,
        id: &str,
        patch: ImpactStoryPatch,
    ) -> Result<(), ClientError> {
        self.patch(&format!("/cms/impact-stories/{id}"), &patch).await
    }

    pub async fn delete_impact_story(&self, id: &str) -> Result<(), ClientError> {
        self.remove(&format!("/cms/impact-stories/{id}")).await
    }

    pub async fn save_about(&self, about: &AboutContent) -> Result<(), ClientError> {
        self.api
            .put("/cms/about", serde_json::to_value(about)?)
            .await
            .map(|_| ())
    }

    pub async fn save_settings(&self, settings: &Settings) -> Result<(), ClientError> {
        self.api
            .put("/cms/settings", serde_json::to_value(settings)?)
            .await
            .map(|_| ())
    }

    /// Submit a public form. Always talks to the gateway; there is no
    /// fallback for writes.
    pub async fn submit_form(
        &self,
        form_type: FormType,
        data: Value,
    ) -> Result<SubmitReceipt, ClientError> {
        let body = json!({ "formType": form_type, "data": data });
        self.api.post("/forms/submit", body).await.and_then(decode)
    }

    async fn create<R: DeserializeOwned>(
        &self,
        path: &str,
        payload: &impl serde::Serialize,
    ) -> Result<R, ClientError> {
        self.api
            .post(path, serde_json::to_value(payload)?)
            .await
            .and_then(decode)
    }

    async fn patch(
        &self,
        path: &str,
        payload: &impl serde::Serialize,
    ) -> Result<(), ClientError> {
        self.api
            .put(path, serde_json::to_value(payload)?)
            .await
            .map(|_| ())
    }

    async fn remove(&self, path: &str) -> Result<(), ClientError> {
        self.api.delete(path).await.map(|_| ())
    }
}

fn decode<R: DeserializeOwned>(value: Value) -> Result<R, ClientError> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}
