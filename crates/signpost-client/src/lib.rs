//! Signpost Client Library
//!
//! Shared content types, the canonical seed dataset, and the caching accessor
//! layer for the Signpost CMS gateway.
//!
//! ## Core concepts
//!
//! 1. **Content types** - Programs, events, announcements, opportunities,
//!    stats, impact stories, plus the AboutContent and Settings singletons.
//!    Icon/color/priority/form names are closed enums, validated at write time.
//! 2. **Seed data** - one canonical default dataset shared by the gateway's
//!    `initialize` seeding and the client's offline fallback.
//! 3. **ContentClient** - accessor layer with a 30-second bulk-snapshot cache,
//!    per-collection reads that fall back to seed data on failure, and
//!    mutations that bypass the cache.
//! 4. **AdminSession** - reactive session gate for the admin surface.
//!
//! ## Usage
//!
//! ```ignore
//! use signpost_client::{ContentClient, NewEvent};
//!
//! let cms = ContentClient::new("https://uisn.example.org");
//! cms.initialize().await?;
//!
//! // Reads never fail; they fall back to seed data when the gateway is down.
//! let programs = cms.get_programs().await;
//!
//! // Writes bypass the cache and surface failures.
//! cms.add_event(NewEvent {
//!     title: "Cleanup".into(),
//!     date: "2026-04-01".into(),
//!     location: "Park".into(),
//!     ..Default::default()
//! }).await?;
//! cms.clear_cache().await;
//! ```
//!
//! The `client` feature (default) pulls in the reqwest transport and the
//! tokio-backed cache/session. Disable it to consume types and seed data
//! only, as the gateway itself does.

pub mod cache;
pub mod error;
pub mod seed;
pub mod transport;
pub mod types;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
pub mod session;

pub use error::ClientError;
pub use transport::ContentTransport;
pub use types::{
    AboutContent, AllContent, Announcement, AnnouncementPatch, Color, Event, EventPatch,
    FormType, Icon, ImpactStory, ImpactStoryPatch, NewAnnouncement, NewEvent, NewImpactStory,
    NewOpportunity, NewProgram, Opportunity, OpportunityPatch, Priority, Program, ProgramPatch,
    Settings, Stat, StatPatch, SubmitReceipt,
};

#[cfg(feature = "client")]
pub use client::ContentClient;
#[cfg(feature = "client")]
pub use session::AdminSession;
#[cfg(feature = "client")]
pub use transport::HttpTransport;
