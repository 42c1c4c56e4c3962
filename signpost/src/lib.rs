//! Signpost - content gateway for the UISN volunteer network site
//!
//! Signpost serves the site's CMS content over a small REST API backed by
//! MongoDB, collects form submissions, and gates the admin dashboard behind a
//! single credential pair.
//!
//! ## Services
//!
//! - **Content API**: CRUD over the CMS collections and singletons, bulk
//!   snapshot reads, and idempotent default-content seeding
//! - **Form sink**: append-only submission storage with fire-and-forget
//!   notifications
//! - **Admin gate**: stateless credential check for the dashboard login

pub mod auth;
pub mod config;
pub mod content;
pub mod db;
pub mod notify;
pub mod routes;
pub mod server;
pub mod store;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{Result, SignpostError};
