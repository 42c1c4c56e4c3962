//! Shared types for Signpost.

mod error;

pub use error::{Result, SignpostError};
