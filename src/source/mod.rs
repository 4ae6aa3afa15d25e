//! Metadata sources - fetch album and track metadata from remote catalogs.
//!
//! # Architecture
//!
//! - **Registry** (`registry.rs`) - The [`MetadataSource`] trait and the
//!   [`SourceRegistry`] that picks a source by the resource's domain
//! - **Discogs** (`discogs/`) - DTOs matching the API, an adapter to our
//!   model types and the HTTP client
//!
//! DTOs never leave their source module; everything downstream sees only
//! [`AlbumMetadata`] and [`TrackMetadata`].
//!
//! # Usage
//!
//! ```ignore
//! let registry = SourceRegistry::with_defaults(&config)?;
//! let source = registry.resolve("https://api.discogs.com/releases/249504")?;
//! let release = source.fetch(uri).await?;
//! ```

pub mod discogs;
pub mod registry;

use crate::model::{AlbumMetadata, TrackMetadata};

pub use discogs::DiscogsClient;
pub use registry::{MetadataSource, SourceRegistry, domain_of};

/// Album plus its ordered tracklist, as returned by a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub album: AlbumMetadata,
    pub tracks: Vec<TrackMetadata>,
}

/// Errors that can occur while fetching from a source
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Rate limited - try again later")]
    RateLimited,
}
