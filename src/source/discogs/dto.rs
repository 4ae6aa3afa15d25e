//! Discogs API Data Transfer Objects
//!
//! These types match what the Discogs `/releases/{id}` endpoint returns.
//! Only the fields we read are declared; serde ignores the rest.
//! DO NOT use these types outside the discogs module - convert to model types.
//!
//! API Reference: https://www.discogs.com/developers#page:database,header:database-release

use serde::{Deserialize, Serialize};

/// Release lookup response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseResponse {
    /// Discogs release ID
    pub id: u64,
    /// Release title
    pub title: String,
    /// Release year (0 when unknown)
    #[serde(default)]
    pub year: u32,
    /// Genre names
    #[serde(default)]
    pub genres: Vec<String>,
    /// Credited artists
    #[serde(default)]
    pub artists: Vec<Artist>,
    /// Tracklist, including headings and index entries
    #[serde(default)]
    pub tracklist: Vec<Track>,
}

/// Artist credit
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Artist {
    /// Artist name as stored by Discogs
    pub name: String,
}

/// Tracklist entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    /// Position label ("1", "A1", "CD2-3"; empty for headings)
    #[serde(default)]
    pub position: String,
    pub title: String,
    /// Duration as "M:SS" (may be empty)
    #[serde(default)]
    pub duration: String,
    /// Entry kind: "track", "heading" or "index"
    #[serde(rename = "type_", default = "default_track_type")]
    pub track_type: String,
}

fn default_track_type() -> String {
    "track".to_string()
}

/// Error body returned alongside non-2xx statuses
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub message: String,
}
