//! Adapter layer: Convert Discogs DTOs to model types
//!
//! This is the ONLY place where Discogs DTOs become [`AlbumMetadata`] and
//! [`TrackMetadata`].

use super::dto;
use crate::model::{AlbumMetadata, TrackMetadata};
use crate::source::Release;

/// Convert a release response into album metadata plus its tracks.
///
/// Headings and index entries are dropped: they are not files on disk.
pub fn to_release(response: dto::ReleaseResponse) -> Release {
    let tracks: Vec<TrackMetadata> = response
        .tracklist
        .into_iter()
        .filter(|t| t.track_type == "track")
        .map(|t| TrackMetadata::new(t.position, t.title, t.duration))
        .collect();

    let artists = response.artists.into_iter().map(|a| a.name).collect();

    let album = AlbumMetadata::new(response.title, artists, response.genres, response.year, &tracks);

    Release { album, tracks }
}
