//! Audio file metadata reading and writing.
//!
//! Uses the lofty crate for format-independent metadata access.
//! Supports reading from and writing to MP3, FLAC, OGG, M4A, and WAV files.
//!
//! # Features
//! - Read playback duration for matching
//! - Write the fixed set of album/track fields as a typed [`TagRecord`]
//! - Preview tag changes before writing (dry run)

use lofty::config::WriteOptions;
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{AlbumMetadata, TrackMetadata};

/// The fields written to every tagged file.
///
/// Values are kept as rendered strings; numeric fields are converted to
/// native tag numbers at write time when they parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    pub title: String,
    pub track_number: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub date: String,
    pub track_total: String,
}

impl TagRecord {
    pub fn new(album: &AlbumMetadata, track: &TrackMetadata) -> Self {
        Self {
            title: track.title.clone(),
            track_number: track.position.clone(),
            artist: album.artist_string(),
            album: album.title.clone(),
            genre: album.genre_string(),
            date: if album.year > 0 { album.year.to_string() } else { String::new() },
            track_total: album.tracktotal.to_string(),
        }
    }

    /// Field names and values, in write order.
    pub fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("TITLE", self.title.as_str()),
            ("TRACKNUMBER", self.track_number.as_str()),
            ("ARTIST", self.artist.as_str()),
            ("ALBUM", self.album.as_str()),
            ("GENRE", self.genre.as_str()),
            ("DATE", self.date.as_str()),
            ("TRACKTOTAL", self.track_total.as_str()),
        ]
    }

    /// Reject records that would leave a file without identity.
    pub fn validate(&self, path: &Path) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::metadata(path, "refusing to write an empty TITLE"));
        }
        if self.track_number.trim().is_empty() {
            return Err(Error::metadata(path, "refusing to write an empty TRACKNUMBER"));
        }
        Ok(())
    }
}

/// Tag values currently stored in a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileTags {
    pub title: Option<String>,
    pub track_number: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub genre: Option<String>,
    pub date: Option<String>,
    pub track_total: Option<String>,
}

impl FileTags {
    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "TITLE" => self.title.as_deref(),
            "TRACKNUMBER" => self.track_number.as_deref(),
            "ARTIST" => self.artist.as_deref(),
            "ALBUM" => self.album.as_deref(),
            "GENRE" => self.genre.as_deref(),
            "DATE" => self.date.as_deref(),
            "TRACKTOTAL" => self.track_total.as_deref(),
            _ => None,
        }
    }
}

/// A single field change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub current_value: String,
    pub new_value: String,
}

fn open(path: &Path) -> Result<TaggedFile> {
    Probe::open(path)
        .map_err(|e| Error::metadata(path, format!("Failed to open file for probing: {e}")))?
        .read()
        .map_err(|e| Error::metadata(path, format!("Failed to read file metadata: {e}")))
}

/// Playback duration in whole seconds.
pub fn read_duration(path: &Path) -> Result<u32> {
    let tagged_file = open(path)?;
    let seconds = tagged_file.properties().duration().as_secs();
    u32::try_from(seconds).map_err(|_| Error::metadata(path, "duration out of range"))
}

/// Read the fields this tool writes, as currently stored.
pub fn read_tags(path: &Path) -> Result<FileTags> {
    let tagged_file = open(path)?;

    // Get the primary tag, or fall back to the first available tag
    let Some(tag) = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())
    else {
        return Ok(FileTags::default());
    };

    let (track_number, track_total) = match tag.track() {
        Some(n) => (Some(n.to_string()), tag.track_total().map(|n| n.to_string())),
        None => split_position(tag.get_string(&ItemKey::TrackNumber), tag.track_total()),
    };

    Ok(FileTags {
        title: tag.title().map(|s| s.to_string()),
        track_number,
        artist: tag.artist().map(|s| s.to_string()),
        album: tag.album().map(|s| s.to_string()),
        genre: tag.genre().map(|s| s.to_string()),
        date: tag.year().map(|y| y.to_string()),
        track_total,
    })
}

/// Split a textual track position such as `A1/4` into position and total.
///
/// ID3v2 stores both in one `TRCK` frame, and lofty only separates the pair
/// when the position is numeric.
fn split_position(raw: Option<&str>, total: Option<u32>) -> (Option<String>, Option<String>) {
    let Some(raw) = raw else {
        return (None, total.map(|n| n.to_string()));
    };

    match raw.split_once('/') {
        Some((position, pair_total)) => (
            Some(position.trim().to_string()),
            total
                .map(|n| n.to_string())
                .or_else(|| Some(pair_total.trim().to_string()).filter(|t| !t.is_empty())),
        ),
        None => (Some(raw.to_string()), total.map(|n| n.to_string())),
    }
}

/// Write `record` into the file's primary tag and save it.
///
/// Creates the primary tag when the file has none.
pub fn write_tags(path: &Path, record: &TagRecord) -> Result<()> {
    record.validate(path)?;

    let mut tagged_file = open(path)?;

    // Get the primary tag type for this format, or create one
    let tag_type = tagged_file.primary_tag_type();
    if tagged_file.tag(tag_type).is_none() {
        tagged_file.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged_file
        .tag_mut(tag_type)
        .ok_or_else(|| Error::metadata(path, "format has no writable tag"))?;

    tag.set_title(record.title.clone());
    tag.set_artist(record.artist.clone());
    tag.set_album(record.album.clone());
    if !record.genre.is_empty() {
        tag.set_genre(record.genre.clone());
    }

    // Vinyl-style positions ("A1") are not numbers; keep them as text
    match record.track_number.parse::<u32>() {
        Ok(n) => tag.set_track(n),
        Err(_) => {
            tag.insert_text(ItemKey::TrackNumber, record.track_number.clone());
        }
    }
    if let Ok(total) = record.track_total.parse::<u32>() {
        tag.set_track_total(total);
    }
    if let Ok(year) = record.date.parse::<u32>() {
        tag.set_year(year);
    }

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| Error::metadata(path, format!("Failed to write tags to file: {e}")))?;

    tracing::debug!(path = %path.display(), title = %record.title, "Wrote tags");
    Ok(())
}

/// Preview what [`write_tags`] would change without touching the file.
pub fn preview_write(path: &Path, record: &TagRecord) -> Result<Vec<FieldChange>> {
    let current = read_tags(path)?;

    Ok(record
        .fields()
        .into_iter()
        .filter_map(|(field, new)| {
            let current_value = current.get(field).unwrap_or_default();
            (current_value != new).then(|| FieldChange {
                field,
                current_value: current_value.to_string(),
                new_value: new.to_string(),
            })
        })
        .collect())
}
