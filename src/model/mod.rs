//! Core data models for album tagging.
//!
//! Defines the values the matching engine works with:
//! - [`AlbumMetadata`] and [`TrackMetadata`] - what a metadata source returns
//! - [`Candidate`] - a local audio file that may receive one track's metadata
//!
//! Tracks and albums are immutable once built by a source. Candidates never
//! change their name or duration; the assignment loop only moves them out of
//! its pool.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::metadata;

/// Metadata for one track of a release, as listed by the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Ordinal label ("1", "A1", ...)
    pub position: String,
    /// Track title
    pub title: String,
    /// Declared duration, "MM:SS"
    pub duration: String,
}

impl TrackMetadata {
    pub fn new(
        position: impl Into<String>,
        title: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            position: position.into(),
            title: title.into(),
            duration: duration.into(),
        }
    }

    /// Declared duration in whole seconds.
    pub fn duration_seconds(&self) -> Result<u32> {
        parse_duration(&self.duration)
    }
}

/// Album-level metadata shared by every file of the release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumMetadata {
    pub title: String,
    /// Genres; order carries no meaning
    pub genres: Vec<String>,
    /// Credited artists in billing order
    pub artists: Vec<String>,
    pub year: u32,
    /// Always equal to the number of tracks listed by the source
    pub tracktotal: u32,
}

impl AlbumMetadata {
    /// Build album metadata, deriving the track total from `tracks`.
    pub fn new(
        title: impl Into<String>,
        artists: Vec<String>,
        genres: Vec<String>,
        year: u32,
        tracks: &[TrackMetadata],
    ) -> Self {
        Self {
            title: title.into(),
            genres,
            artists,
            year,
            tracktotal: tracks.len() as u32,
        }
    }

    /// Check that the declared track total matches the tracklist.
    pub fn validate(&self, tracks: &[TrackMetadata]) -> Result<()> {
        if self.tracktotal as usize != tracks.len() {
            return Err(Error::TrackCountMismatch {
                declared: self.tracktotal,
                listed: tracks.len(),
            });
        }
        Ok(())
    }

    /// Artists rendered as a single tag value.
    pub fn artist_string(&self) -> String {
        self.artists.join(", ")
    }

    /// Genres rendered as a single tag value.
    pub fn genre_string(&self) -> String {
        self.genres.join(", ")
    }
}

/// A taggable file considered as the destination for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File stem with separators turned into spaces
    pub display_name: String,
    /// Playback duration in whole seconds
    pub duration_seconds: u32,
    /// Handle used by the tag writer
    pub path: PathBuf,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>, duration_seconds: u32) -> Self {
        let path = path.into();
        Self {
            display_name: normalize_file_name(&path),
            duration_seconds,
            path,
        }
    }

    /// Build a candidate by probing the file's playback duration.
    pub fn from_path(path: &Path) -> Result<Self> {
        let duration = metadata::read_duration(path)?;
        Ok(Self::new(path, duration))
    }
}

/// Derive the display name used for text matching.
///
/// Strips directory and extension, then replaces `-` and `_` with spaces.
/// Nothing else is touched: no trimming, no case folding.
pub fn normalize_file_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default()
        .replace(['-', '_'], " ")
}

/// Parse an "MM:SS" duration into seconds.
///
/// Minutes may exceed 59 (long tracks are listed as e.g. "63:10"); seconds
/// must be below 60. Hours are not accepted.
pub fn parse_duration(raw: &str) -> Result<u32> {
    let (minutes, seconds) = raw.split_once(':').ok_or_else(|| Error::duration(raw))?;

    let field = |s: &str| -> Result<u32> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::duration(raw));
        }
        s.parse().map_err(|_| Error::duration(raw))
    };

    let minutes = field(minutes)?;
    let seconds = field(seconds)?;
    if seconds >= 60 {
        return Err(Error::duration(raw));
    }

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| Error::duration(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("03:45").unwrap(), 225);
        assert_eq!(parse_duration("00:09").unwrap(), 9);
        assert_eq!(parse_duration("3:05").unwrap(), 185);
        assert_eq!(parse_duration("63:10").unwrap(), 3790);
    }

    #[test]
    fn test_parse_duration_rejects_malformed() {
        for raw in ["345", "", ":", "03:", ":45", "03:60", "1:02:03", "ab:cd", " 3:45", "-1:00"] {
            assert!(
                matches!(parse_duration(raw), Err(Error::DurationParse(_))),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn test_track_duration_seconds() {
        let track = TrackMetadata::new("A1", "Intro", "01:15");
        assert_eq!(track.duration_seconds().unwrap(), 75);
    }

    #[test]
    fn test_normalize_file_name() {
        assert_eq!(normalize_file_name(Path::new("/music/01-Intro.mp3")), "01 Intro");
        assert_eq!(
            normalize_file_name(Path::new("02_Some-Song_Title.flac")),
            "02 Some Song Title"
        );
        assert_eq!(normalize_file_name(Path::new("Plain Name.ogg")), "Plain Name");
        assert_eq!(normalize_file_name(Path::new("no_extension")), "no extension");
    }

    #[test]
    fn test_candidate_new_normalizes_name() {
        let candidate = Candidate::new("/tmp/album/03-Outro.mp3", 75);
        assert_eq!(candidate.display_name, "03 Outro");
        assert_eq!(candidate.duration_seconds, 75);
        assert_eq!(candidate.path, PathBuf::from("/tmp/album/03-Outro.mp3"));
    }

    #[test]
    fn test_album_tracktotal_derived() {
        let tracks = vec![
            TrackMetadata::new("1", "Intro", "00:30"),
            TrackMetadata::new("2", "Outro", "01:15"),
        ];
        let album = AlbumMetadata::new(
            "Album",
            vec!["A".to_string(), "B".to_string()],
            vec!["Rock".to_string()],
            1999,
            &tracks,
        );
        assert_eq!(album.tracktotal, 2);
        assert!(album.validate(&tracks).is_ok());
        assert_eq!(album.artist_string(), "A, B");
        assert_eq!(album.genre_string(), "Rock");
    }

    #[test]
    fn test_album_validate_mismatch() {
        let tracks = vec![TrackMetadata::new("1", "Intro", "00:30")];
        let album = AlbumMetadata {
            tracktotal: 3,
            ..AlbumMetadata::new("Album", vec![], vec![], 2000, &tracks)
        };
        assert!(matches!(
            album.validate(&tracks),
            Err(Error::TrackCountMismatch { declared: 3, listed: 1 })
        ));
    }

    #[test]
    fn test_candidate_from_path_rejects_non_audio() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"not audio").unwrap();
        assert!(Candidate::from_path(file.path()).is_err());
    }
}
