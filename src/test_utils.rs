//! Test utilities and fixtures for album-tagger tests.
//!
//! This module provides common fixtures, a scripted confirmation responder
//! and a tiny WAV writer so tag tests can run against real audio files.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{sample_album, write_wav};
//!
//! let (album, tracks) = sample_album();
//! write_wav(&dir.path().join("01-Intro.wav"), 30);
//! ```

use std::collections::VecDeque;
use std::path::Path;

use crate::error::Result;
use crate::matching::{Confirm, ConfirmationRequest, ConfirmationResponse};
use crate::model::{AlbumMetadata, Candidate, TrackMetadata};

/// The two-track tracklist used across tests: "Intro" (0:30), "Outro" (1:15).
pub fn intro_outro_tracks() -> Vec<TrackMetadata> {
    vec![
        TrackMetadata::new("1", "Intro", "00:30"),
        TrackMetadata::new("2", "Outro", "01:15"),
    ]
}

/// Album wrapping [`intro_outro_tracks`].
pub fn sample_album() -> (AlbumMetadata, Vec<TrackMetadata>) {
    let tracks = intro_outro_tracks();
    let album = AlbumMetadata::new(
        "Test Album",
        vec!["Test Artist".to_string()],
        vec!["Electronic".to_string(), "Ambient".to_string()],
        2004,
        &tracks,
    );
    (album, tracks)
}

/// Candidates from `(file name, seconds)` pairs, without touching disk.
pub fn candidates_for(files: &[(&str, u32)]) -> Vec<Candidate> {
    files
        .iter()
        .map(|(name, secs)| Candidate::new(format!("/album/{name}"), *secs))
        .collect()
}

/// Replays a fixed list of responses, then accepts everything.
///
/// Records the title of every track it was asked about.
pub struct ScriptedConfirm {
    responses: VecDeque<ConfirmationResponse>,
    pub asked: Vec<String>,
}

impl ScriptedConfirm {
    pub fn new(responses: impl IntoIterator<Item = ConfirmationResponse>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

impl Confirm for ScriptedConfirm {
    fn confirm(&mut self, request: &ConfirmationRequest<'_>) -> Result<ConfirmationResponse> {
        self.asked.push(request.track.title.clone());
        Ok(self
            .responses
            .pop_front()
            .unwrap_or(ConfirmationResponse::Accept))
    }
}

/// Write a silent 8 kHz mono 8-bit PCM WAV lasting `seconds`.
pub fn write_wav(path: &Path, seconds: u32) {
    const SAMPLE_RATE: u32 = 8000;
    let data_len = SAMPLE_RATE * seconds;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes()); // byte rate
    bytes.extend_from_slice(&1u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&8u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(44 + data_len as usize, 0x80);

    std::fs::write(path, bytes).expect("Failed to write test WAV");
}
