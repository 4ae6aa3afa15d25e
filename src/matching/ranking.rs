//! Per-track preference vector over the current candidate pool.
//!
//! Each signal (title edit distance, duration distance) votes for exactly one
//! candidate, its closest. Votes are weighted equally, so every score is one
//! of `0.0`, `0.5` or `1.0`. Ties go to the earliest candidate in the pool.

use crate::error::Result;
use crate::model::{Candidate, TrackMetadata};

use super::similarity::{duration_distance, text_distance};

/// Weight of the title signal.
const TEXT_WEIGHT: f32 = 0.5;
/// Weight of the duration signal.
const DURATION_WEIGHT: f32 = 0.5;

/// Scores for one track against an ordered pool of candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// One score per pool entry, higher is better
    pub scores: Vec<f32>,
    /// Pool index with the smallest title distance
    pub text_winner: Option<usize>,
    /// Pool index with the smallest duration distance
    pub duration_winner: Option<usize>,
}

impl Ranking {
    /// Index of the highest score, first occurrence on ties.
    pub fn best(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (i, score) in self.scores.iter().enumerate() {
            match best {
                Some(b) if self.scores[b] >= *score => {}
                _ => best = Some(i),
            }
        }
        best
    }

    /// Score at `index`, zero when out of range.
    pub fn score(&self, index: usize) -> f32 {
        self.scores.get(index).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

/// Rank every candidate in `pool` for `track`.
///
/// Deterministic: the same track and pool order always produce the same
/// vector. Fails only if the track's duration is malformed.
pub fn rank(track: &TrackMetadata, pool: &[Candidate]) -> Result<Ranking> {
    let text_winner = first_min(pool.iter().map(|c| text_distance(track, c)));

    let durations = pool
        .iter()
        .map(|c| duration_distance(track, c))
        .collect::<Result<Vec<_>>>()?;
    let duration_winner = first_min(durations.into_iter());

    let scores = (0..pool.len())
        .map(|i| {
            let text = if text_winner == Some(i) { 1.0 } else { 0.0 };
            let duration = if duration_winner == Some(i) { 1.0 } else { 0.0 };
            TEXT_WEIGHT * text + DURATION_WEIGHT * duration
        })
        .collect();

    tracing::debug!(
        title = %track.title,
        ?text_winner,
        ?duration_winner,
        pool = pool.len(),
        "Ranked candidates"
    );

    Ok(Ranking {
        scores,
        text_winner,
        duration_winner,
    })
}

/// Index of the first minimum value.
fn first_min<T: Ord>(values: impl Iterator<Item = T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, value) in values.enumerate() {
        match &best {
            Some((_, current)) if *current <= value => {}
            _ => best = Some((i, value)),
        }
    }
    best.map(|(i, _)| i)
}
