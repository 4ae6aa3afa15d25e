//! Interactive assignment of tracks to candidate files.
//!
//! The loop works in passes. Each pass walks the still-unassigned tracks in
//! their original order, ranks each one against the remaining pool and asks a
//! [`Confirm`] implementation whether to commit the top candidate:
//!
//! - `Accept` commits the pair and shrinks the pool
//! - `Decline` leaves the track for the next pass
//! - `Cancel` aborts the whole assignment
//!
//! A run ends when every track is committed, or fails once `max_passes`
//! passes have gone by without reaching that point.

use crate::error::{Error, Result};
use crate::model::{Candidate, TrackMetadata};

use super::ranking::rank;

/// Default number of passes before giving up.
pub const DEFAULT_MAX_PASSES: u32 = 3;

/// Options controlling an assignment run.
#[derive(Debug, Clone)]
pub struct AssignOptions {
    /// Passes over the unassigned tracks before the run fails (at least 1)
    pub max_passes: u32,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// A proposed pair awaiting an operator decision.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationRequest<'a> {
    pub track: &'a TrackMetadata,
    pub candidate: &'a Candidate,
    /// Combined ranking score of the candidate (0.0, 0.5 or 1.0)
    pub score: f32,
    /// The candidate is the closest by title
    pub title_match: bool,
    /// The candidate is the closest by duration
    pub duration_match: bool,
    /// 1-based pass number
    pub pass: u32,
    /// Candidates still in the pool, the proposed one included
    pub pool_size: usize,
    /// Pairs committed before this request
    pub committed: usize,
}

/// Operator decision on a proposed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResponse {
    Accept,
    Decline,
    Cancel,
}

/// Source of confirmation decisions.
///
/// The assignment loop blocks inside [`Confirm::confirm`] and nowhere else.
pub trait Confirm {
    fn confirm(&mut self, request: &ConfirmationRequest<'_>) -> Result<ConfirmationResponse>;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmationRequest<'_>) -> ConfirmationResponse,
{
    fn confirm(&mut self, request: &ConfirmationRequest<'_>) -> Result<ConfirmationResponse> {
        Ok(self(request))
    }
}

/// Accepts every proposal without asking.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Confirm for AcceptAll {
    fn confirm(&mut self, _request: &ConfirmationRequest<'_>) -> Result<ConfirmationResponse> {
        Ok(ConfirmationResponse::Accept)
    }
}

/// A committed track/candidate pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    /// Index of the track in the original tracklist
    pub track_index: usize,
    pub track: TrackMetadata,
    pub candidate: Candidate,
}

/// Completed one-to-one assignment.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    /// Pairs in commit order
    pub pairs: Vec<Pair>,
    /// Number of passes the run needed
    pub passes: u32,
}

impl Assignment {
    /// Pairs ordered as the original tracklist.
    pub fn in_track_order(&self) -> Vec<&Pair> {
        let mut pairs: Vec<&Pair> = self.pairs.iter().collect();
        pairs.sort_by_key(|p| p.track_index);
        pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// State of one assignment run.
///
/// `unassigned` keeps track indices in original order; `pool` keeps
/// candidates in discovery order, with committed ones removed.
pub struct Assigner {
    tracks: Vec<TrackMetadata>,
    unassigned: Vec<usize>,
    pool: Vec<Candidate>,
    committed: Vec<Pair>,
    candidate_total: usize,
    options: AssignOptions,
}

impl Assigner {
    /// Set up a run. Track and candidate counts must be equal.
    pub fn new(
        tracks: Vec<TrackMetadata>,
        candidates: Vec<Candidate>,
        options: AssignOptions,
    ) -> Result<Self> {
        if tracks.len() != candidates.len() {
            return Err(Error::CountMismatch {
                tracks: tracks.len(),
                candidates: candidates.len(),
            });
        }

        Ok(Self {
            unassigned: (0..tracks.len()).collect(),
            candidate_total: candidates.len(),
            pool: candidates,
            tracks,
            committed: Vec::new(),
            options,
        })
    }

    /// Tracks still waiting for a confirmed candidate.
    pub fn unassigned_tracks(&self) -> impl Iterator<Item = &TrackMetadata> {
        self.unassigned.iter().map(|&i| &self.tracks[i])
    }

    /// Candidates not yet committed.
    pub fn pool(&self) -> &[Candidate] {
        &self.pool
    }

    /// Pairs committed so far.
    pub fn committed(&self) -> &[Pair] {
        &self.committed
    }

    pub fn is_done(&self) -> bool {
        self.unassigned.is_empty()
    }

    /// Drive passes until every track is committed.
    pub fn run(mut self, confirm: &mut impl Confirm) -> Result<Assignment> {
        let max_passes = self.options.max_passes.max(1);
        let mut pass = 0;

        while !self.is_done() {
            if pass == max_passes {
                tracing::warn!(
                    passes = pass,
                    unassigned = self.unassigned.len(),
                    "Pass limit reached"
                );
                return Err(Error::AssignmentExhausted {
                    passes: pass,
                    unassigned: self.unassigned.len(),
                });
            }
            pass += 1;
            tracing::info!(pass, remaining = self.unassigned.len(), "Starting pass");
            self.run_pass(pass, confirm)?;
        }

        tracing::info!(pairs = self.committed.len(), passes = pass, "All tracks assigned");
        Ok(Assignment {
            pairs: self.committed,
            passes: pass,
        })
    }

    /// Propose once for every track that was unassigned when the pass began.
    pub fn run_pass(&mut self, pass: u32, confirm: &mut impl Confirm) -> Result<()> {
        let pending = self.unassigned.clone();

        for track_index in pending {
            let track = &self.tracks[track_index];
            let ranking = rank(track, &self.pool)?;
            let Some(best) = ranking.best() else {
                break;
            };

            let request = ConfirmationRequest {
                track,
                candidate: &self.pool[best],
                score: ranking.score(best),
                title_match: ranking.text_winner == Some(best),
                duration_match: ranking.duration_winner == Some(best),
                pass,
                pool_size: self.pool.len(),
                committed: self.committed.len(),
            };

            match confirm.confirm(&request)? {
                ConfirmationResponse::Accept => self.commit(track_index, best),
                ConfirmationResponse::Decline => {
                    tracing::debug!(position = %track.position, "Proposal declined, deferring");
                }
                ConfirmationResponse::Cancel => return Err(Error::Cancelled),
            }
        }

        Ok(())
    }

    fn commit(&mut self, track_index: usize, pool_index: usize) {
        let candidate = self.pool.remove(pool_index);
        self.unassigned.retain(|&i| i != track_index);

        let track = self.tracks[track_index].clone();
        tracing::info!(
            position = %track.position,
            title = %track.title,
            file = %candidate.path.display(),
            "Committed pair"
        );
        self.committed.push(Pair {
            track_index,
            track,
            candidate,
        });

        self.check_invariants();
    }

    fn check_invariants(&self) {
        debug_assert_eq!(
            self.unassigned.len() + self.committed.len(),
            self.tracks.len()
        );
        debug_assert_eq!(self.pool.len() + self.committed.len(), self.candidate_total);
    }
}

/// Convenience wrapper: build an [`Assigner`] and run it.
pub fn assign(
    tracks: Vec<TrackMetadata>,
    candidates: Vec<Candidate>,
    options: AssignOptions,
    confirm: &mut impl Confirm,
) -> Result<Assignment> {
    Assigner::new(tracks, candidates, options)?.run(confirm)
}
