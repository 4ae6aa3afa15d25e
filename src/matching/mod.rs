//! Track-to-file matching engine.
//!
//! # Architecture
//!
//! - **Similarity** (`similarity.rs`) - Edit distance and duration distance
//!   between one track and one candidate
//! - **Ranking** (`ranking.rs`) - Preference vector for one track over the
//!   current candidate pool
//! - **Assignment** (`assignment.rs`) - Pass-based confirmation loop that
//!   commits pairs until every track has a file
//!
//! The engine is synchronous and holds no global state. It only suspends
//! inside [`Confirm::confirm`], so any I/O surface (console prompt, scripted
//! responder, auto-accept) can drive it.
//!
//! # Usage
//!
//! ```ignore
//! use matching::{assign, AcceptAll, AssignOptions};
//!
//! let assignment = assign(tracks, candidates, AssignOptions::default(), &mut AcceptAll)?;
//! for pair in assignment.in_track_order() {
//!     println!("{} -> {:?}", pair.track.title, pair.candidate.path);
//! }
//! ```

pub mod assignment;
pub mod ranking;
pub mod similarity;

pub use assignment::{
    AcceptAll, AssignOptions, Assigner, Assignment, Confirm, ConfirmationRequest,
    ConfirmationResponse, Pair, assign,
};
pub use ranking::{Ranking, rank};
pub use similarity::{duration_distance, levenshtein, text_distance};
