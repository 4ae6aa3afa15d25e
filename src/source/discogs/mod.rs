//! Discogs API integration
//!
//! Looks up releases by their API URI (`https://api.discogs.com/releases/{id}`)
//! and turns the tracklist into [`crate::model::TrackMetadata`].
//!
//! API docs: https://www.discogs.com/developers

mod adapter;
mod client;
pub mod dto;

pub use adapter::to_release;
pub use client::{DISCOGS_DOMAIN, DiscogsClient, USER_AGENT};
