//! Emoji Story: turns short emoji sequences into one-line stories.
//!
//! A fixed catalog of pattern rules is tried first; when nothing matches,
//! a sentence is assembled from per-symbol meanings. Stories can be kept
//! in an in-memory store that handles likes and edits.

pub mod core;
pub mod schema;
