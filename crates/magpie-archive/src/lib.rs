//! The local mirror — everything the archiver writes to disk, plus the
//! per-candidate pipeline that drives it.
//!
//! Idempotence is the organising principle: every write is keyed by a
//! deterministic path derived from remote identity, so re-running after a
//! partial failure re-persists only what is missing and overwrites the rest
//! with identical content.

pub mod cache;
pub mod crawler;
pub mod error;
pub mod files;
pub mod layout;
pub mod mailbox;
pub mod notes;


pub use cache::ResponseCache;
pub use crawler::{CandidateReport, Crawler, RunReport};
pub use error::{Error, Result};
pub use layout::Layout;
