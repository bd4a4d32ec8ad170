//! Mail thread types.
//!
//! The remote does not guarantee a stable per-message id across fetches, so
//! a message's archival identity is the composite
//! `(candidate_id, thread_id, message_index, from, to)` — the index being
//! the message's zero-based ordinal within its thread. Message order is
//! therefore significant and must be preserved as fetched.

use serde::{Deserialize, Serialize};

/// One message within a thread. `from` and `to` are the first sender and
/// recipient entries of the wire message; an empty participant list
/// collapses to an empty address component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailMessage {
  pub from:    String,
  pub to:      String,
  pub content: String,
}

/// A grouped sequence of mail messages exchanged with a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailThread {
  pub thread_id: u64,
  pub messages:  Vec<MailMessage>,
}
