//! Candidate note type. Archival identity is `(candidate_id, note_id)`.

use serde::{Deserialize, Serialize};

/// A rendered note attached to a candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
  pub note_id: u64,
  pub content: String,
}
