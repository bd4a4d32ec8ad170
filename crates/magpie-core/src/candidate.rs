//! Candidate types — the remote entities enumerated and archived per run.
//!
//! A candidate's detail payload carries two linked collections: `placements`
//! (pipeline-stage associations) and a sibling `references` set of typed
//! lookup entries. A placement resolves to a stage name by matching its
//! `stage_id` against a reference id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Minimal identity from the collection listing. Read-only, sourced once per
/// run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateRef {
  pub id:   u64,
  pub name: String,
}

/// A candidate's association with a pipeline stage. `stage_id` references a
/// [`Reference`] by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Placement {
  pub stage_id: u64,
}

/// The reference kind tag marking a job/offer entry.
pub const OFFER_KIND: &str = "Offer";

/// A typed lookup entry attached to a candidate's detail payload.
///
/// The set is heterogeneous and open: stage entries carry `name`, offer
/// entries carry `title`, and kinds this tool does not know about are
/// carried through untouched rather than rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
  pub id:    u64,
  #[serde(rename = "type")]
  pub kind:  String,
  #[serde(default)]
  pub name:  Option<String>,
  #[serde(default)]
  pub title: Option<String>,
}

/// Full candidate detail as returned by the detail endpoint.
///
/// `referrer`, `gdpr_status` and `cv_original_url` are nullable on the wire;
/// a missing CV URL skips materialisation rather than failing the candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateDetail {
  pub id:               u64,
  pub name:             String,
  pub created_at:       DateTime<Utc>,
  pub last_activity_at: DateTime<Utc>,
  #[serde(default)]
  pub emails:           Vec<String>,
  #[serde(default)]
  pub phones:           Vec<String>,
  #[serde(default)]
  pub referrer:         Option<String>,
  #[serde(default)]
  pub gdpr_status:      Option<String>,
  #[serde(default)]
  pub cv_original_url:  Option<String>,
  #[serde(default)]
  pub placements:       Vec<Placement>,
}
