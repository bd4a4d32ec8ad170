//! Error types for `magpie-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(
    "candidate {candidate_id}: placement stage {stage_id} has no matching \
     reference"
  )]
  UnresolvedStage { candidate_id: u64, stage_id: u64 },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
