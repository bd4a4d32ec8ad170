//! Error type for `magpie-ats`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("GET {path} → {status}")]
  Status {
    path:   String,
    status: reqwest::StatusCode,
  },

  #[error("fetch error: {0}")]
  Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("decoding {path}: {source}")]
  Decode {
    path:   String,
    #[source]
    source: serde_json::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
