//! Error type for `magpie-sheets`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("sheets api {status}: {message}")]
  Api { status: u16, message: String },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("ledger token not found at {0}")]
  TokenNotFound(PathBuf),

  #[error("ledger token is expired and carries no refresh token")]
  AuthExpired,

  #[error("token refresh failed: {0}")]
  RefreshFailed(String),

  #[error("sheet {0:?} has no candidate_id column in its header row")]
  MissingKeyColumn(String),

  #[error("could not locate appended row in range {0:?}")]
  BadAppendRange(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
