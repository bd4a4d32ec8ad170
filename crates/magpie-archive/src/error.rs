//! Error type for `magpie-archive`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("core error: {0}")]
  Core(#[from] magpie_core::Error),

  #[error("api error: {0}")]
  Api(#[from] magpie_ats::Error),

  #[error("fetch error: {0}")]
  Fetch(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("ledger error: {0}")]
  Ledger(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
