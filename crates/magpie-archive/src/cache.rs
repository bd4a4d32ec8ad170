//! The response cache — a caching [`Fetch`] decorator.
//!
//! One file per distinct request path, named by replacing every path
//! separator with `_` and suffixing `.json`. An entry, once written, is
//! treated as permanently valid for the life of the cache directory;
//! staleness is resolved by deleting the directory.

use std::path::PathBuf;

use magpie_core::fetch::Fetch;

use crate::{Error, Result};

/// Wraps any [`Fetch`] and replays previously fetched JSON payloads from
/// disk. Guarantees at most one remote fetch per request path per cache
/// lifetime: a fetch failure writes nothing, so the next call retries.
///
/// Binary downloads pass through uncached.
pub struct ResponseCache<F> {
  inner: F,
  dir:   PathBuf,
}

impl<F> ResponseCache<F> {
  /// Wrap `inner`, creating the cache directory if needed.
  pub fn new(inner: F, dir: impl Into<PathBuf>) -> Result<Self> {
    let dir = dir.into();
    std::fs::create_dir_all(&dir)?;
    Ok(Self { inner, dir })
  }

  fn entry_path(&self, request_path: &str) -> PathBuf {
    self.dir.join(normalize_key(request_path))
  }
}

/// Normalized cache filename for a request path.
fn normalize_key(request_path: &str) -> String {
  format!("{}.json", request_path.replace('/', "_"))
}

impl<F: Fetch> Fetch for ResponseCache<F> {
  type Error = Error;

  async fn get_json(&self, request_path: &str) -> Result<String> {
    let entry = self.entry_path(request_path);

    if tokio::fs::try_exists(&entry).await? {
      return Ok(tokio::fs::read_to_string(&entry).await?);
    }

    let body = self
      .inner
      .get_json(request_path)
      .await
      .map_err(|e| Error::Fetch(Box::new(e)))?;

    // Persist the raw body verbatim before returning it.
    tokio::fs::write(&entry, &body).await?;
    Ok(body)
  }

  async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
    self
      .inner
      .fetch_bytes(url)
      .await
      .map_err(|e| Error::Fetch(Box::new(e)))
  }
}
