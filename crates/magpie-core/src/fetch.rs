//! The `Fetch` trait — the narrow seam between the archiver and the remote.
//!
//! Implemented by the HTTP client (`magpie-ats`) and by the response cache,
//! which wraps any other implementation. Test code substitutes an in-memory
//! stub.

use std::future::Future;

/// Abstraction over remote reads.
///
/// `get_json` takes a request path relative to the API root; the path
/// uniquely identifies one remote read and doubles as the cache key.
/// `fetch_bytes` takes an absolute URL and is never cached — download
/// idempotence is the caller's concern (file-exists check).
pub trait Fetch: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Perform (or replay) one remote JSON read, returning the raw body.
  fn get_json<'a>(
    &'a self,
    request_path: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;

  /// Download arbitrary binary content by absolute URL.
  fn fetch_bytes<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Result<Vec<u8>, Self::Error>> + Send + 'a;
}
