//! The file materializer — download a remote binary to a deterministic
//! local path exactly once.

use std::path::{Path, PathBuf};

use magpie_core::fetch::Fetch;

use crate::{Error, Result};

/// Download `source_url` to `destination`, idempotent on existence.
///
/// Returns `false` without touching the network when the destination
/// already exists; content is never re-validated. The body is written to a
/// `.part` sibling and renamed into place, so an interrupted download never
/// leaves a partial file that the next run would mistake for complete.
pub async fn materialize<F: Fetch>(
  fetch: &F,
  source_url: &str,
  destination: &Path,
) -> Result<bool> {
  if tokio::fs::try_exists(destination).await? {
    return Ok(false);
  }

  tracing::info!(
    url = source_url,
    dest = %destination.display(),
    "downloading file"
  );

  let bytes = fetch
    .fetch_bytes(source_url)
    .await
    .map_err(|e| Error::Fetch(Box::new(e)))?;

  let part = part_path(destination);
  tokio::fs::write(&part, &bytes).await?;
  tokio::fs::rename(&part, destination).await?;
  Ok(true)
}

fn part_path(destination: &Path) -> PathBuf {
  let mut name = destination.as_os_str().to_owned();
  name.push(".part");
  PathBuf::from(name)
}

/// Filename extension of a URL's path component, if it has one.
pub fn url_extension(source_url: &str) -> Option<String> {
  let parsed = url::Url::parse(source_url).ok()?;
  let file = parsed.path().rsplit('/').next()?;
  let (stem, ext) = file.rsplit_once('.')?;
  if stem.is_empty() || ext.is_empty() {
    return None;
  }
  Some(ext.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extension_comes_from_url_path() {
    assert_eq!(
      url_extension("https://files.example.com/uploads/jane-cv.pdf"),
      Some("pdf".to_string())
    );
  }

  #[test]
  fn query_string_does_not_leak_into_extension() {
    assert_eq!(
      url_extension("https://files.example.com/cv.docx?sig=a.b.c"),
      Some("docx".to_string())
    );
  }

  #[test]
  fn extensionless_path_yields_none() {
    assert_eq!(url_extension("https://files.example.com/uploads/cv"), None);
    assert_eq!(
      url_extension("https://files.example.com/uploads/.hidden"),
      None
    );
  }
}
