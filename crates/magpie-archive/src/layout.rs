//! Deterministic filesystem layout of the local mirror.
//!
//! ```text
//! <root>/cache/<normalized-request-path>.json
//! <root>/candidates/<id>_<name>/cv.<ext>
//! <root>/candidates/<id>_<name>/emails/<id>_<threadId>_<idx>_<from>_<to>.html
//! <root>/candidates/<id>_<name>/notes/<id>_<noteId>.html
//! ```

use std::path::{Path, PathBuf};

/// Path construction for everything under the mirror root.
#[derive(Debug, Clone)]
pub struct Layout {
  root: PathBuf,
}

impl Layout {
  pub fn new(root: impl AsRef<Path>) -> Self {
    Self {
      root: root.as_ref().to_path_buf(),
    }
  }

  /// The response cache directory, owned exclusively by the cache.
  pub fn cache_dir(&self) -> PathBuf {
    self.root.join("cache")
  }

  /// The per-candidate directory, owning that candidate's CV, emails and
  /// notes files.
  pub fn candidate_dir(&self, candidate_id: u64, name: &str) -> PathBuf {
    self
      .root
      .join("candidates")
      .join(format!("{candidate_id}_{name}"))
  }

  pub fn emails_dir(&self, candidate_id: u64, name: &str) -> PathBuf {
    self.candidate_dir(candidate_id, name).join("emails")
  }

  pub fn notes_dir(&self, candidate_id: u64, name: &str) -> PathBuf {
    self.candidate_dir(candidate_id, name).join("notes")
  }

  /// CV destination; the extension comes from the source URL.
  pub fn cv_path(&self, candidate_id: u64, name: &str, ext: &str) -> PathBuf {
    self
      .candidate_dir(candidate_id, name)
      .join(format!("cv.{ext}"))
  }
}
