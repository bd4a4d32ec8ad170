//! The notes archiver — one file per candidate note.

use std::path::Path;

use magpie_ats::Api;
use magpie_core::fetch::Fetch;

use crate::Result;

/// Archive every note for one candidate to
/// `out_dir/{candidateId}_{noteId}.html`, returning the note count.
/// Same idempotence as the mailbox archiver: identity is the filename.
pub async fn archive<F: Fetch>(
  api: &Api<F>,
  out_dir: &Path,
  candidate_id: u64,
) -> Result<usize> {
  let notes = api.notes(candidate_id).await?;

  for note in &notes {
    let file = out_dir.join(format!("{candidate_id}_{}.html", note.note_id));
    tokio::fs::write(&file, &note.content).await?;
  }
  Ok(notes.len())
}
