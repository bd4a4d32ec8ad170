//! The mailbox archiver — flattens a candidate's threaded mail history into
//! one file per message.

use std::path::Path;

use magpie_ats::Api;
use magpie_core::fetch::Fetch;

use crate::Result;

/// Archive every message of every thread for one candidate, returning the
/// total message count.
///
/// Each message lands at
/// `out_dir/{candidateId}_{threadId}_{index}_{from}_{to}.html`, where the
/// index is the message's zero-based position within its thread. The
/// composite filename is the only deduplication: a re-run rewrites the same
/// files with the same content.
pub async fn archive<F: Fetch>(
  api: &Api<F>,
  out_dir: &Path,
  candidate_id: u64,
) -> Result<usize> {
  let threads = api.mailbox(candidate_id).await?;

  let mut count = 0;
  for thread in &threads {
    for (index, message) in thread.messages.iter().enumerate() {
      let file = out_dir.join(format!(
        "{candidate_id}_{}_{index}_{}_{}.html",
        thread.thread_id, message.from, message.to
      ));
      tokio::fs::write(&file, &message.content).await?;
      count += 1;
    }
  }
  Ok(count)
}
