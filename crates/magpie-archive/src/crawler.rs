//! The per-candidate pipeline and the run loop that drives it.
//!
//! Candidates are processed strictly one at a time. A candidate either
//! completes fully or fails as a unit; a failure is collected and the batch
//! continues. Re-running resumes correctly: the response cache, the
//! file-exists checks and the ledger reconciliation make every completed
//! step a no-op the second time.

use magpie_ats::Api;
use magpie_core::{
  candidate::CandidateRef,
  fetch::Fetch,
  ledger::{Ledger, LedgerRow, RowAction, reconcile},
  summary::{ArchiveOutputs, project},
};

use crate::{Error, Layout, Result, files, mailbox, notes};

/// Fallback extension when the CV URL's path carries none.
const CV_FALLBACK_EXT: &str = "bin";

// ─── Reports ─────────────────────────────────────────────────────────────────

/// What happened to one successfully crawled candidate.
#[derive(Debug)]
pub struct CandidateReport {
  pub candidate_id:  u64,
  pub emails_count:  usize,
  pub notes_count:   usize,
  pub cv_downloaded: bool,
  pub action:        RowAction,
}

/// The outcome of a whole run. Failures abort only their own candidate.
#[derive(Debug, Default)]
pub struct RunReport {
  pub succeeded: Vec<CandidateReport>,
  pub failures:  Vec<(CandidateRef, Error)>,
}

// ─── Crawler ─────────────────────────────────────────────────────────────────

/// Drives the candidate pipeline against one API, one ledger and one mirror
/// root.
pub struct Crawler<'a, F, L> {
  api:    &'a Api<F>,
  ledger: &'a L,
  layout: &'a Layout,
}

impl<'a, F: Fetch, L: Ledger> Crawler<'a, F, L> {
  pub fn new(api: &'a Api<F>, ledger: &'a L, layout: &'a Layout) -> Self {
    Self {
      api,
      ledger,
      layout,
    }
  }

  /// Crawl every candidate of the remote listing, sequentially.
  ///
  /// The ledger row set is loaded once up front; appends are folded back
  /// into it so a duplicate listing entry later in the same run updates
  /// instead of double-appending.
  pub async fn run(&self) -> Result<RunReport> {
    let mut rows = self
      .ledger
      .load_rows()
      .await
      .map_err(|e| Error::Ledger(Box::new(e)))?;

    let candidates = self.api.list_candidates().await?;
    tracing::info!(count = candidates.len(), "enumerated candidates");

    let mut report = RunReport::default();
    for candidate in candidates {
      tracing::info!(
        candidate_id = candidate.id,
        name = %candidate.name,
        "crawling candidate"
      );
      match self.crawl_candidate(&mut rows, &candidate).await {
        Ok(r) => report.succeeded.push(r),
        Err(error) => {
          tracing::error!(
            candidate_id = candidate.id,
            %error,
            "candidate pipeline failed"
          );
          report.failures.push((candidate, error));
        }
      }
    }
    Ok(report)
  }

  /// One candidate, end to end: detail fetch (cached) → directories → CV →
  /// mailbox → notes → projection → ledger reconciliation.
  pub async fn crawl_candidate(
    &self,
    rows: &mut Vec<LedgerRow>,
    candidate: &CandidateRef,
  ) -> Result<CandidateReport> {
    let (detail, references) =
      self.api.candidate_detail(candidate.id).await?;

    let emails_dir = self.layout.emails_dir(candidate.id, &candidate.name);
    let notes_dir = self.layout.notes_dir(candidate.id, &candidate.name);
    tokio::fs::create_dir_all(&emails_dir).await?;
    tokio::fs::create_dir_all(&notes_dir).await?;

    let (cv_path, cv_downloaded) = match detail.cv_original_url.as_deref() {
      Some(url) => {
        let ext = files::url_extension(url)
          .unwrap_or_else(|| CV_FALLBACK_EXT.to_string());
        let dest = self.layout.cv_path(candidate.id, &candidate.name, &ext);
        let downloaded =
          files::materialize(self.api.fetcher(), url, &dest).await?;
        (dest.display().to_string(), downloaded)
      }
      None => {
        tracing::warn!(candidate_id = candidate.id, "candidate has no CV");
        (String::new(), false)
      }
    };

    let emails_count =
      mailbox::archive(self.api, &emails_dir, candidate.id).await?;
    let notes_count = notes::archive(self.api, &notes_dir, candidate.id).await?;

    let outputs = ArchiveOutputs {
      cv_path,
      email_path: emails_dir.display().to_string(),
      emails_count,
      notes_path: notes_dir.display().to_string(),
      notes_count,
    };
    let summary = project(&detail, &references, &outputs)?;

    let action = reconcile(rows, summary.candidate_id);
    match action {
      RowAction::Update(row_number) => {
        tracing::info!(
          candidate_id = candidate.id,
          row_number,
          "updating existing ledger row"
        );
        self
          .ledger
          .update_row(row_number, &summary)
          .await
          .map_err(|e| Error::Ledger(Box::new(e)))?;
      }
      RowAction::Append => {
        tracing::info!(candidate_id = candidate.id, "appending new ledger row");
        let row_number = self
          .ledger
          .append_row(&summary)
          .await
          .map_err(|e| Error::Ledger(Box::new(e)))?;
        rows.push(LedgerRow {
          row_number,
          candidate_id: Some(summary.candidate_id),
        });
      }
    }

    Ok(CandidateReport {
      candidate_id: candidate.id,
      emails_count,
      notes_count,
      cv_downloaded,
      action,
    })
  }
}
