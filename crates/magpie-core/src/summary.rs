//! The summary projection — one flat ledger row derived per candidate.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  candidate::{CandidateDetail, OFFER_KIND, Reference},
};

/// Sentinel recorded when no offer-kind reference names a job.
pub const UNKNOWN_JOB: &str = "unknown / n/a";

/// Canonical ledger column order. Writes always emit exactly these columns.
pub const COLUMNS: [&str; 15] = [
  "candidate_id",
  "created_at",
  "last_activity_at",
  "job",
  "name",
  "emails",
  "phones",
  "referrer",
  "gdpr_status",
  "stages",
  "cv_path",
  "emails_count",
  "email_path",
  "notes_count",
  "notes_path",
];

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Filesystem outputs of the archival steps, folded into the projection.
#[derive(Debug, Clone, Default)]
pub struct ArchiveOutputs {
  pub cv_path:      String,
  pub email_path:   String,
  pub emails_count: usize,
  pub notes_path:   String,
  pub notes_count:  usize,
}

// ─── SummaryRow ──────────────────────────────────────────────────────────────

/// The flattened projection persisted to the ledger.
/// Identity key: `candidate_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
  pub candidate_id:     u64,
  pub created_at:       String,
  pub last_activity_at: String,
  pub job:              String,
  pub name:             String,
  pub emails:           String,
  pub phones:           String,
  pub referrer:         String,
  pub gdpr_status:      String,
  pub stages:           String,
  pub cv_path:          String,
  pub emails_count:     usize,
  pub email_path:       String,
  pub notes_count:      usize,
  pub notes_path:       String,
}

impl SummaryRow {
  /// The row rendered as cells, in [`COLUMNS`] order.
  pub fn cells(&self) -> [String; 15] {
    [
      self.candidate_id.to_string(),
      self.created_at.clone(),
      self.last_activity_at.clone(),
      self.job.clone(),
      self.name.clone(),
      self.emails.clone(),
      self.phones.clone(),
      self.referrer.clone(),
      self.gdpr_status.clone(),
      self.stages.clone(),
      self.cv_path.clone(),
      self.emails_count.to_string(),
      self.email_path.clone(),
      self.notes_count.to_string(),
      self.notes_path.clone(),
    ]
  }
}

// ─── Projection ──────────────────────────────────────────────────────────────

/// Derive the ledger projection for one candidate.
///
/// - `job` is the title of the last offer-kind reference in listing order
///   (named tie-break: last wins). No offer found logs a warning and yields
///   [`UNKNOWN_JOB`] — not an error.
/// - every placement's `stage_id` must resolve against `references`; an
///   unmatched stage fails this candidate with
///   [`Error::UnresolvedStage`].
/// - `phones` carries a literal leading `'` so spreadsheets keep
///   phone-number-like strings textual.
pub fn project(
  detail: &CandidateDetail,
  references: &[Reference],
  outputs: &ArchiveOutputs,
) -> Result<SummaryRow> {
  let stages = resolve_stages(detail, references)?;
  let job = select_job(detail.id, references);

  Ok(SummaryRow {
    candidate_id:     detail.id,
    created_at:       detail.created_at.to_rfc3339(),
    last_activity_at: detail.last_activity_at.to_rfc3339(),
    job,
    name:             detail.name.clone(),
    emails:           detail.emails.join(", "),
    phones:           format!("'{}", detail.phones.join(", ")),
    referrer:         detail.referrer.clone().unwrap_or_default(),
    gdpr_status:      detail.gdpr_status.clone().unwrap_or_default(),
    stages:           stages.join(", "),
    cv_path:          outputs.cv_path.clone(),
    emails_count:     outputs.emails_count,
    email_path:       outputs.email_path.clone(),
    notes_count:      outputs.notes_count,
    notes_path:       outputs.notes_path.clone(),
  })
}

/// Resolve every placement's stage id to the matching reference's display
/// name, preserving placement order. Duplicate reference ids resolve to the
/// last entry in listing order.
fn resolve_stages(
  detail: &CandidateDetail,
  references: &[Reference],
) -> Result<Vec<String>> {
  detail
    .placements
    .iter()
    .map(|placement| {
      references
        .iter()
        .rev()
        .find(|r| r.id == placement.stage_id)
        .map(|r| r.name.clone().unwrap_or_default())
        .ok_or(Error::UnresolvedStage {
          candidate_id: detail.id,
          stage_id:     placement.stage_id,
        })
    })
    .collect()
}

/// Last-wins selection of the offer reference naming the job.
fn select_job(candidate_id: u64, references: &[Reference]) -> String {
  match references.iter().rev().find(|r| r.kind == OFFER_KIND) {
    Some(offer) => offer
      .title
      .clone()
      .unwrap_or_else(|| UNKNOWN_JOB.to_string()),
    None => {
      tracing::warn!(candidate_id, "no offer reference found; job unknown");
      UNKNOWN_JOB.to_string()
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};

  use super::*;
  use crate::candidate::Placement;

  fn detail() -> CandidateDetail {
    CandidateDetail {
      id:               7,
      name:             "Jane Doe".into(),
      created_at:       Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap(),
      last_activity_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
      emails:           vec!["jane@example.com".into()],
      phones:           vec!["+45 12 34 56 78".into()],
      referrer:         None,
      gdpr_status:      Some("consented".into()),
      cv_original_url:  None,
      placements:       vec![Placement { stage_id: 5 }],
    }
  }

  fn stage(id: u64, name: &str) -> Reference {
    Reference {
      id,
      kind: "Stage".into(),
      name: Some(name.into()),
      title: None,
    }
  }

  fn offer(id: u64, title: &str) -> Reference {
    Reference {
      id,
      kind: OFFER_KIND.into(),
      name: None,
      title: Some(title.into()),
    }
  }

  #[test]
  fn stage_resolves_to_reference_name() {
    let row = project(
      &detail(),
      &[stage(5, "Interview")],
      &ArchiveOutputs::default(),
    )
    .unwrap();
    assert_eq!(row.stages, "Interview");
  }

  #[test]
  fn multiple_placements_preserve_order() {
    let mut d = detail();
    d.placements = vec![Placement { stage_id: 6 }, Placement { stage_id: 5 }];
    let row = project(
      &d,
      &[stage(5, "Interview"), stage(6, "Sourced")],
      &ArchiveOutputs::default(),
    )
    .unwrap();
    assert_eq!(row.stages, "Sourced, Interview");
  }

  #[test]
  fn unresolvable_stage_is_an_error() {
    let err = project(&detail(), &[], &ArchiveOutputs::default()).unwrap_err();
    assert!(matches!(
      err,
      Error::UnresolvedStage { candidate_id: 7, stage_id: 5 }
    ));
  }

  #[test]
  fn last_offer_wins() {
    let row = project(
      &detail(),
      &[stage(5, "Interview"), offer(8, "A"), offer(9, "B")],
      &ArchiveOutputs::default(),
    )
    .unwrap();
    assert_eq!(row.job, "B");
  }

  #[test]
  fn no_offer_yields_sentinel() {
    let row = project(
      &detail(),
      &[stage(5, "Interview")],
      &ArchiveOutputs::default(),
    )
    .unwrap();
    assert_eq!(row.job, UNKNOWN_JOB);
  }

  #[test]
  fn phones_cell_is_quoted_against_auto_formatting() {
    let row = project(
      &detail(),
      &[stage(5, "Interview")],
      &ArchiveOutputs::default(),
    )
    .unwrap();
    assert_eq!(row.phones, "'+45 12 34 56 78");
  }

  #[test]
  fn cells_match_canonical_column_order() {
    let row = project(
      &detail(),
      &[stage(5, "Interview"), offer(9, "Backend Engineer")],
      &ArchiveOutputs {
        cv_path:      "candidates/7_Jane Doe/cv.pdf".into(),
        email_path:   "candidates/7_Jane Doe/emails".into(),
        emails_count: 3,
        notes_path:   "candidates/7_Jane Doe/notes".into(),
        notes_count:  1,
      },
    )
    .unwrap();

    let cells = row.cells();
    assert_eq!(cells.len(), COLUMNS.len());
    assert_eq!(cells[0], "7");
    assert_eq!(cells[3], "Backend Engineer");
    assert_eq!(cells[11], "3");
    assert_eq!(cells[13], "1");
  }
}
