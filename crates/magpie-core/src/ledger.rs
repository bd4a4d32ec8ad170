//! The `Ledger` trait and the row reconciliation rule.
//!
//! The trait is implemented by ledger backends (e.g. `magpie-sheets`).
//! Reconciliation itself is a pure decision over the row set loaded at run
//! start: match by candidate id and either update the matched row in place
//! or append a new one. Rows are never deleted.

use std::future::Future;

use crate::summary::SummaryRow;

// ─── Row types ───────────────────────────────────────────────────────────────

/// One existing row of the external ledger, as loaded at run start.
#[derive(Debug, Clone)]
pub struct LedgerRow {
  /// 1-based sheet row number (row 1 is the header row).
  pub row_number:   u32,
  /// Parsed `candidate_id` cell; `None` when empty or non-numeric.
  pub candidate_id: Option<u64>,
}

/// What the reconciler decided to do with one summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
  /// Overwrite the summary columns of the row at this sheet row number.
  Update(u32),
  /// No row matched; append a new one.
  Append,
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

/// Match `candidate_id` against the loaded rows.
///
/// The tie-break is explicit and named: when several rows carry the same
/// candidate id, the LAST one in sheet order is the one updated.
pub fn reconcile(rows: &[LedgerRow], candidate_id: u64) -> RowAction {
  rows
    .iter()
    .rev()
    .find(|row| row.candidate_id == Some(candidate_id))
    .map(|row| RowAction::Update(row.row_number))
    .unwrap_or(RowAction::Append)
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the external row-oriented ledger.
///
/// Both reconciliation branches persist: an update overwrites the matched
/// row column by column, an append adds a new row with exactly the summary
/// columns.
pub trait Ledger: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load all data rows once, at run start.
  fn load_rows(
    &self,
  ) -> impl Future<Output = Result<Vec<LedgerRow>, Self::Error>> + Send + '_;

  /// Append a new row; returns its sheet row number so the caller can fold
  /// it into the in-memory row set.
  fn append_row<'a>(
    &'a self,
    row: &'a SummaryRow,
  ) -> impl Future<Output = Result<u32, Self::Error>> + Send + 'a;

  /// Overwrite the summary columns of the row at `row_number` in place.
  fn update_row<'a>(
    &'a self,
    row_number: u32,
    row: &'a SummaryRow,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn row(row_number: u32, candidate_id: Option<u64>) -> LedgerRow {
    LedgerRow {
      row_number,
      candidate_id,
    }
  }

  #[test]
  fn no_match_appends() {
    let rows = vec![row(2, Some(1)), row(3, None), row(4, Some(9))];
    assert_eq!(reconcile(&rows, 42), RowAction::Append);
  }

  #[test]
  fn single_match_updates_in_place() {
    let rows = vec![row(2, Some(1)), row(3, Some(42))];
    assert_eq!(reconcile(&rows, 42), RowAction::Update(3));
  }

  #[test]
  fn duplicate_matches_pick_last_row() {
    let rows = vec![row(2, Some(42)), row(3, Some(7)), row(4, Some(42))];
    assert_eq!(reconcile(&rows, 42), RowAction::Update(4));
  }

  #[test]
  fn empty_ledger_appends() {
    assert_eq!(reconcile(&[], 42), RowAction::Append);
  }
}
