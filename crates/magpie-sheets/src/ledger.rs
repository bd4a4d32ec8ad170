//! [`SheetsLedger`] — the Google Sheets implementation of [`Ledger`].
//!
//! Rows are keyed by the `candidate_id` column, located via the sheet's
//! header row. Writes always emit the canonical
//! [`COLUMNS`](magpie_core::summary::COLUMNS) order; the sheet is owned by
//! this tool, so the header is created when the sheet is empty and assumed
//! canonical otherwise. `USER_ENTERED` input keeps the leading-quote phone
//! escape working the way a human typing it would.

use std::path::PathBuf;

use magpie_core::{
  ledger::{Ledger, LedgerRow},
  summary::{COLUMNS, SummaryRow},
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, auth};

const BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Settings for one spreadsheet-backed ledger.
#[derive(Debug, Clone)]
pub struct LedgerConfig {
  pub spreadsheet_id: String,
  pub sheet_title:    String,
  pub token_path:     PathBuf,
}

/// Google Sheets ledger backend.
pub struct SheetsLedger {
  client: reqwest::Client,
  config: LedgerConfig,
}

// ─── Wire shapes ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ValueRange {
  #[serde(default)]
  values: Vec<Vec<String>>,
}

#[derive(Debug, Serialize)]
struct WriteBody {
  values: Vec<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
  updates: AppendUpdates,
}

#[derive(Debug, Deserialize)]
struct AppendUpdates {
  #[serde(rename = "updatedRange")]
  updated_range: String,
}

// ─── Pure helpers ────────────────────────────────────────────────────────────

/// Last column letter of the canonical 15-column layout (`A` + 14 = `O`).
fn last_column() -> char {
  (b'A' + (COLUMNS.len() - 1) as u8) as char
}

/// A1 range covering the summary columns of one row.
fn row_range(sheet_title: &str, row_number: u32) -> String {
  let last = last_column();
  format!("{sheet_title}!A{row_number}:{last}{row_number}")
}

/// Sheet row number of the first cell in an A1 range like
/// `Candidates!A5:O5`.
fn row_number_of_range(range: &str) -> Option<u32> {
  let cells = range.rsplit('!').next()?;
  let first = cells.split(':').next()?;
  let digits: String = first.chars().filter(char::is_ascii_digit).collect();
  digits.parse().ok()
}

/// Interpret the fetched cell grid: locate `candidate_id` via the header
/// row, then parse each data row's key cell. Sheet rows are 1-based with
/// the header at row 1.
fn parse_rows(sheet_title: &str, values: &[Vec<String>]) -> Result<Vec<LedgerRow>> {
  let Some(header) = values.first() else {
    return Ok(Vec::new());
  };

  let key_column = header
    .iter()
    .position(|cell| cell.trim() == "candidate_id")
    .ok_or_else(|| Error::MissingKeyColumn(sheet_title.to_string()))?;

  Ok(
    values
      .iter()
      .enumerate()
      .skip(1)
      .map(|(i, row)| LedgerRow {
        row_number:   i as u32 + 1,
        candidate_id: row
          .get(key_column)
          .and_then(|cell| cell.trim().parse().ok()),
      })
      .collect(),
  )
}

// ─── SheetsLedger ────────────────────────────────────────────────────────────

impl SheetsLedger {
  pub fn new(config: LedgerConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(std::time::Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn values_url(&self, suffix: &str) -> String {
    format!(
      "{BASE_URL}/{}/values/{suffix}",
      self.config.spreadsheet_id
    )
  }

  async fn bearer(&self) -> Result<String> {
    auth::access_token(&self.client, &self.config.token_path).await
  }

  async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(Error::Api {
      status: status.as_u16(),
      message,
    })
  }

  /// Append one row of cells below the current data region.
  async fn append_cells(&self, cells: Vec<String>) -> Result<AppendResponse> {
    let url = format!(
      "{}:append",
      self.values_url(&self.config.sheet_title)
    );
    let resp = self
      .client
      .post(&url)
      .bearer_auth(self.bearer().await?)
      .query(&[
        ("valueInputOption", "USER_ENTERED"),
        ("insertDataOption", "INSERT_ROWS"),
      ])
      .json(&WriteBody {
        values: vec![cells],
      })
      .send()
      .await?;

    Ok(Self::check(resp).await?.json().await?)
  }
}

impl Ledger for SheetsLedger {
  type Error = Error;

  async fn load_rows(&self) -> Result<Vec<LedgerRow>> {
    let url = self.values_url(&self.config.sheet_title);
    let resp = self
      .client
      .get(&url)
      .bearer_auth(self.bearer().await?)
      .query(&[("majorDimension", "ROWS")])
      .send()
      .await?;
    let range: ValueRange = Self::check(resp).await?.json().await?;

    if range.values.is_empty() {
      // Fresh sheet: write the header row so later appends line up.
      tracing::info!(
        sheet = %self.config.sheet_title,
        "sheet is empty; writing header row"
      );
      self
        .append_cells(COLUMNS.iter().map(|c| c.to_string()).collect())
        .await?;
      return Ok(Vec::new());
    }

    parse_rows(&self.config.sheet_title, &range.values)
  }

  async fn append_row(&self, row: &SummaryRow) -> Result<u32> {
    let appended = self.append_cells(row.cells().to_vec()).await?;
    row_number_of_range(&appended.updates.updated_range)
      .ok_or(Error::BadAppendRange(appended.updates.updated_range))
  }

  async fn update_row(&self, row_number: u32, row: &SummaryRow) -> Result<()> {
    let range = row_range(&self.config.sheet_title, row_number);
    let resp = self
      .client
      .put(self.values_url(&range))
      .bearer_auth(self.bearer().await?)
      .query(&[("valueInputOption", "USER_ENTERED")])
      .json(&WriteBody {
        values: vec![row.cells().to_vec()],
      })
      .send()
      .await?;

    Self::check(resp).await?;
    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows
      .iter()
      .map(|r| r.iter().map(|c| c.to_string()).collect())
      .collect()
  }

  #[test]
  fn parse_rows_maps_header_and_data() {
    let values = grid(&[
      &COLUMNS,
      &["7", "2024-01-10", "", "Backend Engineer", "Jane Doe"],
      &["", "", "", "", ""],
      &["42", "2024-02-01", "", "Data Engineer", "Sam Poe"],
    ]);

    let rows = parse_rows("Candidates", &values).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].row_number, 2);
    assert_eq!(rows[0].candidate_id, Some(7));
    assert_eq!(rows[1].candidate_id, None);
    assert_eq!(rows[2].row_number, 4);
    assert_eq!(rows[2].candidate_id, Some(42));
  }

  #[test]
  fn parse_rows_finds_key_column_anywhere_in_header() {
    let values = grid(&[
      &["name", "candidate_id"],
      &["Jane Doe", "7"],
    ]);

    let rows = parse_rows("Candidates", &values).unwrap();
    assert_eq!(rows[0].candidate_id, Some(7));
  }

  #[test]
  fn header_without_key_column_errors() {
    let values = grid(&[&["name", "job"], &["Jane Doe", "Engineer"]]);
    let err = parse_rows("Candidates", &values).unwrap_err();
    assert!(matches!(err, Error::MissingKeyColumn(ref s) if s == "Candidates"));
  }

  #[test]
  fn row_number_parses_from_append_range() {
    assert_eq!(row_number_of_range("Candidates!A5:O5"), Some(5));
    assert_eq!(row_number_of_range("'My Sheet'!A12:O12"), Some(12));
    assert_eq!(row_number_of_range("garbage"), None);
  }

  #[test]
  fn row_range_covers_all_fifteen_columns() {
    assert_eq!(row_range("Candidates", 5), "Candidates!A5:O5");
  }
}
