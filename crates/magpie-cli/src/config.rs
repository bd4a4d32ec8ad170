//! Runtime configuration — one explicit struct constructed at startup and
//! passed into every component; no ambient credential state.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Everything the run needs, deserialised from the layered sources
/// (TOML file, then `MAGPIE_*` environment).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  /// ATS API bearer credential.
  pub api_token:         String,
  /// Company whose candidate set is crawled.
  pub company_id:        String,
  #[serde(default = "default_api_base_url")]
  pub api_base_url:      String,
  /// Ledger spreadsheet document id.
  pub spreadsheet_id:    String,
  #[serde(default = "default_sheet_title")]
  pub sheet_title:       String,
  /// Path to the stored OAuth token for the ledger service.
  pub ledger_token_path: PathBuf,
  /// Root of the local mirror (cache + candidate directories).
  #[serde(default = "default_output_dir")]
  pub output_dir:        PathBuf,
}

fn default_api_base_url() -> String {
  "https://api.recruitee.com".to_string()
}

fn default_sheet_title() -> String {
  "Candidates".to_string()
}

fn default_output_dir() -> PathBuf {
  PathBuf::from(".")
}

/// Load configuration: the TOML file (optional) overlaid by `MAGPIE_*`
/// environment variables.
pub fn load(path: &Path) -> anyhow::Result<Config> {
  let settings = config::Config::builder()
    .add_source(config::File::from(path.to_path_buf()).required(false))
    .add_source(config::Environment::with_prefix("MAGPIE"))
    .build()
    .context("failed to read configuration")?;

  settings
    .try_deserialize()
    .context("failed to deserialise Config")
}
