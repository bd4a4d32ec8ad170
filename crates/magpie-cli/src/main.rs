//! `magpie` — crawl an ATS for candidate records, archive each candidate's
//! CV, mail threads and notes to disk, and mirror a summary row per
//! candidate into a tracked spreadsheet.
//!
//! # Usage
//!
//! ```
//! MAGPIE_API_TOKEN=... MAGPIE_COMPANY_ID=... MAGPIE_SPREADSHEET_ID=... \
//!   MAGPIE_LEDGER_TOKEN_PATH=token.json magpie
//! magpie --config magpie.toml
//! ```
//!
//! The run is a bounded batch: one pass over the company's candidate set,
//! sequential, safe to interrupt and re-run.

mod config;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use magpie_archive::{Crawler, Layout, ResponseCache};
use magpie_ats::{Api, AtsClient, AtsConfig};
use magpie_sheets::{LedgerConfig, SheetsLedger};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "ATS candidate archiver and ledger mirror")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "magpie.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = config::load(&cli.config)?;

  let layout = Layout::new(&cfg.output_dir);

  let client = AtsClient::new(AtsConfig {
    base_url:  cfg.api_base_url.clone(),
    api_token: cfg.api_token.clone(),
  })
  .context("failed to build ATS client")?;
  let cached = ResponseCache::new(client, layout.cache_dir())
    .context("failed to open response cache")?;
  let api = Api::new(cached, &cfg.company_id);

  let ledger = SheetsLedger::new(LedgerConfig {
    spreadsheet_id: cfg.spreadsheet_id.clone(),
    sheet_title:    cfg.sheet_title.clone(),
    token_path:     cfg.ledger_token_path.clone(),
  })
  .context("failed to build ledger client")?;

  let crawler = Crawler::new(&api, &ledger, &layout);
  let report = crawler.run().await.context("run aborted")?;

  for (candidate, error) in &report.failures {
    tracing::error!(
      candidate_id = candidate.id,
      name = %candidate.name,
      %error,
      "candidate failed"
    );
  }
  tracing::info!(
    crawled = report.succeeded.len(),
    failed = report.failures.len(),
    "run complete"
  );

  if !report.failures.is_empty() {
    anyhow::bail!(
      "{} of {} candidates failed",
      report.failures.len(),
      report.failures.len() + report.succeeded.len()
    );
  }
  Ok(())
}
