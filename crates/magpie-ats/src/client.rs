//! Async HTTP client for the ATS REST API.

use std::time::Duration;

use magpie_core::fetch::Fetch;
use reqwest::Client;

use crate::{Error, Result};

/// Connection settings for the ATS API.
#[derive(Debug, Clone)]
pub struct AtsConfig {
  pub base_url:  String,
  pub api_token: String,
}

/// Async HTTP client for the ATS JSON API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct AtsClient {
  client: Client,
  config: AtsConfig,
}

impl AtsClient {
  pub fn new(config: AtsConfig) -> Result<Self> {
    // Long timeout: full-history exports for one candidate can be large.
    let client = Client::builder()
      .timeout(Duration::from_secs(100))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/{}",
      self.config.base_url.trim_end_matches('/'),
      path.trim_start_matches('/')
    )
  }
}

impl Fetch for AtsClient {
  type Error = Error;

  async fn get_json(&self, request_path: &str) -> Result<String> {
    let resp = self
      .client
      .get(self.url(request_path))
      .bearer_auth(&self.config.api_token)
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        path:   request_path.to_string(),
        status: resp.status(),
      });
    }
    Ok(resp.text().await?)
  }

  async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
    // Attachment links are pre-signed; no bearer header.
    let resp = self.client.get(url).send().await?;

    if !resp.status().is_success() {
      return Err(Error::Status {
        path:   url.to_string(),
        status: resp.status(),
      });
    }
    Ok(resp.bytes().await?.to_vec())
  }
}
