//! OAuth token handling for the ledger service.
//!
//! The token file is produced out of band by any standard OAuth tooling
//! that yields an access + refresh token pair for the spreadsheets scope.
//! Field names follow the widely-used `google-auth` on-disk format, with
//! `access_token` accepted as an alias on read.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// OAuth2 token payload persisted on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredToken {
  /// The access token.
  #[serde(alias = "access_token")]
  pub token:         String,
  /// Long-lived refresh token used to mint new access tokens.
  pub refresh_token: Option<String>,
  #[serde(default = "default_token_uri")]
  pub token_uri:     String,
  pub client_id:     String,
  #[serde(default)]
  pub client_secret: Option<String>,
  /// Access token expiry (ISO 8601).
  #[serde(default)]
  pub expiry:        Option<String>,
}

fn default_token_uri() -> String {
  "https://oauth2.googleapis.com/token".to_string()
}

/// Load the stored token from `path`.
pub fn load_token(path: &Path) -> Result<StoredToken> {
  if !path.exists() {
    return Err(Error::TokenNotFound(path.to_path_buf()));
  }
  let raw = std::fs::read_to_string(path)?;
  Ok(serde_json::from_str(&raw)?)
}

/// Persist the token back to `path` (after a refresh).
pub fn save_token(path: &Path, token: &StoredToken) -> Result<()> {
  std::fs::write(path, serde_json::to_string_pretty(token)?)?;
  Ok(())
}

/// Whether the access token is expired (or close enough to assume so).
/// A missing or unparseable expiry counts as expired.
pub fn is_expired(token: &StoredToken) -> bool {
  let Some(expiry) = &token.expiry else {
    return true;
  };
  match chrono::DateTime::parse_from_rfc3339(&expiry.replace('Z', "+00:00"))
    .or_else(|_| chrono::DateTime::parse_from_rfc3339(expiry))
  {
    // 60-second skew allowance.
    Ok(expiry) => expiry <= chrono::Utc::now() + chrono::Duration::seconds(60),
    Err(_) => true,
  }
}

/// Mint a fresh access token with the refresh-token grant and persist it.
pub async fn refresh(
  client: &reqwest::Client,
  path: &Path,
  token: &StoredToken,
) -> Result<StoredToken> {
  let refresh_token =
    token.refresh_token.as_deref().ok_or(Error::AuthExpired)?;

  let mut form = vec![
    ("client_id", token.client_id.as_str()),
    ("refresh_token", refresh_token),
    ("grant_type", "refresh_token"),
  ];
  if let Some(secret) = token.client_secret.as_deref() {
    form.push(("client_secret", secret));
  }

  let resp = client.post(&token.token_uri).form(&form).send().await?;
  let status = resp.status();
  let body = resp.text().await.unwrap_or_default();
  if !status.is_success() {
    return Err(Error::RefreshFailed(format!("HTTP {status}: {body}")));
  }

  let payload: serde_json::Value = serde_json::from_str(&body)?;
  let access_token = payload["access_token"].as_str().ok_or_else(|| {
    Error::RefreshFailed("no access_token in response".to_string())
  })?;
  let expires_in = payload["expires_in"].as_u64().unwrap_or(3600);
  let expiry = chrono::Utc::now() + chrono::Duration::seconds(expires_in as i64);

  let mut refreshed = token.clone();
  refreshed.token = access_token.to_string();
  refreshed.expiry = Some(expiry.to_rfc3339());

  save_token(path, &refreshed)?;
  Ok(refreshed)
}

/// A valid bearer token for the next API call, refreshing if needed.
pub async fn access_token(
  client: &reqwest::Client,
  path: &Path,
) -> Result<String> {
  let token = load_token(path)?;
  if is_expired(&token) {
    tracing::debug!("ledger access token expired; refreshing");
    let refreshed = refresh(client, path, &token).await?;
    Ok(refreshed.token)
  } else {
    Ok(token.token)
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn token(expiry: Option<String>) -> StoredToken {
    StoredToken {
      token: "ya29.test".into(),
      refresh_token: Some("1//refresh".into()),
      token_uri: default_token_uri(),
      client_id: "client".into(),
      client_secret: None,
      expiry,
    }
  }

  #[test]
  fn stored_token_accepts_access_token_alias() {
    let raw = r#"{
      "access_token": "ya29.alias",
      "refresh_token": "1//refresh",
      "client_id": "client"
    }"#;
    let parsed: StoredToken = serde_json::from_str(raw).unwrap();
    assert_eq!(parsed.token, "ya29.alias");
    assert_eq!(parsed.token_uri, default_token_uri());
  }

  #[test]
  fn missing_expiry_counts_as_expired() {
    assert!(is_expired(&token(None)));
  }

  #[test]
  fn future_expiry_is_valid() {
    let future = chrono::Utc::now() + chrono::Duration::hours(1);
    assert!(!is_expired(&token(Some(future.to_rfc3339()))));
  }

  #[test]
  fn past_expiry_is_expired() {
    let past = chrono::Utc::now() - chrono::Duration::hours(1);
    assert!(is_expired(&token(Some(past.to_rfc3339()))));
  }

  #[test]
  fn token_roundtrips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.json");
    let original = token(Some("2030-01-01T00:00:00Z".into()));

    save_token(&path, &original).unwrap();
    let loaded = load_token(&path).unwrap();
    assert_eq!(loaded.token, original.token);
    assert_eq!(loaded.refresh_token, original.refresh_token);
  }

  #[test]
  fn missing_file_is_a_dedicated_error() {
    let err = load_token(Path::new("/nonexistent/token.json")).unwrap_err();
    assert!(matches!(err, Error::TokenNotFound(_)));
  }
}
