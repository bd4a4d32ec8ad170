//! Typed endpoint layer over any [`Fetch`] implementation.
//!
//! Request paths double as cache keys, so they are built here in one place
//! and nowhere else.

use magpie_core::{
  candidate::{CandidateDetail, CandidateRef, Reference},
  fetch::Fetch,
  mail::MailThread,
  note::Note,
};
use serde::de::DeserializeOwned;

use crate::{
  Error, Result,
  wire::{
    CandidateDetailEnvelope, CandidateListEnvelope, MailboxEnvelope,
    NotesEnvelope, WireNote, WireThread,
  },
};

/// Typed access to the candidate endpoints, generic over the fetch layer so
/// the response cache can sit between this and the HTTP client.
pub struct Api<F> {
  fetch:      F,
  company_id: String,
}

impl<F: Fetch> Api<F> {
  pub fn new(fetch: F, company_id: impl Into<String>) -> Self {
    Self {
      fetch,
      company_id: company_id.into(),
    }
  }

  /// The underlying fetch layer — CV downloads bypass the typed endpoints.
  pub fn fetcher(&self) -> &F {
    &self.fetch
  }

  // ── Endpoints ─────────────────────────────────────────────────────────────

  /// List all candidates for the company.
  pub async fn list_candidates(&self) -> Result<Vec<CandidateRef>> {
    let path = format!("c/{}/candidates", self.company_id);
    let envelope: CandidateListEnvelope = self.get(&path).await?;
    Ok(envelope.candidates)
  }

  /// Fetch one candidate's full detail plus its references set.
  pub async fn candidate_detail(
    &self,
    candidate_id: u64,
  ) -> Result<(CandidateDetail, Vec<Reference>)> {
    let path = format!("c/{}/candidates/{candidate_id}", self.company_id);
    let envelope: CandidateDetailEnvelope = self.get(&path).await?;
    Ok((envelope.candidate, envelope.references))
  }

  /// Fetch one candidate's mailbox thread listing, preserving thread and
  /// message order as returned.
  pub async fn mailbox(&self, candidate_id: u64) -> Result<Vec<MailThread>> {
    let path =
      format!("c/{}/mailbox/candidate/{candidate_id}", self.company_id);
    let envelope: MailboxEnvelope = self.get(&path).await?;
    Ok(
      envelope
        .threads
        .into_iter()
        .map(WireThread::into_thread)
        .collect(),
    )
  }

  /// Fetch one candidate's notes collection.
  pub async fn notes(&self, candidate_id: u64) -> Result<Vec<Note>> {
    let path =
      format!("c/{}/candidates/{candidate_id}/notes", self.company_id);
    let envelope: NotesEnvelope = self.get(&path).await?;
    Ok(envelope.notes.into_iter().map(WireNote::into_note).collect())
  }

  // ── Plumbing ──────────────────────────────────────────────────────────────

  async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
    let raw = self
      .fetch
      .get_json(path)
      .await
      .map_err(|e| Error::Fetch(Box::new(e)))?;

    serde_json::from_str(&raw).map_err(|source| Error::Decode {
      path: path.to_string(),
      source,
    })
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  /// In-memory `Fetch` stub keyed by request path.
  struct StubFetch {
    payloads: HashMap<String, String>,
  }

  #[derive(Debug, thiserror::Error)]
  #[error("no stub payload for {0}")]
  struct StubError(String);

  impl Fetch for StubFetch {
    type Error = StubError;

    async fn get_json(&self, request_path: &str) -> Result<String, StubError> {
      self
        .payloads
        .get(request_path)
        .cloned()
        .ok_or_else(|| StubError(request_path.to_string()))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, StubError> {
      Err(StubError(url.to_string()))
    }
  }

  #[tokio::test]
  async fn list_candidates_builds_path_and_decodes() {
    let payloads = HashMap::from([(
      "c/acme/candidates".to_string(),
      r#"{"candidates": [{"id": 7, "name": "Jane Doe"}]}"#.to_string(),
    )]);
    let api = Api::new(StubFetch { payloads }, "acme");

    let candidates = api.list_candidates().await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].id, 7);
    assert_eq!(candidates[0].name, "Jane Doe");
  }

  #[tokio::test]
  async fn decode_failure_names_the_request_path() {
    let payloads = HashMap::from([(
      "c/acme/candidates/7/notes".to_string(),
      "not json".to_string(),
    )]);
    let api = Api::new(StubFetch { payloads }, "acme");

    let err = api.notes(7).await.unwrap_err();
    assert!(matches!(
      err,
      Error::Decode { ref path, .. } if path == "c/acme/candidates/7/notes"
    ));
  }

  #[tokio::test]
  async fn fetch_failure_is_wrapped() {
    let api = Api::new(
      StubFetch {
        payloads: HashMap::new(),
      },
      "acme",
    );

    let err = api.mailbox(7).await.unwrap_err();
    assert!(matches!(err, Error::Fetch(_)));
  }
}
