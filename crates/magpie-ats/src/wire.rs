//! Wire payload shapes for the ATS API.
//!
//! These mirror the JSON envelopes the API actually returns and exist only
//! to be converted into `magpie-core` types. Fields the archiver does not
//! use are not modeled; serde ignores them.

use magpie_core::{
  candidate::{CandidateDetail, CandidateRef, Reference},
  mail::{MailMessage, MailThread},
  note::Note,
};
use serde::Deserialize;

// ─── Candidates ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CandidateListEnvelope {
  #[serde(default)]
  pub candidates: Vec<CandidateRef>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateDetailEnvelope {
  pub candidate:  CandidateDetail,
  #[serde(default)]
  pub references: Vec<Reference>,
}

// ─── Mailbox ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MailboxEnvelope {
  #[serde(default)]
  pub threads: Vec<WireThread>,
}

#[derive(Debug, Deserialize)]
pub struct WireThread {
  pub id:       u64,
  #[serde(default)]
  pub messages: Vec<WireMessage>,
}

/// One wire message. `from`/`to` are participant lists; archival keeps the
/// first entry of each.
#[derive(Debug, Deserialize)]
pub struct WireMessage {
  #[serde(default)]
  pub from:               Vec<WireAddress>,
  #[serde(default)]
  pub to:                 Vec<WireAddress>,
  #[serde(default)]
  pub safe_stripped_html: String,
}

#[derive(Debug, Deserialize)]
pub struct WireAddress {
  pub email: String,
}

impl WireThread {
  pub fn into_thread(self) -> MailThread {
    MailThread {
      thread_id: self.id,
      messages:  self
        .messages
        .into_iter()
        .map(WireMessage::into_message)
        .collect(),
    }
  }
}

impl WireMessage {
  fn into_message(self) -> MailMessage {
    MailMessage {
      from:    first_email(self.from),
      to:      first_email(self.to),
      content: self.safe_stripped_html,
    }
  }
}

fn first_email(addresses: Vec<WireAddress>) -> String {
  addresses
    .into_iter()
    .next()
    .map(|a| a.email)
    .unwrap_or_default()
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NotesEnvelope {
  #[serde(default)]
  pub notes: Vec<WireNote>,
}

#[derive(Debug, Deserialize)]
pub struct WireNote {
  pub id:        u64,
  #[serde(default)]
  pub body_html: String,
}

impl WireNote {
  pub fn into_note(self) -> Note {
    Note {
      note_id: self.id,
      content: self.body_html,
    }
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn mailbox_keeps_first_participant_of_each_list() {
    let raw = r#"{
      "threads": [{
        "id": 31,
        "messages": [{
          "from": [{"email": "jane@example.com"}, {"email": "cc@example.com"}],
          "to": [{"email": "recruiter@acme.example"}],
          "safe_stripped_html": "<p>Hi</p>"
        }]
      }]
    }"#;

    let envelope: MailboxEnvelope = serde_json::from_str(raw).unwrap();
    let threads: Vec<_> = envelope
      .threads
      .into_iter()
      .map(WireThread::into_thread)
      .collect();

    assert_eq!(threads.len(), 1);
    assert_eq!(threads[0].thread_id, 31);
    assert_eq!(threads[0].messages[0].from, "jane@example.com");
    assert_eq!(threads[0].messages[0].to, "recruiter@acme.example");
    assert_eq!(threads[0].messages[0].content, "<p>Hi</p>");
  }

  #[test]
  fn empty_participant_list_collapses_to_empty_address() {
    let raw = r#"{
      "threads": [{
        "id": 31,
        "messages": [{"from": [], "to": [], "safe_stripped_html": ""}]
      }]
    }"#;

    let envelope: MailboxEnvelope = serde_json::from_str(raw).unwrap();
    let thread = envelope.threads.into_iter().next().unwrap().into_thread();
    assert_eq!(thread.messages[0].from, "");
    assert_eq!(thread.messages[0].to, "");
  }

  #[test]
  fn detail_envelope_decodes_candidate_and_references() {
    let raw = r#"{
      "candidate": {
        "id": 7,
        "name": "Jane Doe",
        "created_at": "2024-01-10T10:00:00Z",
        "last_activity_at": "2024-03-01T12:30:00Z",
        "emails": ["jane@example.com"],
        "phones": [],
        "referrer": null,
        "gdpr_status": null,
        "cv_original_url": null,
        "placements": [{"stage_id": 5}]
      },
      "references": [
        {"id": 5, "type": "Stage", "name": "Interview"},
        {"id": 9, "type": "Offer", "title": "Backend Engineer"}
      ]
    }"#;

    let envelope: CandidateDetailEnvelope = serde_json::from_str(raw).unwrap();
    assert_eq!(envelope.candidate.id, 7);
    assert_eq!(envelope.candidate.placements[0].stage_id, 5);
    assert_eq!(envelope.references[1].kind, "Offer");
    assert_eq!(
      envelope.references[1].title.as_deref(),
      Some("Backend Engineer")
    );
  }

  #[test]
  fn notes_envelope_decodes_note_bodies() {
    let raw =
      r#"{"notes": [{"id": 101, "body_html": "<p>Strong candidate</p>"}]}"#;

    let envelope: NotesEnvelope = serde_json::from_str(raw).unwrap();
    let note = envelope.notes.into_iter().next().unwrap().into_note();
    assert_eq!(note.note_id, 101);
    assert_eq!(note.content, "<p>Strong candidate</p>");
  }
}
