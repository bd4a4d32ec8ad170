//! HTTP client and typed endpoint layer for the ATS API.
//!
//! [`AtsClient`] is the concrete [`Fetch`](magpie_core::fetch::Fetch)
//! implementation (reqwest, bearer auth). [`Api`] sits on top of any `Fetch`
//! and decodes the wire envelopes into `magpie-core` types — generic so the
//! response cache can slot in between the two.

pub mod api;
pub mod client;
pub mod error;
mod wire;

pub use api::Api;
pub use client::{AtsClient, AtsConfig};
pub use error::{Error, Result};
