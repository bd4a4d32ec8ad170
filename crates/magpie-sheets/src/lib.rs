//! Google Sheets implementation of the [`Ledger`](magpie_core::ledger::Ledger)
//! trait.
//!
//! Direct HTTP against the Sheets values API via reqwest; no provider SDK.
//! Authentication is a stored OAuth token pair (obtained out of band),
//! refreshed against the token endpoint when expired.

pub mod auth;
pub mod error;
pub mod ledger;

pub use error::{Error, Result};
pub use ledger::{LedgerConfig, SheetsLedger};
