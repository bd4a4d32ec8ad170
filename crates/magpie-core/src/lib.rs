//! Core types and trait definitions for the magpie candidate archiver.
//!
//! This crate is deliberately free of HTTP and filesystem dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod candidate;
pub mod error;
pub mod fetch;
pub mod ledger;
pub mod mail;
pub mod note;
pub mod summary;

pub use error::{Error, Result};
