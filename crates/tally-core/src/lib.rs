//! tally core: transport-agnostic counter primitives, error types, and the
//! snapshot codec.
//!
//! This crate defines the data model and the on-disk snapshot format shared by
//! the server and any tooling that inspects snapshot files. It intentionally
//! carries no HTTP or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed snapshot files surface as `TallyError` so a damaged file can never
//! take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod error;
pub mod snapshot;
pub mod table;

/// Shared result type.
pub use error::{Result, TallyError};
pub use table::CounterTable;
