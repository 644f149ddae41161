//! Core library for Revise's refinement workflow.
//!
//! The crate is layered around three responsibilities:
//! - positional diffing of two documents for side-by-side display
//! - a cursor-based revision history with an apply/cancel boundary
//! - refiner integration that feeds new revisions into a history

#![warn(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    missing_docs
)]
#![cfg_attr(
    not(test),
    deny(
        clippy::dbg_macro,
        clippy::expect_used,
        clippy::panic,
        clippy::print_stderr,
        clippy::print_stdout,
        clippy::todo,
        clippy::unwrap_used
    )
)]

/// Positional diff generation and patch export.
pub mod diff;
/// `UniFFI` bindings for host applications.
pub mod ffi;
/// Revision history with undo/redo and commit/rollback.
pub mod history;
/// Refiner registry and service.
pub mod refiners;

#[doc(hidden)]
pub use ffi::UniFfiTag;
pub use diff::{compute_diff, DiffEngine};
pub use history::{AppendPolicy, HistoryConfig, RevisionHistory};
pub use refiners::{RefinerService, RefinerSummary};
pub use revise_api::{DiffLine, DiffLineKind, DiffSide, DiffStats, Revision, TextDocument};

/// Common result type for the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the core library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Undo at the first revision or redo at the last one.
    #[error("cannot {operation}: cursor is already at the edge of the history")]
    AtBoundary {
        /// Navigation that was attempted (`undo` or `redo`).
        operation: &'static str,
    },
    /// Requested revision index does not exist.
    #[error("revision index {index} is out of range for a history of {len}")]
    IndexOutOfRange {
        /// Index that was requested.
        index: usize,
        /// Number of revisions in the history.
        len: usize,
    },
    /// Refiner id was not found in the registry.
    #[error("refiner {refiner} is not registered")]
    RefinerNotRegistered {
        /// Identifier that failed lookup.
        refiner: String,
    },
    /// Refiner failed to produce a document.
    #[error("refiner {refiner} failed: {source}")]
    Refiner {
        /// Identifier of the failing refiner.
        refiner: String,
        /// Underlying refiner error.
        #[source]
        source: revise_refiner_api::RefinerError,
    },
    /// Rendering a unified patch failed.
    #[error("failed to render patch: {source}")]
    Patch {
        /// Original libgit2 error.
        #[from]
        source: git2::Error,
    },
}
