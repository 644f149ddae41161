use std::sync::PoisonError;

use thiserror::Error;

use crate::Error;

/// Errors surfaced through the `UniFFI` bindings.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Undo or redo attempted at the edge of the history.
    #[error("cursor is at the edge of the history")]
    AtBoundary,
    /// Requested revision index does not exist.
    #[error("revision index is out of range")]
    IndexOutOfRange,
    /// Refiner was not registered with the core.
    #[error("refiner is not registered")]
    RefinerNotRegistered,
    /// Refiner failed to produce a document.
    #[error("refiner error")]
    Refiner,
    /// Patch rendering failed.
    #[error("patch error")]
    Patch,
    /// Internal invariant failed.
    #[error("internal error")]
    Internal,
}

impl From<Error> for CoreError {
    fn from(error: Error) -> Self {
        match error {
            Error::AtBoundary { .. } => Self::AtBoundary,
            Error::IndexOutOfRange { .. } => Self::IndexOutOfRange,
            Error::RefinerNotRegistered { .. } => Self::RefinerNotRegistered,
            Error::Refiner { .. } => Self::Refiner,
            Error::Patch { .. } => Self::Patch,
        }
    }
}

impl<T> From<PoisonError<T>> for CoreError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Internal
    }
}
