//! Shared Revise data models consumed by the core library and refiner crates.

pub mod diff;
pub mod document;
pub mod revision;

pub use diff::*;
pub use document::*;
pub use revision::*;
