//! Common utilities module
//!
//! Shared error types used by the core and by the outer I/O collaborators.

pub mod error;

pub use error::{ErrorKind, Result, SegmentationError};
