//! Error types for the VRC engine.
//!
//! All operations return structured errors rather than panicking. The engine
//! keeps no state between calls, so a failed call never leaves anything to
//! clean up: the caller fixes the input and calls again.

use thiserror::Error;

/// Top-level error type for all engine operations.
///
/// Only parsing and the empty-set guard on error injection can fail; every
/// other operation is total over well-formed frames.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input held no tokens once surrounding whitespace was trimmed
    #[error("input cannot be empty")]
    EmptyInput,

    /// A token was not exactly nine `0`/`1` characters (token kept verbatim)
    #[error(
        "invalid 9-bit frame \"{0}\": use 9-bit blocks (e.g. 101010101) separated by spaces"
    )]
    MalformedFrame(String),

    /// An operation that needs at least one frame received none
    #[error("frame set is empty: at least one frame is required")]
    EmptyFrameSet,
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
