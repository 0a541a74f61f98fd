use thiserror::Error;
use voxdef_core::WireError;

/// Errors emitted by the definition codecs and the registry.
///
/// Allocation exhaustion is deliberately absent: a full identifier pool
/// is signaled by returning `CONTENT_IGNORE`, and callers must check for
/// it.
#[derive(Debug, Error)]
pub enum DefError {
    /// Failure in the underlying wire primitives (I/O, framing, UTF-8).
    #[error(transparent)]
    Wire(#[from] WireError),
    /// A versioned record carried a version byte this build cannot read.
    #[error("unsupported serialization version {0}")]
    UnsupportedVersion(u8),
    /// The tile-count sentinel did not match the fixed six faces.
    #[error("unsupported tile count {0}")]
    UnsupportedTileCount(u8),
    /// The special-surface count sentinel did not match this build.
    #[error("unsupported special surface count {0}")]
    UnsupportedSpecialCount(u8),
    /// An identifier or index exceeded its fixed bounds.
    #[error("index {0} out of range")]
    OutOfRange(usize),
    /// A caller-supplied argument violated the operation's contract.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// An enum field carried a discriminant this build does not know.
    #[error("invalid {what} tag {value}")]
    InvalidTag {
        /// Which enum field was being decoded.
        what: &'static str,
        /// The rejected discriminant byte.
        value: u8,
    },
}
