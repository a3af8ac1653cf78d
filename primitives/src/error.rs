//! Error types for the df guest boundary.

use crate::interface::ValueType;

/// Errors raised while validating or marshaling boundary values.
///
/// None of these cross the flat ABI: the export trampolines map them onto
/// the return-area according to the configured `InvalidInputPolicy`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DfError {
    /// A vector operation received an empty input.
    #[error("empty input list")]
    EmptyInput,

    /// A binary vector operation received lists of different lengths.
    #[error("list length mismatch: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },

    /// A list descriptor carried a null pointer with a non-zero length.
    #[error("null list pointer with length {len}")]
    NullPointer { len: usize },

    /// A list exceeded the configured maximum element count.
    #[error("list too long: {len} elements, max {max}")]
    TooLong { len: usize, max: usize },

    /// A linear-memory access fell outside the memory bounds.
    #[error("out of bounds: {len} bytes at {addr} (memory size {memory})")]
    OutOfBounds { addr: usize, len: usize, memory: usize },

    /// WITX text could not be parsed.
    #[error("witx line {line}: {reason}")]
    Parse { line: usize, reason: &'static str },

    /// An interface type has no SQL column type.
    #[error("no SQL type for {0}")]
    NoSqlType(ValueType),

    /// A process-wide component was installed twice.
    #[error("{0} already installed")]
    AlreadyInstalled(&'static str),
}

/// Convenience result type for the df crates.
pub type DfResult<T> = core::result::Result<T, DfError>;
