//! Precondition checks for list operations.
//!
//! A list operation produces output only for non-empty inputs within the
//! configured length limit; binary operations also require equal lengths.
//! Failures are reported as `DfError` and never allocate.

use df_primitives::{DfError, DfResult};

/// Validate the input of a unary list operation.
pub fn validate_unary(len: usize, max_len: usize) -> DfResult<()> {
    if len == 0 {
        return Err(DfError::EmptyInput);
    }
    if len > max_len {
        return Err(DfError::TooLong { len, max: max_len });
    }
    Ok(())
}

/// Validate the inputs of a binary elementwise list operation.
///
/// Checks, in order:
/// 1. equal lengths
/// 2. non-empty
/// 3. within `max_len`
pub fn validate_binary(left: usize, right: usize, max_len: usize) -> DfResult<()> {
    if left != right {
        return Err(DfError::LengthMismatch { left, right });
    }
    validate_unary(left, max_len)
}
