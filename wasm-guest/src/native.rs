//! Native API behind the list exports.
//!
//! These functions return owned results by value. The return-area only
//! exists at the flat boundary in [`crate::exports`].

use df_engine::ops;
use df_engine::validation::{validate_binary, validate_unary};
use df_primitives::DfResult;

use crate::context;
use crate::list::GuestList;

/// Elementwise square into a guest-allocated list.
///
/// Rejects empty input and lists above the configured maximum length.
pub fn square_vec(val: &[i64]) -> DfResult<GuestList> {
    validate_unary(val.len(), context::config().max_list_len)?;
    GuestList::new_with(val.len(), |out| ops::square_into(val, out))
}

/// Elementwise product into a guest-allocated list.
///
/// Rejects mismatched lengths, empty input, and lists above the configured
/// maximum length.
pub fn mult_vec(a: &[i64], b: &[i64]) -> DfResult<GuestList> {
    validate_binary(a.len(), b.len(), context::config().max_list_len)?;
    GuestList::new_with(a.len(), |out| ops::mult_into(a, b, out))
}
