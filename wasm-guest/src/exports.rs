//! Guest exported functions.
//!
//! Each export lowers flat core-wasm arguments into native values, calls
//! the implementation, and lifts the result back:
//! - `square` — `(i64) -> i64`
//! - `square_vec` — `(ptr, len) -> ret_area`
//! - `mult` — `(i64, i64) -> i64`
//! - `mult_vec` — `(ptr, len, ptr, len) -> ret_area`
//!
//! List arguments are borrowed and never freed or mutated. A list result is
//! owned by the caller, who reads `[pointer, length]` from the returned
//! return-area address and releases the buffer with `canonical_abi_free`.
//! Exports must never panic on bad input: raw lengths are validated before
//! any slice is formed, and rejected lists are mapped onto the return-area
//! by the configured `InvalidInputPolicy`.

use df_engine::ops;
use df_engine::validation::{validate_binary, validate_unary};
use df_primitives::{DfResult, InvalidInputPolicy, ListS64};

use crate::list::GuestList;
use crate::{context, native, ret_area};

/// `square: function(val: s64) -> s64`
#[cfg_attr(target_arch = "wasm32", export_name = "square")]
pub extern "C" fn square(val: i64) -> i64 {
    tracing::trace!(val, "square");
    ops::square(val)
}

/// `square_vec: function(val: list<s64>) -> list<s64>`
///
/// # Safety
/// If `len > 0`, `ptr` must be an 8-byte aligned pointer to `len` readable
/// `i64` values that stay unchanged for the duration of the call.
#[cfg_attr(target_arch = "wasm32", export_name = "square_vec")]
pub unsafe extern "C" fn square_vec(ptr: *const i64, len: usize) -> *mut u8 {
    tracing::trace!(?ptr, len, "square_vec");
    let val = ListS64::from_flat(ptr, len);
    lift_list("square_vec", square_list(val))
}

/// `mult: function(a: s64, b: s64) -> s64`
#[cfg_attr(target_arch = "wasm32", export_name = "mult")]
pub extern "C" fn mult(a: i64, b: i64) -> i64 {
    tracing::trace!(a, b, "mult");
    ops::mult(a, b)
}

/// `mult_vec: function(a: list<s64>, b: list<s64>) -> list<s64>`
///
/// # Safety
/// Each `(ptr, len)` pair must satisfy the requirements of [`square_vec`].
#[cfg_attr(target_arch = "wasm32", export_name = "mult_vec")]
pub unsafe extern "C" fn mult_vec(
    a_ptr: *const i64,
    a_len: usize,
    b_ptr: *const i64,
    b_len: usize,
) -> *mut u8 {
    tracing::trace!(?a_ptr, a_len, ?b_ptr, b_len, "mult_vec");
    let a = ListS64::from_flat(a_ptr, a_len);
    let b = ListS64::from_flat(b_ptr, b_len);
    lift_list("mult_vec", mult_lists(a, b))
}

// Lengths are checked against the configured limit before the descriptors
// are turned into slices.
unsafe fn square_list(val: ListS64) -> DfResult<GuestList> {
    validate_unary(val.len, context::config().max_list_len)?;
    native::square_vec(val.as_slice()?)
}

unsafe fn mult_lists(a: ListS64, b: ListS64) -> DfResult<GuestList> {
    validate_binary(a.len, b.len, context::config().max_list_len)?;
    native::mult_vec(a.as_slice()?, b.as_slice()?)
}

/// Store a list result in the return-area and return the record's address.
fn lift_list(op: &'static str, result: DfResult<GuestList>) -> *mut u8 {
    match result {
        Ok(list) => ret_area::publish(Some(list.into_raw())),
        Err(err) => {
            let policy = context::config().invalid_input;
            tracing::debug!(op, %err, ?policy, "list input rejected");
            match policy {
                InvalidInputPolicy::EmptyResult => ret_area::publish(Some(ListS64::EMPTY)),
                InvalidInputPolicy::LeaveUntouched => ret_area::publish(None),
            }
        }
    }
}
