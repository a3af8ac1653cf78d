//! Shared test helpers for integration tests.
//!
//! These helpers drive the exports the way a host does: arguments are
//! copied into buffers obtained from `canonical_abi_realloc`, the export is
//! called, the `[pointer, length]` record is read from the returned address,
//! and every buffer is released through `canonical_abi_free`.

#![allow(dead_code)]

use df_primitives::layout::{decode_ret_area, read_list};
use df_primitives::{ListS64, RetRecord, WordSize, ELEMENT_ALIGN, ELEMENT_SIZE, RET_AREA_SIZE};
use df_wasm_guest::{canonical_abi_free, canonical_abi_realloc, read_ret_area};

/// A list argument placed in guest memory by the host.
pub struct HostList {
    pub ptr: *mut i64,
    pub len: usize,
}

impl HostList {
    /// Allocate guest memory for `values` and copy them in.
    pub fn copy_in(values: &[i64]) -> Self {
        let size = values.len() * ELEMENT_SIZE;
        let ptr = unsafe {
            canonical_abi_realloc(core::ptr::null_mut(), 0, ELEMENT_ALIGN, size)
        };
        let ptr = ptr.cast::<i64>();
        if !values.is_empty() {
            unsafe { core::ptr::copy_nonoverlapping(values.as_ptr(), ptr, values.len()) };
        }
        Self { ptr, len: values.len() }
    }

    pub fn values(&self) -> Vec<i64> {
        unsafe { core::slice::from_raw_parts(self.ptr, self.len) }.to_vec()
    }
}

impl Drop for HostList {
    fn drop(&mut self) {
        unsafe {
            canonical_abi_free(self.ptr.cast(), self.len * ELEMENT_SIZE, ELEMENT_ALIGN)
        };
    }
}

/// Decode the record at `addr` from its raw bytes with the shared wire layout.
pub fn decode_record(addr: *const u8) -> ListS64 {
    let bytes = unsafe { addr.cast::<[u8; RET_AREA_SIZE]>().read() };
    let record = decode_ret_area(WordSize::NATIVE, &bytes);
    ListS64::new(record.ptr as usize as *mut i64, record.len as usize)
}

/// Read a list result from a return-area address, copy it out, and release it.
pub fn take_result(addr: *mut u8) -> Vec<i64> {
    let raw = decode_record(addr);
    assert_eq!(raw, unsafe { read_ret_area(addr) }, "guest and wire layout disagree");
    let values = copy_out(raw);
    release(raw);
    values
}

/// Copy a returned list out of guest memory through the bounds-checked
/// host reader.
pub fn copy_out(raw: ListS64) -> Vec<i64> {
    if raw.is_empty() {
        return Vec::new();
    }
    assert!(!raw.is_null(), "return-area holds a valid list");
    let size = raw.len * ELEMENT_SIZE;
    let window = unsafe { core::slice::from_raw_parts(raw.ptr.cast::<u8>(), size) };
    read_list(window, RetRecord::new(0, raw.len as u64)).expect("list fits its buffer")
}

pub fn release(raw: ListS64) {
    unsafe {
        canonical_abi_free(raw.ptr.cast(), raw.len * ELEMENT_SIZE, ELEMENT_ALIGN)
    };
}

/// `square_vec` through the flat ABI.
pub fn call_square_vec(values: &[i64]) -> Vec<i64> {
    let arg = HostList::copy_in(values);
    let addr = unsafe { df_wasm_guest::square_vec(arg.ptr, arg.len) };
    let out = take_result(addr);
    assert_eq!(arg.values(), values, "input list must not be mutated");
    out
}

/// `mult_vec` through the flat ABI.
pub fn call_mult_vec(a: &[i64], b: &[i64]) -> Vec<i64> {
    let a_arg = HostList::copy_in(a);
    let b_arg = HostList::copy_in(b);
    let addr = unsafe { df_wasm_guest::mult_vec(a_arg.ptr, a_arg.len, b_arg.ptr, b_arg.len) };
    let out = take_result(addr);
    assert_eq!(a_arg.values(), a, "input list must not be mutated");
    assert_eq!(b_arg.values(), b, "input list must not be mutated");
    out
}

/// Deterministic pseudo-random values (xorshift), including extremes.
pub fn sample_values(seed: u64, len: usize) -> Vec<i64> {
    let mut x = seed | 1;
    (0..len)
        .map(|i| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            match i % 11 {
                0 => i64::MAX,
                5 => i64::MIN,
                _ => x as i64,
            }
        })
        .collect()
}
