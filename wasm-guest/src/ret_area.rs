//! Return-area for list results.
//!
//! A core-wasm export can return a single value, so list results are stored
//! as `[pointer, length]` words at offsets 0 and 8 of a 16-byte record and
//! the export returns the record's address. The record is overwritten by
//! every list-returning call and is only valid until the next one.
//!
//! The record is thread-local: single-threaded wasm32 sees one fixed
//! address, and concurrent native callers never observe each other's results.

use std::cell::UnsafeCell;

use df_primitives::layout::{decode_ret_area, encode_ret_area};
use df_primitives::types::{RET_AREA_ALIGN, RET_AREA_SIZE};
use df_primitives::{ListS64, RetRecord, WordSize};

#[repr(C, align(8))]
struct RetArea(UnsafeCell<[u8; RET_AREA_SIZE]>);

const _: () = assert!(core::mem::align_of::<RetArea>() == RET_AREA_ALIGN);
const _: () = assert!(core::mem::size_of::<RetArea>() == RET_AREA_SIZE);

impl RetArea {
    const fn new() -> Self {
        Self(UnsafeCell::new([0; RET_AREA_SIZE]))
    }

    fn as_mut_ptr(&self) -> *mut u8 {
        self.0.get().cast()
    }

    fn store(&self, list: ListS64) {
        let record = RetRecord::new(list.ptr as usize as u64, list.len as u64);
        let bytes = encode_ret_area(WordSize::NATIVE, record);
        // The cell is only touched from its owning thread.
        unsafe { self.0.get().write(bytes) };
    }
}

thread_local! {
    static RET_AREA: RetArea = const { RetArea::new() };
}

/// Write `list` into the return-area (if given) and return its address.
pub(crate) fn publish(list: Option<ListS64>) -> *mut u8 {
    RET_AREA.with(|area| {
        if let Some(list) = list {
            area.store(list);
        }
        area.as_mut_ptr()
    })
}

/// Read the `[pointer, length]` record at `addr`.
///
/// # Safety
/// `addr` must be a return-area address produced by a list export on the
/// current thread, with no list export called since.
pub unsafe fn read_ret_area(addr: *const u8) -> ListS64 {
    let bytes = addr.cast::<[u8; RET_AREA_SIZE]>().read();
    let record = decode_ret_area(WordSize::NATIVE, &bytes);
    ListS64::new(record.ptr as usize as *mut i64, record.len as usize)
}
