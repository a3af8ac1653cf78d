//! Owned `list<s64>` buffer allocated through the installed guest allocator.

use core::fmt;
use core::mem::ManuallyDrop;
use core::ops::Deref;

use df_engine::allocator::alloc_list;
use df_primitives::{DfResult, ListS64};

use crate::{context, shim};

/// A list buffer owned by the guest until handed to the host.
///
/// Dropping a `GuestList` releases its buffer. [`GuestList::into_raw`]
/// transfers ownership to whoever receives the descriptor, typically the
/// host through the return-area.
pub struct GuestList {
    raw: ListS64,
}

impl GuestList {
    /// Allocate `len` zeroed elements and let `fill` initialize them.
    pub fn new_with(len: usize, fill: impl FnOnce(&mut [i64])) -> DfResult<Self> {
        let mut list = Self {
            raw: alloc_list(context::allocator(), len)?,
        };
        if len > 0 {
            unsafe { core::ptr::write_bytes(list.raw.ptr, 0, len) };
        }
        fill(list.as_mut_slice());
        Ok(list)
    }

    /// Take ownership of a descriptor returned by a list export.
    ///
    /// # Safety
    /// `raw` must be owned by the caller, allocated through the installed
    /// allocator, and not released elsewhere.
    pub unsafe fn from_raw(raw: ListS64) -> Self {
        Self { raw }
    }

    /// Give up ownership and return the raw descriptor.
    pub fn into_raw(self) -> ListS64 {
        ManuallyDrop::new(self).raw
    }

    pub fn as_slice(&self) -> &[i64] {
        if self.raw.is_null() {
            return &[];
        }
        unsafe { core::slice::from_raw_parts(self.raw.ptr, self.raw.len) }
    }

    fn as_mut_slice(&mut self) -> &mut [i64] {
        if self.raw.is_null() {
            return &mut [];
        }
        unsafe { core::slice::from_raw_parts_mut(self.raw.ptr, self.raw.len) }
    }
}

impl Deref for GuestList {
    type Target = [i64];

    fn deref(&self) -> &[i64] {
        self.as_slice()
    }
}

impl Drop for GuestList {
    fn drop(&mut self) {
        unsafe { shim::release_vector(self.raw) };
    }
}

impl fmt::Debug for GuestList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl PartialEq<[i64]> for GuestList {
    fn eq(&self, other: &[i64]) -> bool {
        self.as_slice() == other
    }
}

impl<const N: usize> PartialEq<[i64; N]> for GuestList {
    fn eq(&self, other: &[i64; N]) -> bool {
        self.as_slice() == other
    }
}
