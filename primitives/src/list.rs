//! Raw `list<s64>` descriptor as it crosses the flat ABI.

use crate::error::{DfError, DfResult};
use crate::types::{list_byte_size, DEFAULT_MAX_LIST_LEN, ELEMENT_ALIGN};

/// A `(pointer, length)` pair describing a run of `i64` values in linear memory.
///
/// The descriptor carries no ownership by itself. Inputs handed to the guest
/// are borrowed; outputs are owned by the caller until released through the
/// allocator shim with `size = len * 8` and `align = 8`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListS64 {
    pub ptr: *mut i64,
    pub len: usize,
}

impl ListS64 {
    /// The `[null, 0]` descriptor.
    pub const EMPTY: Self = Self {
        ptr: core::ptr::null_mut(),
        len: 0,
    };

    pub const fn new(ptr: *mut i64, len: usize) -> Self {
        Self { ptr, len }
    }

    /// Build a descriptor from the flat `(ptr, len)` arguments of an export.
    pub fn from_flat(ptr: *const i64, len: usize) -> Self {
        Self::new(ptr as *mut i64, len)
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Number of bytes backing this list, or `None` on overflow.
    pub fn byte_size(&self) -> Option<usize> {
        list_byte_size(self.len)
    }

    /// Alignment used when releasing the backing buffer.
    pub const fn align(&self) -> usize {
        ELEMENT_ALIGN
    }

    /// Borrow the described elements.
    ///
    /// An empty descriptor yields an empty slice regardless of its pointer.
    /// A length whose byte size cannot be addressed is rejected with
    /// `TooLong` before any slice is formed.
    ///
    /// # Safety
    /// If `len > 0`, `ptr` must be 8-byte aligned and valid for reads of
    /// `len` elements for the lifetime `'a`, and must not be mutated meanwhile.
    pub unsafe fn as_slice<'a>(&self) -> DfResult<&'a [i64]> {
        if self.len == 0 {
            return Ok(&[]);
        }
        if self.ptr.is_null() {
            return Err(DfError::NullPointer { len: self.len });
        }
        if self.len > DEFAULT_MAX_LIST_LEN {
            return Err(DfError::TooLong {
                len: self.len,
                max: DEFAULT_MAX_LIST_LEN,
            });
        }
        Ok(core::slice::from_raw_parts(self.ptr, self.len))
    }
}

impl Default for ListS64 {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_descriptor() {
        let list = ListS64::EMPTY;
        assert!(list.is_empty());
        assert!(list.is_null());
        assert_eq!(list.byte_size(), Some(0));
        assert_eq!(ListS64::default(), ListS64::EMPTY);
    }

    #[test]
    fn test_as_slice_borrows_input() {
        let mut data = [1i64, 2, 3];
        let list = ListS64::new(data.as_mut_ptr(), data.len());
        let slice = unsafe { list.as_slice() }.unwrap();
        assert_eq!(slice, &[1, 2, 3]);
        assert_eq!(list.byte_size(), Some(24));
        assert_eq!(list.align(), 8);
    }

    #[test]
    fn test_as_slice_empty_ignores_pointer() {
        let list = ListS64::new(8 as *mut i64, 0);
        assert_eq!(unsafe { list.as_slice() }.unwrap(), &[] as &[i64]);
    }

    #[test]
    fn test_as_slice_null_with_length() {
        let list = ListS64::from_flat(core::ptr::null(), 4);
        assert_eq!(
            unsafe { list.as_slice() }.unwrap_err(),
            DfError::NullPointer { len: 4 }
        );
    }

    #[test]
    fn test_as_slice_rejects_unaddressable_length() {
        let data = [0i64; 2];
        let list = ListS64::from_flat(data.as_ptr(), DEFAULT_MAX_LIST_LEN + 1);
        assert_eq!(
            unsafe { list.as_slice() }.unwrap_err(),
            DfError::TooLong {
                len: DEFAULT_MAX_LIST_LEN + 1,
                max: DEFAULT_MAX_LIST_LEN
            }
        );
    }
}
