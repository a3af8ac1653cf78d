//! Core constants for the df guest boundary.
//!
//! These values fix the memory contract between the host and the guest:
//! element width of `list<s64>` buffers and the shape of the return-area.

/// Size in bytes of one `s64` list element.
pub const ELEMENT_SIZE: usize = 8;

/// Alignment in bytes of `s64` list buffers, used when releasing them.
pub const ELEMENT_ALIGN: usize = 8;

/// Size of the return-area record: two words at offsets 0 and 8.
pub const RET_AREA_SIZE: usize = 16;

/// Alignment of the return-area record.
pub const RET_AREA_ALIGN: usize = 8;

/// Offset of the buffer pointer inside the return-area.
pub const RET_AREA_PTR_OFFSET: usize = 0;

/// Offset of the element count inside the return-area.
pub const RET_AREA_LEN_OFFSET: usize = 8;

/// Largest element count whose byte size still forms a valid allocation layout.
pub const DEFAULT_MAX_LIST_LEN: usize = isize::MAX as usize / ELEMENT_SIZE;

/// Byte size of a list of `len` elements, or `None` on overflow.
pub fn list_byte_size(len: usize) -> Option<usize> {
    len.checked_mul(ELEMENT_SIZE)
}
