//! Allocator shim exported to the host.
//!
//! The host calls `canonical_abi_realloc` to obtain guest memory for list
//! arguments and `canonical_abi_free` to release lists the guest returned.
//! Both delegate to the installed [`GuestAllocator`](df_engine::GuestAllocator).

use df_engine::allocator::release_list;
use df_primitives::ListS64;

use crate::context;

/// Resize or allocate guest memory.
///
/// Aborts the module if the allocation fails, or if `align` is not a power
/// of two. Neither case returns to the caller.
///
/// # Safety
/// If `old_size > 0`, `ptr` must come from this shim with the same
/// `old_size` and `align`. `align` must be a power of two.
#[cfg_attr(target_arch = "wasm32", export_name = "canonical_abi_realloc")]
pub unsafe extern "C" fn canonical_abi_realloc(
    ptr: *mut u8,
    old_size: usize,
    align: usize,
    new_size: usize,
) -> *mut u8 {
    context::allocator().realloc(ptr, old_size, align, new_size)
}

/// Release guest memory.
///
/// A null `ptr` is ignored. `size` must be the size the buffer was
/// allocated with: a call with `size == 0` is treated as releasing a
/// zero-sized buffer and frees nothing, so a real buffer passed with size 0
/// stays allocated. List results are released with `size = len * 8` and
/// `align = 8`.
///
/// # Safety
/// A non-null `ptr` must come from this shim with the same `size` and
/// `align`, and must not be released twice.
#[cfg_attr(target_arch = "wasm32", export_name = "canonical_abi_free")]
pub unsafe extern "C" fn canonical_abi_free(ptr: *mut u8, size: usize, align: usize) {
    if ptr.is_null() {
        return;
    }
    context::allocator().free(ptr, size, align);
}

/// Release a list returned by `square_vec` or `mult_vec`.
///
/// # Safety
/// `list` must be owned by the caller and released at most once.
pub unsafe fn release_vector(list: ListS64) {
    release_list(context::allocator(), list);
}
