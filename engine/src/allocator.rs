//! Guest allocator abstraction.
//!
//! The allocator shim exported to the host (`canonical_abi_realloc`,
//! `canonical_abi_free`) delegates to a [`GuestAllocator`]. Embedders may
//! install their own; the default is [`SystemAllocator`].
//!
//! - In WASM: `SystemAllocator` over the module's global allocator
//! - In tests: `CountingAllocator` wrapping `SystemAllocator`

use alloc::alloc::{handle_alloc_error, Layout};
use core::sync::atomic::{AtomicUsize, Ordering};
use df_primitives::{DfError, DfResult, ListS64, DEFAULT_MAX_LIST_LEN, ELEMENT_ALIGN, ELEMENT_SIZE};

/// Memory manager for guest-owned buffers.
///
/// Allocation failure is fatal: implementations abort instead of returning
/// null, so callers never see a failed allocation. A request that cannot be
/// described as a `Layout` (an `align` that is not a power of two, or a
/// size that overflows when rounded up to `align`) is treated the same way.
///
/// A buffer has no backing memory when its size is zero, so `free` with
/// `size == 0` releases nothing.
pub trait GuestAllocator: Sync {
    /// Resize or allocate a buffer.
    ///
    /// With `old_size == 0` a fresh buffer of `new_size` bytes aligned to
    /// `align` is returned. Otherwise `ptr` is resized and its leading
    /// `min(old_size, new_size)` bytes are preserved.
    ///
    /// # Safety
    /// If `old_size > 0`, `ptr` must have been returned by this allocator
    /// with exactly `old_size` and `align`. `align` must be a power of two.
    unsafe fn realloc(&self, ptr: *mut u8, old_size: usize, align: usize, new_size: usize) -> *mut u8;

    /// Release a buffer. A null `ptr` or a zero `size` is ignored.
    ///
    /// # Safety
    /// A non-null `ptr` must have been returned by this allocator with
    /// exactly `size` and `align`, and must not be released twice.
    unsafe fn free(&self, ptr: *mut u8, size: usize, align: usize);
}

/// Allocate an uninitialized `list<s64>` buffer of `len` elements.
///
/// Returns `ListS64::EMPTY` for `len == 0`.
pub fn alloc_list(allocator: &dyn GuestAllocator, len: usize) -> DfResult<ListS64> {
    if len == 0 {
        return Ok(ListS64::EMPTY);
    }
    let size = ListS64::new(core::ptr::null_mut(), len)
        .byte_size()
        .ok_or(DfError::TooLong { len, max: DEFAULT_MAX_LIST_LEN })?;
    let ptr = unsafe { allocator.realloc(core::ptr::null_mut(), 0, ELEMENT_ALIGN, size) };
    Ok(ListS64::new(ptr.cast(), len))
}

/// Release a `list<s64>` buffer: `size = len * 8`, `align = 8`.
///
/// # Safety
/// `list` must be owned by the caller and allocated through `allocator`.
/// Must not be called twice for the same buffer.
pub unsafe fn release_list(allocator: &dyn GuestAllocator, list: ListS64) {
    if list.is_null() {
        return;
    }
    allocator.free(list.ptr.cast(), list.len.wrapping_mul(ELEMENT_SIZE), ELEMENT_ALIGN);
}

/// `None` when `align` is not a power of two or `size` overflows once
/// rounded up to `align`.
fn checked_layout(size: usize, align: usize) -> Option<Layout> {
    Layout::from_size_align(size, align).ok()
}

fn layout(size: usize, align: usize) -> Layout {
    match checked_layout(size, align) {
        Some(layout) => layout,
        None => invalid_layout(size, align),
    }
}

#[cold]
fn invalid_layout(size: usize, align: usize) -> ! {
    tracing::error!(size, align, "invalid allocation layout");
    abort()
}

#[cfg(feature = "std")]
fn abort() -> ! {
    std::process::abort()
}

// Without std the registered allocation error handler terminates the module.
#[cfg(not(feature = "std"))]
fn abort() -> ! {
    handle_alloc_error(Layout::new::<u8>())
}

// ── SystemAllocator: process heap ──

/// Default allocator backed by the global allocator of the module.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl GuestAllocator for SystemAllocator {
    unsafe fn realloc(&self, ptr: *mut u8, old_size: usize, align: usize, new_size: usize) -> *mut u8 {
        let (new_ptr, requested) = if old_size == 0 {
            if new_size == 0 {
                // Zero-sized buffers are never backed by memory.
                return layout(0, align).align() as *mut u8;
            }
            let requested = layout(new_size, align);
            (alloc::alloc::alloc(requested), requested)
        } else {
            let current = layout(old_size, align);
            if new_size == 0 {
                alloc::alloc::dealloc(ptr, current);
                return align as *mut u8;
            }
            let requested = layout(new_size, align);
            (alloc::alloc::realloc(ptr, current, new_size), requested)
        };
        if new_ptr.is_null() {
            handle_alloc_error(requested);
        }
        new_ptr
    }

    unsafe fn free(&self, ptr: *mut u8, size: usize, align: usize) {
        if ptr.is_null() || size == 0 {
            return;
        }
        alloc::alloc::dealloc(ptr, layout(size, align));
    }
}

// ── CountingAllocator: accounting wrapper ──

/// Snapshot of allocation accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AllocStats {
    /// Fresh allocations (`realloc` with `old_size == 0`, `new_size > 0`).
    pub allocations: usize,
    /// Resizes of existing buffers.
    pub reallocations: usize,
    /// Buffers released through `free` or shrunk to zero.
    pub releases: usize,
    /// Bytes currently held.
    pub live_bytes: usize,
}

impl AllocStats {
    /// Buffers allocated and not yet released.
    pub fn live_buffers(&self) -> usize {
        self.allocations.saturating_sub(self.releases)
    }
}

/// Wraps another allocator and keeps running totals.
///
/// Counters are updated with relaxed atomics; a snapshot is only consistent
/// when no other thread is allocating through the same instance.
#[derive(Debug, Default)]
pub struct CountingAllocator<A = SystemAllocator> {
    inner: A,
    allocations: AtomicUsize,
    reallocations: AtomicUsize,
    releases: AtomicUsize,
    live_bytes: AtomicUsize,
}

impl CountingAllocator<SystemAllocator> {
    pub const fn new() -> Self {
        Self::wrap(SystemAllocator)
    }
}

impl<A> CountingAllocator<A> {
    pub const fn wrap(inner: A) -> Self {
        Self {
            inner,
            allocations: AtomicUsize::new(0),
            reallocations: AtomicUsize::new(0),
            releases: AtomicUsize::new(0),
            live_bytes: AtomicUsize::new(0),
        }
    }

    pub fn stats(&self) -> AllocStats {
        AllocStats {
            allocations: self.allocations.load(Ordering::Relaxed),
            reallocations: self.reallocations.load(Ordering::Relaxed),
            releases: self.releases.load(Ordering::Relaxed),
            live_bytes: self.live_bytes.load(Ordering::Relaxed),
        }
    }
}

impl<A: GuestAllocator> GuestAllocator for CountingAllocator<A> {
    unsafe fn realloc(&self, ptr: *mut u8, old_size: usize, align: usize, new_size: usize) -> *mut u8 {
        let new_ptr = self.inner.realloc(ptr, old_size, align, new_size);
        match (old_size, new_size) {
            (0, 0) => {}
            (0, _) => {
                self.allocations.fetch_add(1, Ordering::Relaxed);
            }
            (_, 0) => {
                self.releases.fetch_add(1, Ordering::Relaxed);
            }
            _ => {
                self.reallocations.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.live_bytes.fetch_sub(old_size, Ordering::Relaxed);
        self.live_bytes.fetch_add(new_size, Ordering::Relaxed);
        tracing::trace!(old_size, new_size, align, "counted realloc");
        new_ptr
    }

    unsafe fn free(&self, ptr: *mut u8, size: usize, align: usize) {
        if ptr.is_null() || size == 0 {
            return;
        }
        self.inner.free(ptr, size, align);
        self.releases.fetch_add(1, Ordering::Relaxed);
        self.live_bytes.fetch_sub(size, Ordering::Relaxed);
        tracing::trace!(size, align, "counted free");
    }
}
