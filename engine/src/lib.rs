//! `df-engine` — native implementations behind the df guest exports.
//!
//! This crate holds everything below the flat ABI: the numeric kernels,
//! the precondition checks for vector operations, and the allocator
//! abstraction that owns guest buffers.
//!
//! ## Architecture
//!
//! - [`ops`] — `square`, `mult` and the elementwise `*_into` kernels
//! - [`validation`] — list preconditions (empty, length mismatch, limits)
//! - [`allocator::GuestAllocator`] — trait the allocator shim delegates to
//! - [`allocator::SystemAllocator`] — default, backed by the process heap
//! - [`allocator::CountingAllocator`] — accounting wrapper for tests and hosts

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod allocator;
pub mod ops;
pub mod validation;

// Re-export key types for convenience
pub use allocator::{AllocStats, CountingAllocator, GuestAllocator, SystemAllocator};
pub use ops::{mult, square};
