//! `df-wasm-guest` — WASM cdylib exposing the df functions to a host.
//!
//! On wasm32 this crate exports:
//!
//! - `canonical_abi_realloc` / `canonical_abi_free` — allocator shim the host
//!   uses to place arguments in, and release results from, guest memory
//! - `square`, `mult` — scalar `s64` functions
//! - `square_vec`, `mult_vec` — `list<s64>` functions returning the address
//!   of a `[pointer, length]` return-area record
//!
//! Returned lists are owned by the caller, who releases them with
//! `canonical_abi_free(ptr, len * 8, 8)`.
//!
//! Native builds keep the same functions with Rust symbol names, which lets
//! embedders and tests drive the boundary in-process. Embedders may replace
//! the allocator and the guest configuration once, before the first call.

// ── Modules ──

mod context;
mod list;
mod ret_area;
pub mod exports;
pub mod native;
pub mod shim;

pub use context::{allocator, config, configure, install_allocator};
pub use list::GuestList;
pub use ret_area::read_ret_area;

// Re-export the boundary functions. On wasm32 they carry their export names.
pub use exports::{mult, mult_vec, square, square_vec};
pub use shim::{canonical_abi_free, canonical_abi_realloc, release_vector};
