//! `df-primitives` — foundational types for the df WASM guest boundary.
//!
//! This crate provides the vector descriptor, return-area layout, error
//! types, guest configuration, and the interface description shared by the
//! numeric engine and the WASM guest module, plus host tooling that reads
//! WITX and renders `CREATE FUNCTION ... AS WASM` statements.
//!
//! Supports `#![no_std]` for WASM guest compatibility (use `default-features = false`).

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod types;
pub mod error;
pub mod list;
pub mod layout;
pub mod config;
pub mod interface;
pub mod witx;
pub mod sql;

// Re-export commonly used types at the crate root for convenience.
pub use types::{ELEMENT_ALIGN, ELEMENT_SIZE, RET_AREA_SIZE, DEFAULT_MAX_LIST_LEN};
pub use error::{DfError, DfResult};
pub use list::ListS64;
pub use layout::{RetRecord, WordSize};
pub use config::{GuestConfig, InvalidInputPolicy};
pub use interface::{FlatType, FunctionSig, ValueType, DF_INTERFACE};
pub use witx::{parse_witx, WitxFunction};
pub use sql::create_function;
