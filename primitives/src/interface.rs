//! Interface description of the df guest module.
//!
//! [`DF_INTERFACE`] lists every exported function with its interface types.
//! From it we derive the flat core-wasm signature each export must have and
//! the WITX text the module is published with (`wit/df.witx`).

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};
use serde::Serialize;

/// Maximum number of flat values a core-wasm export may return directly.
/// Anything wider goes through the return-area.
pub const MAX_FLAT_RESULTS: usize = 1;

/// Interface value types understood by this module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    S64,
    ListS64,
}

impl ValueType {
    /// Flat core-wasm values this type lowers to on wasm32.
    pub fn flat(self) -> &'static [FlatType] {
        match self {
            Self::S64 => &[FlatType::I64],
            // pointer, length
            Self::ListS64 => &[FlatType::I32, FlatType::I32],
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::S64 => write!(f, "s64"),
            Self::ListS64 => write!(f, "list<s64>"),
        }
    }
}

/// Core-wasm value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlatType {
    I32,
    I64,
}

/// A named parameter of an exported function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: &'static str,
    pub ty: ValueType,
}

/// Signature of one exported function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionSig {
    pub name: &'static str,
    pub params: &'static [Param],
    pub result: ValueType,
}

impl FunctionSig {
    /// Flat parameter list of the core-wasm export.
    pub fn flat_params(&self) -> Vec<FlatType> {
        self.params
            .iter()
            .flat_map(|p| p.ty.flat().iter().copied())
            .collect()
    }

    /// Flat result list of the core-wasm export.
    ///
    /// Results wider than [`MAX_FLAT_RESULTS`] are returned indirectly as a
    /// single `i32` return-area address.
    pub fn flat_results(&self) -> Vec<FlatType> {
        let flat = self.result.flat();
        if flat.len() > MAX_FLAT_RESULTS {
            alloc::vec![FlatType::I32]
        } else {
            flat.to_vec()
        }
    }

    /// True if the export returns through the return-area.
    pub fn uses_ret_area(&self) -> bool {
        self.result.flat().len() > MAX_FLAT_RESULTS
    }
}

impl fmt::Display for FunctionSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: function(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", param.name, param.ty)?;
        }
        write!(f, ") -> {}", self.result)
    }
}

const VAL_S64: &[Param] = &[Param { name: "val", ty: ValueType::S64 }];
const VAL_LIST: &[Param] = &[Param { name: "val", ty: ValueType::ListS64 }];
const AB_S64: &[Param] = &[
    Param { name: "a", ty: ValueType::S64 },
    Param { name: "b", ty: ValueType::S64 },
];
const AB_LIST: &[Param] = &[
    Param { name: "a", ty: ValueType::ListS64 },
    Param { name: "b", ty: ValueType::ListS64 },
];

/// Every function exported by the df guest, in declaration order.
pub const DF_INTERFACE: &[FunctionSig] = &[
    FunctionSig { name: "square", params: VAL_S64, result: ValueType::S64 },
    FunctionSig { name: "square_vec", params: VAL_LIST, result: ValueType::ListS64 },
    FunctionSig { name: "mult", params: AB_S64, result: ValueType::S64 },
    FunctionSig { name: "mult_vec", params: AB_LIST, result: ValueType::ListS64 },
];

/// Look up an exported function by name.
pub fn find(name: &str) -> Option<&'static FunctionSig> {
    DF_INTERFACE.iter().find(|sig| sig.name == name)
}

/// Render the interface as WITX text, one function per line.
pub fn to_witx() -> String {
    let mut out = String::new();
    for sig in DF_INTERFACE {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}", sig);
    }
    out
}
