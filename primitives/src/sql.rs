//! `CREATE FUNCTION ... AS WASM` statement rendering.
//!
//! Every function becomes a table-valued SQL function loaded from the
//! compiled module. Arguments map through [`SQL_TYPE_MAP`]. The result is a
//! single `value` column: one row for a scalar result, one row per element
//! for a list result.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::error::{DfError, DfResult};
use crate::interface::{FunctionSig, ValueType};

/// Interface type name → SQL column type.
pub const SQL_TYPE_MAP: &[(&str, &str)] = &[
    ("f64", "double"),
    ("string", "varchar(256)"),
    ("s64", "bigint"),
    ("list<u8>", "varchar(256)"),
];

/// Name of the result column.
pub const RESULT_COLUMN: &str = "value";

fn sql_type(ty: ValueType) -> DfResult<&'static str> {
    let name = ty.to_string();
    SQL_TYPE_MAP
        .iter()
        .find(|(witx, _)| *witx == name)
        .map(|&(_, sql)| sql)
        .ok_or(DfError::NoSqlType(ty))
}

/// Render the statement registering `sig` from the module at `wasm_path`.
///
/// Fails with `NoSqlType` for an argument type without a SQL column type;
/// `list<s64>` is only expressible as a result.
pub fn create_function(sig: &FunctionSig, wasm_path: &str) -> DfResult<String> {
    let args = sig
        .params
        .iter()
        .map(|p| Ok(format!("{} {}", p.name, sql_type(p.ty)?)))
        .collect::<DfResult<Vec<_>>>()?
        .join(", ");

    let element = match sig.result {
        ValueType::ListS64 => ValueType::S64,
        scalar => scalar,
    };
    let results = format!("{} {} not null", RESULT_COLUMN, sql_type(element)?);

    Ok(format!(
        "CREATE OR REPLACE FUNCTION {}({}) RETURNS TABLE({}) AS WASM INFILE \"{}\";",
        sig.name, args, results, wasm_path
    ))
}
