//! Maps native catalog types onto Rust types.
//!
//! The mapping is total: [`map_type`] never fails, and any native type it does
//! not recognize becomes a `String`. Callers that would rather reject unknown
//! types can use [`lookup_type`] together with [`UnknownTypePolicy::Strict`].

use std::fmt::{Display, Formatter};
use serde::Serialize;

/// Native types whose width is decided by precision and scale.
const NUMERIC_FAMILY: &[&str] = &["NUMBER", "NUMERIC", "DECIMAL"];

/// Largest precision that still fits the narrow integer type.
const NARROW_INTEGER_MAX_PRECISION: i32 = 10;

/// Largest precision that is still rendered as a single precision float.
const SINGLE_FLOAT_MAX_PRECISION: i32 = 7;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub enum RustType {
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    String,
    NaiveDateTime,
    DateTimeWithOffset,
    Bytes,
}

impl RustType {
    pub fn type_path(&self) -> &'static str {
        match self {
            RustType::I16 => "i16",
            RustType::I32 => "i32",
            RustType::I64 => "i64",
            RustType::F32 => "f32",
            RustType::F64 => "f64",
            RustType::Bool => "bool",
            RustType::String => "String",
            RustType::NaiveDateTime => "chrono::NaiveDateTime",
            RustType::DateTimeWithOffset => "chrono::DateTime<chrono::FixedOffset>",
            RustType::Bytes => "Vec<u8>",
        }
    }
}

impl Display for RustType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_path())
    }
}

/// What to do with a native type that has no known mapping.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum UnknownTypePolicy {
    /// Silently map to `String`.
    #[default]
    Fallback,
    /// Abort generation with [`crate::ReflectorError::UnmappableType`].
    Strict,
}

/// Maps a native type to a Rust type, using `String` for anything unknown.
pub fn map_type(native_type: &str, precision: Option<i32>, scale: Option<i32>) -> RustType {
    lookup_type(native_type, precision, scale).unwrap_or(RustType::String)
}

/// Maps a native type to a Rust type, or `None` if the type is not recognized.
pub fn lookup_type(native_type: &str, precision: Option<i32>, scale: Option<i32>) -> Option<RustType> {
    let normalized = normalize_native_type(native_type);

    if NUMERIC_FAMILY.contains(&normalized.as_str()) {
        return Some(map_numeric(precision, scale));
    }

    let rust_type = match normalized.as_str() {
        "VARCHAR2" | "NVARCHAR2" | "CHAR" | "NCHAR" | "CLOB" | "NCLOB" | "LONG" | "VARCHAR"
        | "CHARACTER VARYING" | "CHARACTER" | "TEXT" => RustType::String,
        "DATE" | "TIMESTAMP" | "TIMESTAMP WITHOUT TIME ZONE" => RustType::NaiveDateTime,
        "TIMESTAMP WITH TIME ZONE" | "TIMESTAMP WITH LOCAL TIME ZONE" => RustType::DateTimeWithOffset,
        "BLOB" | "RAW" | "LONG RAW" | "BYTEA" => RustType::Bytes,
        "SMALLINT" => RustType::I16,
        "INTEGER" => RustType::I32,
        "BIGINT" => RustType::I64,
        "REAL" | "BINARY_FLOAT" => RustType::F32,
        "DOUBLE PRECISION" | "BINARY_DOUBLE" | "FLOAT" => RustType::F64,
        "BOOLEAN" => RustType::Bool,
        _ => return None,
    };

    Some(rust_type)
}

fn map_numeric(precision: Option<i32>, scale: Option<i32>) -> RustType {
    if scale == Some(0) {
        match precision {
            Some(p) if p <= NARROW_INTEGER_MAX_PRECISION => RustType::I32,
            _ => RustType::I64,
        }
    } else {
        match precision {
            Some(p) if p <= SINGLE_FLOAT_MAX_PRECISION => RustType::F32,
            _ => RustType::F64,
        }
    }
}

/// Upper-cases the type name, drops any parenthesized qualifiers and collapses whitespace,
/// so `timestamp(6) with time zone` becomes `TIMESTAMP WITH TIME ZONE`.
fn normalize_native_type(native_type: &str) -> String {
    let mut without_qualifiers = String::with_capacity(native_type.len());
    let mut depth = 0usize;

    for c in native_type.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => without_qualifiers.push(c),
            _ => {}
        }
    }

    without_qualifiers
        .split_whitespace()
        .map(|part| part.to_uppercase())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_numbers_use_precision_for_width() {
        assert_eq!(map_type("NUMBER", Some(1), Some(0)), RustType::I32);
        assert_eq!(map_type("NUMBER", Some(10), Some(0)), RustType::I32);
        assert_eq!(map_type("NUMBER", Some(11), Some(0)), RustType::I64);
        assert_eq!(map_type("NUMBER", Some(38), Some(0)), RustType::I64);
        assert_eq!(map_type("NUMBER", None, Some(0)), RustType::I64);
    }

    #[test]
    fn fractional_numbers_use_precision_for_width() {
        assert_eq!(map_type("NUMBER", Some(7), Some(2)), RustType::F32);
        assert_eq!(map_type("NUMBER", Some(1), Some(1)), RustType::F32);
        assert_eq!(map_type("NUMBER", Some(8), Some(2)), RustType::F64);
        assert_eq!(map_type("NUMBER", Some(12), Some(2)), RustType::F64);
        assert_eq!(map_type("NUMBER", None, Some(3)), RustType::F64);
    }

    #[test]
    fn unscaled_number_is_treated_as_fractional() {
        assert_eq!(map_type("NUMBER", None, None), RustType::F64);
        assert_eq!(map_type("NUMBER", Some(5), None), RustType::F32);
    }

    #[test]
    fn numeric_family_is_case_insensitive() {
        assert_eq!(map_type("number", Some(5), Some(0)), RustType::I32);
        assert_eq!(map_type("Numeric", Some(12), Some(0)), RustType::I64);
        assert_eq!(map_type("decimal", Some(12), Some(4)), RustType::F64);
    }

    #[test]
    fn fixed_table_types() {
        assert_eq!(map_type("VARCHAR2", None, None), RustType::String);
        assert_eq!(map_type("char", None, None), RustType::String);
        assert_eq!(map_type("CLOB", None, None), RustType::String);
        assert_eq!(map_type("DATE", None, None), RustType::NaiveDateTime);
        assert_eq!(map_type("timestamp", None, None), RustType::NaiveDateTime);
        assert_eq!(map_type("BLOB", None, None), RustType::Bytes);
        assert_eq!(map_type("bytea", None, None), RustType::Bytes);
        assert_eq!(map_type("character varying", None, None), RustType::String);
        assert_eq!(map_type("boolean", None, None), RustType::Bool);
        assert_eq!(map_type("bigint", Some(64), Some(0)), RustType::I64);
    }

    #[test]
    fn qualified_types_are_normalized() {
        assert_eq!(map_type("TIMESTAMP(6)", None, None), RustType::NaiveDateTime);
        assert_eq!(
            map_type("TIMESTAMP(6) WITH TIME ZONE", None, None),
            RustType::DateTimeWithOffset
        );
        assert_eq!(
            map_type("  timestamp   with local time zone ", None, None),
            RustType::DateTimeWithOffset
        );
    }

    #[test]
    fn unknown_types_fall_back_to_string() {
        assert_eq!(map_type("XMLTYPE", None, None), RustType::String);
        assert_eq!(map_type("SDO_GEOMETRY", Some(3), Some(0)), RustType::String);
        assert_eq!(map_type("", None, None), RustType::String);
    }

    #[test]
    fn lookup_reports_unknown_types() {
        assert_eq!(lookup_type("XMLTYPE", None, None), None);
        assert_eq!(lookup_type("VARCHAR2", None, None), Some(RustType::String));
    }

    #[test]
    fn type_paths() {
        assert_eq!(RustType::Bytes.to_string(), "Vec<u8>");
        assert_eq!(RustType::NaiveDateTime.to_string(), "chrono::NaiveDateTime");
        assert_eq!(RustType::I32.type_path(), "i32");
    }
}
