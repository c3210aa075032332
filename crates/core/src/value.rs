//! Primitive parameter values.
//!
//! Every adjustable parameter holds one of a closed set of primitive kinds.
//! `ParamValue` is the tagged union used wherever a value crosses a
//! type-erased boundary (field selectors, key/value sinks); `ParamKind` is
//! the discriminant-only view used for dispatch and diagnostics.
//!
//! Enumerated parameters live in memory as a `usize` ordinal into a
//! [`SymbolTable`](crate::symbol::SymbolTable) and cross the serialization
//! boundary as `Text` (the symbol's internal name) — never as the ordinal.

use serde::{Deserialize, Serialize};

/// The closed set of primitive kinds a parameter field may have.
///
/// Adding a kind here means extending every visitor backend; the engine's
/// traversal loop itself never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Bool,
    Int,
    /// Non-negative integer (e.g. window sizes, counts).
    Size,
    Float,
    Double,
    Text,
    /// Ordinal into a symbol table; serialized by internal name.
    Enum,
}

/// A single parameter value, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Size(usize),
    Float(f32),
    Double(f64),
    Text(String),
}

impl ParamValue {
    /// The kind tag for this value.
    ///
    /// Note: an enumerated field's in-memory ordinal travels as `Size`, so
    /// `Enum` never appears here; it exists only on descriptors.
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Size(_) => ParamKind::Size,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Double(_) => ParamKind::Double,
            ParamValue::Text(_) => ParamKind::Text,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<usize> {
        match self {
            ParamValue::Size(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            ParamValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            ParamValue::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Size => "size",
            ParamKind::Float => "float",
            ParamKind::Double => "double",
            ParamKind::Text => "text",
            ParamKind::Enum => "enum",
        };
        write!(f, "{}", name)
    }
}

/// Canonical textual form, as stored by string-keyed parameter maps.
///
/// Rust's default float formatting is shortest-round-trip, so a value
/// written here and parsed back reproduces the original bits exactly.
impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Size(v) => write!(f, "{}", v),
            ParamValue::Float(v) => write!(f, "{}", v),
            ParamValue::Double(v) => write!(f, "{}", v),
            ParamValue::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(v)
    }
}

impl From<usize> for ParamValue {
    fn from(v: usize) -> Self {
        ParamValue::Size(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Double(v)
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}
