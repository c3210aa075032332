//! Key/value contracts and the in-memory parameter map.
//!
//! Persistence itself lives outside this crate: the engine only talks to a
//! write-only [`ParamSink`] during serialization and a validating
//! [`ParamSource`] during deserialization. [`ParamMap`] is the standard
//! in-memory implementation of both, used as the staging area by the
//! capture visitor and as the exchange format with whatever storage layer
//! the caller owns (it is serde-serializable for that hand-off).
//!
//! ## Validation split
//!
//! Per the source contract, a `ParamSource` owns per-field validation:
//! presence, parse to the expected primitive, inclusive bounds, symbol
//! membership. The engine only sequences fields and decides what a failure
//! means for the overall call.

use std::str::FromStr;

use fxparam_core::{ParamValue, SymbolTable};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Why a single field failed to read from a [`ParamSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadError {
    /// No value stored under the key.
    Missing,
    /// Stored value does not parse to the expected primitive.
    Malformed,
    /// Parsed value lies outside the declared inclusive bounds.
    OutOfRange,
    /// Stored string matches no internal name in the symbol table.
    UnknownSymbol,
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Missing => write!(f, "value is missing"),
            ReadError::Malformed => write!(f, "value does not parse to the expected type"),
            ReadError::OutOfRange => write!(f, "value is outside the declared bounds"),
            ReadError::UnknownSymbol => write!(f, "value is not a recognized symbol"),
        }
    }
}

impl std::error::Error for ReadError {}

/// Write-only sink for serialization. Never fails.
pub trait ParamSink {
    fn write(&mut self, key: &str, value: ParamValue);
}

/// Validating read source for deserialization.
///
/// The `default` argument is part of the contract so that implementations
/// backed by stores with defaulting semantics may substitute it; the strict
/// in-memory [`ParamMap`] ignores it and reports [`ReadError::Missing`]
/// instead.
pub trait ParamSource {
    fn read_bool(&self, key: &str, default: bool) -> Result<bool, ReadError>;
    fn read_int(&self, key: &str, default: i32, min: i32, max: i32) -> Result<i32, ReadError>;
    fn read_size(&self, key: &str, default: usize, min: usize, max: usize)
        -> Result<usize, ReadError>;
    fn read_float(&self, key: &str, default: f32, min: f32, max: f32) -> Result<f32, ReadError>;
    fn read_double(&self, key: &str, default: f64, min: f64, max: f64) -> Result<f64, ReadError>;
    fn read_text(&self, key: &str, default: &str) -> Result<String, ReadError>;
    /// Resolve an internal name to its ordinal.
    fn read_enum(&self, key: &str, default: usize, symbols: &SymbolTable)
        -> Result<usize, ReadError>;
    /// Membership query, for callers distinguishing absent from invalid.
    fn contains_key(&self, key: &str) -> bool;
}

/// String-keyed, string-valued parameter map.
///
/// Values are stored in the canonical textual form of
/// [`ParamValue`]'s `Display` impl, so a scalar written here and read back
/// reproduces the original exactly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParamMap {
    entries: FxHashMap<String, String>,
}

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw stored text for a key, if any.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Store raw text directly, bypassing value formatting.
    ///
    /// Intended for callers loading externally produced maps.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn read_scalar<T>(&self, key: &str, min: T, max: T) -> Result<T, ReadError>
    where
        T: FromStr + PartialOrd,
    {
        let raw = self.entries.get(key).ok_or(ReadError::Missing)?;
        let value: T = raw.trim().parse().map_err(|_| ReadError::Malformed)?;
        // Written as a positive containment test so NaN (incomparable to
        // both bounds) is rejected rather than slipping through.
        if !(value >= min && value <= max) {
            return Err(ReadError::OutOfRange);
        }
        Ok(value)
    }
}

impl ParamSink for ParamMap {
    fn write(&mut self, key: &str, value: ParamValue) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

impl ParamSource for ParamMap {
    fn read_bool(&self, key: &str, _default: bool) -> Result<bool, ReadError> {
        let raw = self.entries.get(key).ok_or(ReadError::Missing)?;
        match raw.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ReadError::Malformed),
        }
    }

    fn read_int(&self, key: &str, _default: i32, min: i32, max: i32) -> Result<i32, ReadError> {
        self.read_scalar(key, min, max)
    }

    fn read_size(
        &self,
        key: &str,
        _default: usize,
        min: usize,
        max: usize,
    ) -> Result<usize, ReadError> {
        // usize::from_str already rejects negative input.
        self.read_scalar(key, min, max)
    }

    fn read_float(&self, key: &str, _default: f32, min: f32, max: f32) -> Result<f32, ReadError> {
        self.read_scalar(key, min, max)
    }

    fn read_double(&self, key: &str, _default: f64, min: f64, max: f64) -> Result<f64, ReadError> {
        self.read_scalar(key, min, max)
    }

    fn read_text(&self, key: &str, _default: &str) -> Result<String, ReadError> {
        self.entries.get(key).cloned().ok_or(ReadError::Missing)
    }

    fn read_enum(
        &self,
        key: &str,
        _default: usize,
        symbols: &SymbolTable,
    ) -> Result<usize, ReadError> {
        let raw = self.entries.get(key).ok_or(ReadError::Missing)?;
        symbols.ordinal(raw.trim()).ok_or(ReadError::UnknownSymbol)
    }

    fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_then_read_scalars() {
        let mut map = ParamMap::new();
        map.write("Gain", ParamValue::Float(10.5));
        map.write("Quality", ParamValue::Int(-4));
        map.write("Window", ParamValue::Size(1024));
        map.write("Bypass", ParamValue::Bool(true));
        map.write("Label", ParamValue::Text("vocal bus".into()));

        assert_eq!(map.read_float("Gain", 0.0, -60.0, 36.0), Ok(10.5));
        assert_eq!(map.read_int("Quality", 0, -10, 10), Ok(-4));
        assert_eq!(map.read_size("Window", 0, 64, 8192), Ok(1024));
        assert_eq!(map.read_bool("Bypass", false), Ok(true));
        assert_eq!(map.read_text("Label", ""), Ok("vocal bus".to_string()));
    }

    #[test]
    fn missing_key_is_reported_not_defaulted() {
        let map = ParamMap::new();
        assert_eq!(map.read_float("Gain", 0.0, -60.0, 36.0), Err(ReadError::Missing));
        assert_eq!(map.read_text("Label", "fallback"), Err(ReadError::Missing));
        assert!(!map.contains_key("Gain"));
    }

    #[test]
    fn malformed_and_out_of_range_are_distinct() {
        let mut map = ParamMap::new();
        map.insert_raw("Gain", "loud");
        assert_eq!(map.read_float("Gain", 0.0, -60.0, 36.0), Err(ReadError::Malformed));
        map.insert_raw("Gain", "100");
        assert_eq!(map.read_float("Gain", 0.0, -60.0, 36.0), Err(ReadError::OutOfRange));
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut map = ParamMap::new();
        map.insert_raw("Gain", "-60");
        assert_eq!(map.read_float("Gain", 0.0, -60.0, 36.0), Ok(-60.0));
        map.insert_raw("Gain", "36");
        assert_eq!(map.read_float("Gain", 0.0, -60.0, 36.0), Ok(36.0));
        map.insert_raw("Gain", "36.001");
        assert_eq!(map.read_float("Gain", 0.0, -60.0, 36.0), Err(ReadError::OutOfRange));
    }

    #[test]
    fn nan_is_rejected_by_bounds() {
        let mut map = ParamMap::new();
        map.insert_raw("Gain", "NaN");
        assert_eq!(map.read_float("Gain", 0.0, -60.0, 36.0), Err(ReadError::OutOfRange));
        map.insert_raw("Ratio", "NaN");
        assert_eq!(map.read_double("Ratio", 2.0, 1.0, 20.0), Err(ReadError::OutOfRange));
    }

    #[test]
    fn bool_accepts_numeric_forms() {
        let mut map = ParamMap::new();
        map.insert_raw("Bypass", "1");
        assert_eq!(map.read_bool("Bypass", false), Ok(true));
        map.insert_raw("Bypass", "0");
        assert_eq!(map.read_bool("Bypass", false), Ok(false));
        map.insert_raw("Bypass", "yes");
        assert_eq!(map.read_bool("Bypass", false), Err(ReadError::Malformed));
    }

    #[test]
    fn size_rejects_negative_input() {
        let mut map = ParamMap::new();
        map.insert_raw("Window", "-16");
        assert_eq!(map.read_size("Window", 0, 0, 8192), Err(ReadError::Malformed));
    }

    #[test]
    fn enum_reads_by_internal_name_only() {
        let symbols = SymbolTable::new(["Peak", "RMS"]);
        let mut map = ParamMap::new();
        map.insert_raw("Mode", "RMS");
        assert_eq!(map.read_enum("Mode", 0, &symbols), Ok(1));
        map.insert_raw("Mode", "1");
        assert_eq!(map.read_enum("Mode", 0, &symbols), Err(ReadError::UnknownSymbol));
        map.insert_raw("Mode", "rms");
        assert_eq!(map.read_enum("Mode", 0, &symbols), Err(ReadError::UnknownSymbol));
    }

    #[test]
    fn serde_round_trip() {
        let mut map = ParamMap::new();
        map.write("Gain", ParamValue::Float(10.5));
        map.write("Mode", ParamValue::Text("RMS".into()));
        let json = serde_json::to_string(&map).unwrap();
        let back: ParamMap = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
