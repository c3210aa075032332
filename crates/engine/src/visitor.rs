//! The traversal contract and its three standard backends.
//!
//! A visitor sees every declared parameter in order, once per traversal,
//! through exactly one method per primitive kind. The engine reads the live
//! field, hands the visitor a mutable copy alongside the descriptor
//! metadata, and writes the (possibly mutated) copy back — so a backend may
//! read, write, or both, without knowing anything about the settings struct.
//!
//! Adding a primitive kind means adding a method here and implementing it
//! in all three backends; the traversal loop in [`pack`](crate::pack) never
//! changes.

use fxparam_core::{ParamValue, SymbolTable};

use crate::store::{ParamMap, ParamSink, ParamSource};

/// One traversal behavior over the closed set of primitive kinds.
///
/// Numeric kinds receive the declared inclusive bounds and scale factor;
/// what (if anything) they mean is the backend's business. `bool` and text
/// parameters have degenerate bounds and receive only their default.
///
/// Boolean defaults can also be biased outside a traversal: see
/// [`DefaultsVisitor::optional_yes`] and [`DefaultsVisitor::optional_no`]
/// for forcing an ambiguous flag toward "yes" or "no".
pub trait SettingsVisitor {
    fn define_bool(&mut self, var: &mut bool, key: &str, default: bool);
    fn define_int(&mut self, var: &mut i32, key: &str, default: i32, min: i32, max: i32, scale: i32);
    fn define_size(
        &mut self,
        var: &mut usize,
        key: &str,
        default: usize,
        min: usize,
        max: usize,
        scale: usize,
    );
    fn define_float(
        &mut self,
        var: &mut f32,
        key: &str,
        default: f32,
        min: f32,
        max: f32,
        scale: f32,
    );
    fn define_double(
        &mut self,
        var: &mut f64,
        key: &str,
        default: f64,
        min: f64,
        max: f64,
        scale: f64,
    );
    fn define_text(&mut self, var: &mut String, key: &str, default: &str);
    fn define_enum(&mut self, var: &mut usize, key: &str, default: usize, symbols: &SymbolTable);
}

// ============================================================================
// Capture backend
// ============================================================================

/// Records every visited value into a staged [`ParamMap`].
///
/// A read-only traversal that builds the serialized form without touching
/// an external sink; the caller drains the staged map afterwards. Enumerated
/// fields are captured as their internal name.
#[derive(Debug, Default)]
pub struct CaptureVisitor {
    staged: ParamMap,
}

impl CaptureVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The values staged so far.
    pub fn staged(&self) -> &ParamMap {
        &self.staged
    }

    /// Consume the visitor, yielding the staged map.
    pub fn into_map(self) -> ParamMap {
        self.staged
    }
}

impl SettingsVisitor for CaptureVisitor {
    fn define_bool(&mut self, var: &mut bool, key: &str, _default: bool) {
        self.staged.write(key, ParamValue::Bool(*var));
    }

    fn define_int(
        &mut self,
        var: &mut i32,
        key: &str,
        _default: i32,
        _min: i32,
        _max: i32,
        _scale: i32,
    ) {
        self.staged.write(key, ParamValue::Int(*var));
    }

    fn define_size(
        &mut self,
        var: &mut usize,
        key: &str,
        _default: usize,
        _min: usize,
        _max: usize,
        _scale: usize,
    ) {
        self.staged.write(key, ParamValue::Size(*var));
    }

    fn define_float(
        &mut self,
        var: &mut f32,
        key: &str,
        _default: f32,
        _min: f32,
        _max: f32,
        _scale: f32,
    ) {
        self.staged.write(key, ParamValue::Float(*var));
    }

    fn define_double(
        &mut self,
        var: &mut f64,
        key: &str,
        _default: f64,
        _min: f64,
        _max: f64,
        _scale: f64,
    ) {
        self.staged.write(key, ParamValue::Double(*var));
    }

    fn define_text(&mut self, var: &mut String, key: &str, _default: &str) {
        self.staged.write(key, ParamValue::Text(var.clone()));
    }

    fn define_enum(&mut self, var: &mut usize, key: &str, _default: usize, symbols: &SymbolTable) {
        match symbols.name(*var) {
            Some(name) => self.staged.write(key, ParamValue::Text(name.to_string())),
            None => log::warn!(
                "capture: ordinal {} for '{}' is outside its symbol table; skipping",
                var,
                key
            ),
        }
    }
}

// ============================================================================
// Apply backend
// ============================================================================

/// Drives fields from a [`ParamSource`], mirroring the per-field
/// deserialization rule as a reusable visitor.
///
/// Two modes: *validating* checks every field without touching it, *writing*
/// checks then assigns. Unlike the engine's deserialize operation, the
/// traversal does not abort on the first bad field; the `ok` flag
/// accumulates across all of them, so one pass reports every field.
pub struct ApplyVisitor<'a> {
    source: &'a dyn ParamSource,
    write: bool,
    ok: bool,
}

impl<'a> ApplyVisitor<'a> {
    /// Check fields against the source without mutating them.
    pub fn validating(source: &'a dyn ParamSource) -> Self {
        Self {
            source,
            write: false,
            ok: true,
        }
    }

    /// Check fields and assign the ones that validate.
    pub fn writing(source: &'a dyn ParamSource) -> Self {
        Self {
            source,
            write: true,
            ok: true,
        }
    }

    /// True while every field seen so far validated.
    pub fn ok(&self) -> bool {
        self.ok
    }

    /// Whether the source holds any value for `key` — lets callers
    /// distinguish absent from invalid.
    pub fn could_get(&self, key: &str) -> bool {
        self.source.contains_key(key)
    }
}

impl SettingsVisitor for ApplyVisitor<'_> {
    fn define_bool(&mut self, var: &mut bool, key: &str, default: bool) {
        match self.source.read_bool(key, default) {
            Ok(v) => {
                if self.write {
                    *var = v;
                }
            }
            Err(_) => self.ok = false,
        }
    }

    fn define_int(&mut self, var: &mut i32, key: &str, default: i32, min: i32, max: i32, _scale: i32) {
        match self.source.read_int(key, default, min, max) {
            Ok(v) => {
                if self.write {
                    *var = v;
                }
            }
            Err(_) => self.ok = false,
        }
    }

    fn define_size(
        &mut self,
        var: &mut usize,
        key: &str,
        default: usize,
        min: usize,
        max: usize,
        _scale: usize,
    ) {
        match self.source.read_size(key, default, min, max) {
            Ok(v) => {
                if self.write {
                    *var = v;
                }
            }
            Err(_) => self.ok = false,
        }
    }

    fn define_float(
        &mut self,
        var: &mut f32,
        key: &str,
        default: f32,
        min: f32,
        max: f32,
        _scale: f32,
    ) {
        match self.source.read_float(key, default, min, max) {
            Ok(v) => {
                if self.write {
                    *var = v;
                }
            }
            Err(_) => self.ok = false,
        }
    }

    fn define_double(
        &mut self,
        var: &mut f64,
        key: &str,
        default: f64,
        min: f64,
        max: f64,
        _scale: f64,
    ) {
        match self.source.read_double(key, default, min, max) {
            Ok(v) => {
                if self.write {
                    *var = v;
                }
            }
            Err(_) => self.ok = false,
        }
    }

    fn define_text(&mut self, var: &mut String, key: &str, default: &str) {
        match self.source.read_text(key, default) {
            Ok(v) => {
                if self.write {
                    *var = v;
                }
            }
            Err(_) => self.ok = false,
        }
    }

    fn define_enum(&mut self, var: &mut usize, key: &str, default: usize, symbols: &SymbolTable) {
        match self.source.read_enum(key, default, symbols) {
            Ok(v) => {
                if self.write {
                    *var = v;
                }
            }
            Err(_) => self.ok = false,
        }
    }
}

// ============================================================================
// Defaults backend
// ============================================================================

/// Substitutes every visited field's declared default.
///
/// Independent of the engine's reset operation so that callers can default
/// a subset of fields (e.g. one parameter during interactive editing) by
/// visiting only part of a pack.
#[derive(Debug, Default)]
pub struct DefaultsVisitor;

impl DefaultsVisitor {
    pub fn new() -> Self {
        Self
    }

    /// Bias an ambiguous boolean toward "yes".
    pub fn optional_yes(&mut self, var: &mut bool) {
        *var = true;
    }

    /// Bias an ambiguous boolean toward "no".
    pub fn optional_no(&mut self, var: &mut bool) {
        *var = false;
    }
}

impl SettingsVisitor for DefaultsVisitor {
    fn define_bool(&mut self, var: &mut bool, _key: &str, default: bool) {
        *var = default;
    }

    fn define_int(
        &mut self,
        var: &mut i32,
        _key: &str,
        default: i32,
        _min: i32,
        _max: i32,
        _scale: i32,
    ) {
        *var = default;
    }

    fn define_size(
        &mut self,
        var: &mut usize,
        _key: &str,
        default: usize,
        _min: usize,
        _max: usize,
        _scale: usize,
    ) {
        *var = default;
    }

    fn define_float(
        &mut self,
        var: &mut f32,
        _key: &str,
        default: f32,
        _min: f32,
        _max: f32,
        _scale: f32,
    ) {
        *var = default;
    }

    fn define_double(
        &mut self,
        var: &mut f64,
        _key: &str,
        default: f64,
        _min: f64,
        _max: f64,
        _scale: f64,
    ) {
        *var = default;
    }

    fn define_text(&mut self, var: &mut String, _key: &str, default: &str) {
        *var = default.to_string();
    }

    fn define_enum(&mut self, var: &mut usize, _key: &str, default: usize, _symbols: &SymbolTable) {
        *var = default;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxparam_core::SymbolTable;

    #[test]
    fn capture_stages_textual_values() {
        let mut visitor = CaptureVisitor::new();
        let mut gain = 10.5f32;
        let mut mode = 1usize;
        let symbols = SymbolTable::new(["Peak", "RMS"]);

        visitor.define_float(&mut gain, "Gain", 0.0, -60.0, 36.0, 1.0);
        visitor.define_enum(&mut mode, "Mode", 0, &symbols);

        let staged = visitor.into_map();
        assert_eq!(staged.raw("Gain"), Some("10.5"));
        assert_eq!(staged.raw("Mode"), Some("RMS"));
        // Traversal must not disturb the fields.
        assert_eq!(gain, 10.5);
        assert_eq!(mode, 1);
    }

    #[test]
    fn capture_skips_out_of_table_ordinal() {
        let mut visitor = CaptureVisitor::new();
        let mut mode = 5usize;
        let symbols = SymbolTable::new(["Peak", "RMS"]);
        visitor.define_enum(&mut mode, "Mode", 0, &symbols);
        assert_eq!(visitor.staged().raw("Mode"), None);
    }

    #[test]
    fn apply_validating_checks_without_writing() {
        let mut map = ParamMap::new();
        map.insert_raw("Gain", "10.5");
        let mut visitor = ApplyVisitor::validating(&map);
        let mut gain = 0.0f32;
        visitor.define_float(&mut gain, "Gain", 0.0, -60.0, 36.0, 1.0);
        assert!(visitor.ok());
        assert_eq!(gain, 0.0);
    }

    #[test]
    fn apply_writing_assigns_valid_fields() {
        let mut map = ParamMap::new();
        map.insert_raw("Gain", "10.5");
        let mut visitor = ApplyVisitor::writing(&map);
        let mut gain = 0.0f32;
        visitor.define_float(&mut gain, "Gain", 0.0, -60.0, 36.0, 1.0);
        assert!(visitor.ok());
        assert_eq!(gain, 10.5);
    }

    #[test]
    fn apply_accumulates_failures_without_aborting() {
        let mut map = ParamMap::new();
        map.insert_raw("Gain", "100"); // out of range
        map.insert_raw("Mode", "RMS");
        let symbols = SymbolTable::new(["Peak", "RMS"]);

        let mut visitor = ApplyVisitor::writing(&map);
        let mut gain = 0.0f32;
        let mut mode = 0usize;
        visitor.define_float(&mut gain, "Gain", 0.0, -60.0, 36.0, 1.0);
        visitor.define_enum(&mut mode, "Mode", 0, &symbols);

        // The bad field is reported, but later fields are still applied.
        assert!(!visitor.ok());
        assert_eq!(gain, 0.0);
        assert_eq!(mode, 1);
    }

    #[test]
    fn apply_could_get_distinguishes_absent_from_invalid() {
        let mut map = ParamMap::new();
        map.insert_raw("Gain", "loud");
        let visitor = ApplyVisitor::validating(&map);
        assert!(visitor.could_get("Gain"));
        assert!(!visitor.could_get("Mode"));
    }

    #[test]
    fn defaults_substitutes_declared_defaults() {
        let mut visitor = DefaultsVisitor::new();
        let mut gain = 10.5f32;
        let mut label = "custom".to_string();
        let mut mode = 1usize;
        let symbols = SymbolTable::new(["Peak", "RMS"]);

        visitor.define_float(&mut gain, "Gain", 0.0, -60.0, 36.0, 1.0);
        visitor.define_text(&mut label, "Label", "preset");
        visitor.define_enum(&mut mode, "Mode", 0, &symbols);

        assert_eq!(gain, 0.0);
        assert_eq!(label, "preset");
        assert_eq!(mode, 0);
    }

    #[test]
    fn defaults_bias_helpers_force_booleans() {
        let mut visitor = DefaultsVisitor::new();
        let mut flag = false;
        visitor.optional_yes(&mut flag);
        assert!(flag);
        visitor.optional_no(&mut flag);
        assert!(!flag);
    }
}
