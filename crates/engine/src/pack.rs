//! The ordered descriptor pack and its four interpreters.
//!
//! A pack is the fixed, ordered set of descriptors declared once for a host
//! type. Order is significant twice over: it is traversal order, and it is
//! commit order during deserialization — which is what makes the
//! partial-failure policy observable (see [`apply_fields`]).
//!
//! Each interpreter folds the descriptor sequence left to right through a
//! per-kind dispatch on [`ParamSpec`]. Per-parameter logic lives in the
//! descriptor's declaration, never here.
//!
//! [`apply_fields`]: ParamPack::apply_fields

use fxparam_core::ParamValue;

use crate::descriptor::{ParamDescriptor, ParamSpec};
use crate::error::SetError;
use crate::store::{ParamSink, ParamSource};
use crate::visitor::SettingsVisitor;

/// Fixed, ordered collection of descriptors for one settings struct.
///
/// Immutable after declaration; safely shareable read-only across hosts of
/// the same type.
pub struct ParamPack<S> {
    params: Vec<ParamDescriptor<S>>,
}

impl<S> ParamPack<S> {
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Builder-style append, for one-expression pack declarations.
    pub fn with(mut self, descriptor: ParamDescriptor<S>) -> Self {
        self.params.push(descriptor);
        self
    }

    pub fn push(&mut self, descriptor: ParamDescriptor<S>) {
        self.params.push(descriptor);
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Descriptors in declared order.
    pub fn iter(&self) -> impl Iterator<Item = &ParamDescriptor<S>> {
        self.params.iter()
    }

    /// Look up a descriptor by serialized key.
    pub fn find(&self, key: &str) -> Option<&ParamDescriptor<S>> {
        self.params.iter().find(|d| d.key() == key)
    }

    /// Write every descriptor's default into its field, in declared order.
    pub fn reset_fields(&self, settings: &mut S) {
        for d in &self.params {
            d.selector().set(settings, d.spec().default_value());
        }
    }

    /// Serialize every field to the sink under its key, in declared order.
    ///
    /// Unconditional: no bounds check, no clamp. Enumerated fields emit the
    /// internal name for the current ordinal, never the ordinal itself; an
    /// ordinal outside its table is skipped with a warning.
    pub fn capture_fields(&self, settings: &S, sink: &mut dyn ParamSink) {
        for d in &self.params {
            match d.spec() {
                ParamSpec::Enum { symbols, .. } => {
                    let ordinal = d.selector().get(settings).as_size().unwrap_or_default();
                    match symbols.name(ordinal) {
                        Some(name) => sink.write(d.key(), ParamValue::Text(name.to_string())),
                        None => log::warn!(
                            "get: ordinal {} for '{}' is outside its symbol table; skipping",
                            ordinal,
                            d.key()
                        ),
                    }
                }
                _ => sink.write(d.key(), d.selector().get(settings)),
            }
        }
    }

    /// Deserialize every field from the source, in declared order.
    ///
    /// Each field is validated through the source contract and written
    /// immediately on success — not staged. On the first failure the walk
    /// stops: fields before the failing key keep their new values, fields at
    /// and after it are untouched, and the failing key is reported.
    pub fn apply_fields(&self, settings: &mut S, source: &dyn ParamSource) -> Result<(), SetError> {
        for d in &self.params {
            let read = match d.spec() {
                ParamSpec::Bool { default } => {
                    source.read_bool(d.key(), *default).map(ParamValue::Bool)
                }
                ParamSpec::Int {
                    default, min, max, ..
                } => source
                    .read_int(d.key(), *default, *min, *max)
                    .map(ParamValue::Int),
                ParamSpec::Size {
                    default, min, max, ..
                } => source
                    .read_size(d.key(), *default, *min, *max)
                    .map(ParamValue::Size),
                ParamSpec::Float {
                    default, min, max, ..
                } => source
                    .read_float(d.key(), *default, *min, *max)
                    .map(ParamValue::Float),
                ParamSpec::Double {
                    default, min, max, ..
                } => source
                    .read_double(d.key(), *default, *min, *max)
                    .map(ParamValue::Double),
                ParamSpec::Text { default } => {
                    source.read_text(d.key(), default).map(ParamValue::Text)
                }
                ParamSpec::Enum { default, symbols } => source
                    .read_enum(d.key(), *default, symbols)
                    .map(ParamValue::Size),
            };
            match read {
                Ok(value) => d.selector().set(settings, value),
                Err(reason) => {
                    return Err(SetError::Validation {
                        key: d.key().to_string(),
                        reason,
                    })
                }
            }
        }
        Ok(())
    }

    /// Dispatch every field to the visitor method for its kind, in declared
    /// order, writing the possibly-mutated value back through the selector.
    pub fn visit_fields(&self, settings: &mut S, visitor: &mut dyn SettingsVisitor) {
        for d in &self.params {
            // Typed constructors guarantee the selector yields the spec's
            // kind; the default is a dead fallback.
            match d.spec() {
                ParamSpec::Bool { default } => {
                    let mut v = d.selector().get(settings).as_bool().unwrap_or(*default);
                    visitor.define_bool(&mut v, d.key(), *default);
                    d.selector().set(settings, ParamValue::Bool(v));
                }
                ParamSpec::Int {
                    default,
                    min,
                    max,
                    scale,
                } => {
                    let mut v = d.selector().get(settings).as_int().unwrap_or(*default);
                    visitor.define_int(&mut v, d.key(), *default, *min, *max, *scale);
                    d.selector().set(settings, ParamValue::Int(v));
                }
                ParamSpec::Size {
                    default,
                    min,
                    max,
                    scale,
                } => {
                    let mut v = d.selector().get(settings).as_size().unwrap_or(*default);
                    visitor.define_size(&mut v, d.key(), *default, *min, *max, *scale);
                    d.selector().set(settings, ParamValue::Size(v));
                }
                ParamSpec::Float {
                    default,
                    min,
                    max,
                    scale,
                } => {
                    let mut v = d.selector().get(settings).as_float().unwrap_or(*default);
                    visitor.define_float(&mut v, d.key(), *default, *min, *max, *scale);
                    d.selector().set(settings, ParamValue::Float(v));
                }
                ParamSpec::Double {
                    default,
                    min,
                    max,
                    scale,
                } => {
                    let mut v = d.selector().get(settings).as_double().unwrap_or(*default);
                    visitor.define_double(&mut v, d.key(), *default, *min, *max, *scale);
                    d.selector().set(settings, ParamValue::Double(v));
                }
                ParamSpec::Text { default } => {
                    let mut v = match d.selector().get(settings) {
                        ParamValue::Text(t) => t,
                        _ => default.clone(),
                    };
                    visitor.define_text(&mut v, d.key(), default);
                    d.selector().set(settings, ParamValue::Text(v));
                }
                ParamSpec::Enum { default, symbols } => {
                    let mut v = d.selector().get(settings).as_size().unwrap_or(*default);
                    visitor.define_enum(&mut v, d.key(), *default, symbols);
                    d.selector().set(settings, ParamValue::Size(v));
                }
            }
        }
    }
}

impl<S> Default for ParamPack<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> std::fmt::Debug for ParamPack<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.params.iter()).finish()
    }
}
