//! Parameter descriptors and field selectors.
//!
//! A descriptor is pure, immutable metadata for one adjustable parameter:
//! its serialized key, its per-kind payload (default, bounds, scale or
//! symbol table), and the selector binding it to one field of the host's
//! settings struct. Descriptors contain no behavior; the interpreter
//! operations in [`pack`](crate::pack) dispatch on the kind tag.
//!
//! ## Bounds semantics
//!
//! `min`/`max` are inclusive and consulted only during deserialization.
//! Direct assignment and serialization never clamp or reject. `scale` is a
//! conversion factor passed through to visitors; its meaning belongs to the
//! backend, not the descriptor.

use fxparam_core::{ParamKind, ParamValue, SymbolTable};

/// Accessor pair binding a descriptor to one field of the settings struct.
///
/// A functional lens: `read` projects the field out as a tagged value,
/// `write` assigns one back. Both are pure with respect to every other
/// field. The typed constructors on [`ParamDescriptor`] are the only way a
/// selector gets built, so the value a `write` receives always carries the
/// kind the closure expects; a mismatched tag is ignored rather than
/// panicking.
pub struct FieldSelector<S> {
    read: Box<dyn Fn(&S) -> ParamValue + Send + Sync>,
    write: Box<dyn Fn(&mut S, ParamValue) + Send + Sync>,
}

impl<S> FieldSelector<S> {
    pub fn new(
        read: impl Fn(&S) -> ParamValue + Send + Sync + 'static,
        write: impl Fn(&mut S, ParamValue) + Send + Sync + 'static,
    ) -> Self {
        Self {
            read: Box::new(read),
            write: Box::new(write),
        }
    }

    /// Read the bound field's current value.
    pub fn get(&self, settings: &S) -> ParamValue {
        (self.read)(settings)
    }

    /// Write a value into the bound field.
    pub fn set(&self, settings: &mut S, value: ParamValue) {
        (self.write)(settings, value)
    }
}

impl<S> std::fmt::Debug for FieldSelector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldSelector")
    }
}

/// Per-kind descriptor payload.
///
/// One variant per primitive kind. Scalar numeric kinds carry inclusive
/// bounds and a scale factor; `Bool` and `Text` have only a default (their
/// bounds are degenerate); `Enum` trades numeric bounds for a symbol table,
/// with the default given as an ordinal.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamSpec {
    Bool {
        default: bool,
    },
    Int {
        default: i32,
        min: i32,
        max: i32,
        scale: i32,
    },
    Size {
        default: usize,
        min: usize,
        max: usize,
        scale: usize,
    },
    Float {
        default: f32,
        min: f32,
        max: f32,
        scale: f32,
    },
    Double {
        default: f64,
        min: f64,
        max: f64,
        scale: f64,
    },
    Text {
        default: String,
    },
    Enum {
        default: usize,
        symbols: SymbolTable,
    },
}

impl ParamSpec {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamSpec::Bool { .. } => ParamKind::Bool,
            ParamSpec::Int { .. } => ParamKind::Int,
            ParamSpec::Size { .. } => ParamKind::Size,
            ParamSpec::Float { .. } => ParamKind::Float,
            ParamSpec::Double { .. } => ParamKind::Double,
            ParamSpec::Text { .. } => ParamKind::Text,
            ParamSpec::Enum { .. } => ParamKind::Enum,
        }
    }

    pub fn is_enumerated(&self) -> bool {
        matches!(self, ParamSpec::Enum { .. })
    }

    /// The declared default as a tagged value.
    ///
    /// An enumerated default is its ordinal, tagged `Size` (the in-memory
    /// representation; the internal name exists only in serialized form).
    pub fn default_value(&self) -> ParamValue {
        match self {
            ParamSpec::Bool { default } => ParamValue::Bool(*default),
            ParamSpec::Int { default, .. } => ParamValue::Int(*default),
            ParamSpec::Size { default, .. } => ParamValue::Size(*default),
            ParamSpec::Float { default, .. } => ParamValue::Float(*default),
            ParamSpec::Double { default, .. } => ParamValue::Double(*default),
            ParamSpec::Text { default } => ParamValue::Text(default.clone()),
            ParamSpec::Enum { default, .. } => ParamValue::Size(*default),
        }
    }
}

/// Immutable metadata for one declared parameter.
pub struct ParamDescriptor<S> {
    key: String,
    spec: ParamSpec,
    selector: FieldSelector<S>,
}

impl<S> ParamDescriptor<S> {
    /// Stable identifier used in the serialized map.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn spec(&self) -> &ParamSpec {
        &self.spec
    }

    pub fn selector(&self) -> &FieldSelector<S> {
        &self.selector
    }

    pub fn boolean(
        key: impl Into<String>,
        default: bool,
        read: impl Fn(&S) -> bool + Send + Sync + 'static,
        write: impl Fn(&mut S, bool) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            spec: ParamSpec::Bool { default },
            selector: FieldSelector::new(
                move |s| ParamValue::Bool(read(s)),
                move |s, v| {
                    if let Some(x) = v.as_bool() {
                        write(s, x);
                    }
                },
            ),
        }
    }

    pub fn int(
        key: impl Into<String>,
        default: i32,
        min: i32,
        max: i32,
        scale: i32,
        read: impl Fn(&S) -> i32 + Send + Sync + 'static,
        write: impl Fn(&mut S, i32) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            spec: ParamSpec::Int {
                default,
                min,
                max,
                scale,
            },
            selector: FieldSelector::new(
                move |s| ParamValue::Int(read(s)),
                move |s, v| {
                    if let Some(x) = v.as_int() {
                        write(s, x);
                    }
                },
            ),
        }
    }

    pub fn size(
        key: impl Into<String>,
        default: usize,
        min: usize,
        max: usize,
        scale: usize,
        read: impl Fn(&S) -> usize + Send + Sync + 'static,
        write: impl Fn(&mut S, usize) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            spec: ParamSpec::Size {
                default,
                min,
                max,
                scale,
            },
            selector: FieldSelector::new(
                move |s| ParamValue::Size(read(s)),
                move |s, v| {
                    if let Some(x) = v.as_size() {
                        write(s, x);
                    }
                },
            ),
        }
    }

    pub fn float(
        key: impl Into<String>,
        default: f32,
        min: f32,
        max: f32,
        scale: f32,
        read: impl Fn(&S) -> f32 + Send + Sync + 'static,
        write: impl Fn(&mut S, f32) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            spec: ParamSpec::Float {
                default,
                min,
                max,
                scale,
            },
            selector: FieldSelector::new(
                move |s| ParamValue::Float(read(s)),
                move |s, v| {
                    if let Some(x) = v.as_float() {
                        write(s, x);
                    }
                },
            ),
        }
    }

    pub fn double(
        key: impl Into<String>,
        default: f64,
        min: f64,
        max: f64,
        scale: f64,
        read: impl Fn(&S) -> f64 + Send + Sync + 'static,
        write: impl Fn(&mut S, f64) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            spec: ParamSpec::Double {
                default,
                min,
                max,
                scale,
            },
            selector: FieldSelector::new(
                move |s| ParamValue::Double(read(s)),
                move |s, v| {
                    if let Some(x) = v.as_double() {
                        write(s, x);
                    }
                },
            ),
        }
    }

    pub fn text(
        key: impl Into<String>,
        default: impl Into<String>,
        read: impl Fn(&S) -> String + Send + Sync + 'static,
        write: impl Fn(&mut S, String) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            spec: ParamSpec::Text {
                default: default.into(),
            },
            selector: FieldSelector::new(
                move |s| ParamValue::Text(read(s)),
                move |s, v| {
                    if let ParamValue::Text(x) = v {
                        write(s, x);
                    }
                },
            ),
        }
    }

    pub fn enumerated(
        key: impl Into<String>,
        default: usize,
        symbols: SymbolTable,
        read: impl Fn(&S) -> usize + Send + Sync + 'static,
        write: impl Fn(&mut S, usize) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            spec: ParamSpec::Enum { default, symbols },
            selector: FieldSelector::new(
                move |s| ParamValue::Size(read(s)),
                move |s, v| {
                    if let Some(x) = v.as_size() {
                        write(s, x);
                    }
                },
            ),
        }
    }
}

impl<S> std::fmt::Debug for ParamDescriptor<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamDescriptor")
            .field("key", &self.key)
            .field("spec", &self.spec)
            .finish()
    }
}
