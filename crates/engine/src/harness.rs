//! Test harness: a demo effect covering all seven primitive kinds.
//!
//! `DemoEffect` stands in for a real host: a dynamics-style effect with one
//! field per kind, a pack declared in a fixed order (which the
//! partial-failure tests depend on), and an optional settings struct so
//! missing-settings degradation can be exercised.

use fxparam_core::SymbolTable;

use crate::descriptor::ParamDescriptor;
use crate::engine::{ParamEngine, ParamHost};
use crate::pack::ParamPack;

/// One field per primitive kind.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoSettings {
    pub bypass: bool,
    pub quality: i32,
    pub window: usize,
    pub gain: f32,
    pub ratio: f64,
    pub label: String,
    /// Ordinal into ["Peak", "RMS"].
    pub mode: usize,
}

impl DemoSettings {
    /// Exactly the defaults declared in [`demo_pack`].
    pub fn declared_defaults() -> Self {
        Self {
            bypass: false,
            quality: 32,
            window: 1024,
            gain: 0.0,
            ratio: 2.0,
            label: "preset".to_string(),
            mode: 0,
        }
    }

    /// In-range values, all different from the declared defaults.
    pub fn scrambled() -> Self {
        Self {
            bypass: true,
            quality: 8,
            window: 64,
            gain: -6.0,
            ratio: 4.0,
            label: "vocal bus".to_string(),
            mode: 1,
        }
    }
}

pub struct DemoEffect {
    pub settings: Option<DemoSettings>,
}

impl DemoEffect {
    pub fn with_settings(settings: DemoSettings) -> Self {
        Self {
            settings: Some(settings),
        }
    }

    /// A host that cannot supply a settings struct.
    pub fn without_settings() -> Self {
        Self { settings: None }
    }
}

impl ParamHost for DemoEffect {
    type Settings = DemoSettings;

    fn fetch_settings(&mut self) -> Option<&mut DemoSettings> {
        self.settings.as_mut()
    }
}

/// The demo pack, in the declared order the tests rely on:
/// Bypass, Quality, Window, Gain, Ratio, Label, Mode.
pub fn demo_pack() -> ParamPack<DemoSettings> {
    ParamPack::new()
        .with(ParamDescriptor::boolean(
            "Bypass",
            false,
            |s: &DemoSettings| s.bypass,
            |s, v| s.bypass = v,
        ))
        .with(ParamDescriptor::int(
            "Quality",
            32,
            8,
            96,
            1,
            |s: &DemoSettings| s.quality,
            |s, v| s.quality = v,
        ))
        .with(ParamDescriptor::size(
            "Window",
            1024,
            64,
            8192,
            1,
            |s: &DemoSettings| s.window,
            |s, v| s.window = v,
        ))
        .with(ParamDescriptor::float(
            "Gain",
            0.0,
            -60.0,
            36.0,
            1.0,
            |s: &DemoSettings| s.gain,
            |s, v| s.gain = v,
        ))
        .with(ParamDescriptor::double(
            "Ratio",
            2.0,
            1.0,
            20.0,
            1.0,
            |s: &DemoSettings| s.ratio,
            |s, v| s.ratio = v,
        ))
        .with(ParamDescriptor::text(
            "Label",
            "preset",
            |s: &DemoSettings| s.label.clone(),
            |s, v| s.label = v,
        ))
        .with(ParamDescriptor::enumerated(
            "Mode",
            0,
            SymbolTable::new(["Peak", "RMS"]),
            |s: &DemoSettings| s.mode,
            |s, v| s.mode = v,
        ))
}

/// An engine over [`demo_pack`] with no post-set hook.
pub fn demo_engine() -> ParamEngine<DemoEffect> {
    ParamEngine::new(demo_pack())
}
