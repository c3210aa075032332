//! The four operations, bound to a host.
//!
//! [`ParamEngine`] owns a declared pack and an optional post-set hook, and
//! replays the pack over whatever settings struct the host supplies at call
//! time. The engine never caches the struct: every operation starts with a
//! fresh fetch, and a host that cannot supply one degrades reset, visit,
//! and get to logged no-ops and set to an error.
//!
//! All calls are synchronous and single-threaded; the engine holds no
//! mutable state of its own, so one engine value may serve any number of
//! hosts of the same type.

use crate::error::SetError;
use crate::pack::ParamPack;
use crate::store::{ParamSink, ParamSource};
use crate::visitor::SettingsVisitor;

/// Contract the owning host type implements.
pub trait ParamHost {
    /// The plain aggregate holding one field per declared parameter.
    type Settings;

    /// Fetch the live settings struct, materializing it if the host builds
    /// lazily. `None` means the host cannot supply one (e.g. not yet
    /// initialized); the engine degrades per operation.
    fn fetch_settings(&mut self) -> Option<&mut Self::Settings>;
}

/// Hook run once after the per-field work of reset and set.
///
/// `updating` is `false` for reset (return value ignored) and `true` for
/// set (a `false` return fails the whole call). The hook receives the
/// mutated settings struct; hosts keep any derived state they need to
/// recompute inside it.
pub type PostSetFn<S> = Box<dyn Fn(&mut S, bool) -> bool + Send + Sync>;

/// Replays a descriptor pack over a host's settings.
pub struct ParamEngine<H: ParamHost> {
    pack: ParamPack<H::Settings>,
    post_set: Option<PostSetFn<H::Settings>>,
}

impl<H: ParamHost> ParamEngine<H> {
    pub fn new(pack: ParamPack<H::Settings>) -> Self {
        Self {
            pack,
            post_set: None,
        }
    }

    /// Like [`new`](Self::new), with a hook called at the end of reset and
    /// set.
    pub fn with_post_set(
        pack: ParamPack<H::Settings>,
        hook: impl Fn(&mut H::Settings, bool) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            pack,
            post_set: Some(Box::new(hook)),
        }
    }

    pub fn pack(&self) -> &ParamPack<H::Settings> {
        &self.pack
    }

    /// Write every parameter's default, then run the hook (result ignored).
    ///
    /// Total: a host without settings is a no-op, logged at `warn`.
    pub fn reset(&self, host: &mut H) {
        let Some(settings) = host.fetch_settings() else {
            log::warn!("reset: host has no settings structure; skipping");
            return;
        };
        self.pack.reset_fields(settings);
        if let Some(hook) = &self.post_set {
            let _ = hook(settings, false);
        }
    }

    /// Dispatch every parameter to the visitor, in declared order.
    ///
    /// The hook never runs here. A host without settings is a no-op, logged.
    pub fn visit(&self, host: &mut H, visitor: &mut dyn SettingsVisitor) {
        let Some(settings) = host.fetch_settings() else {
            log::warn!("visit: host has no settings structure; skipping");
            return;
        };
        self.pack.visit_fields(settings, visitor);
    }

    /// Serialize every parameter's current value to the sink.
    ///
    /// Never fails, never clamps. A host without settings is a no-op,
    /// logged.
    pub fn get(&self, host: &mut H, sink: &mut dyn ParamSink) {
        let Some(settings) = host.fetch_settings() else {
            log::warn!("get: host has no settings structure; skipping");
            return;
        };
        self.pack.capture_fields(settings, sink);
    }

    /// Validate and assign every parameter from the source, then run the
    /// hook (result authoritative).
    ///
    /// Not atomic: on a validation failure, fields before the failing key
    /// keep their newly assigned values while the rest are untouched.
    /// Callers should re-[`reset`](Self::reset) or discard the settings
    /// after a failure rather than assume them coherent.
    pub fn set(&self, host: &mut H, source: &dyn ParamSource) -> Result<(), SetError> {
        let Some(settings) = host.fetch_settings() else {
            return Err(SetError::MissingSettings);
        };
        self.pack.apply_fields(settings, source)?;
        if let Some(hook) = &self.post_set {
            if !hook(settings, true) {
                return Err(SetError::HookRejected);
            }
        }
        Ok(())
    }
}
