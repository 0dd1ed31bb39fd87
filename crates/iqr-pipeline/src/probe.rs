use tracing::debug;

use iqr_core::error::{Error, Phase, Result};

/// Invoke an optional plugin extension if the plugin exposes it.
///
/// Absence is decided by introspection (`None`) before anything is called, so
/// a failure inside the extension can never be mistaken for the extension not
/// existing. Returns `Ok(None)` when the capability is absent (the phase is
/// skipped), `Ok(Some(result))` when it ran, and a phase error when the
/// invoked extension itself failed.
pub fn call_optional<C: ?Sized, R>(
    extension: Option<&mut C>,
    phase: Phase,
    call: impl FnOnce(&mut C) -> anyhow::Result<R>,
) -> Result<Option<R>> {
    match extension {
        None => {
            debug!(%phase, "capability not supported, skipping");
            Ok(None)
        }
        Some(extension) => {
            debug!(%phase, "capability supported, invoking");
            call(extension).map(Some).map_err(|e| Error::phase(phase, e))
        }
    }
}
