//! The restore guard: patched content goes in, original content comes back.
//!
//! The guarded span is {write patched → run the wrapped step → write
//! original}. The restoring write runs on every exit path, including when
//! the patched write itself failed partway through. A failure of the
//! restoring write outranks whatever happened inside the span: it is the
//! one outcome that leaves user-authored configuration modified on disk.

use std::fs;

use tracing::{error, info};

use crate::config_file::ConfigFile;
use crate::error::PatchError;

/// Writes `patched` over the configuration file, runs `step`, then
/// unconditionally rewrites the original content.
///
/// # Errors
///
/// - [`PatchError::RestoreFailed`] when the restoring write fails,
///   regardless of how the span went; a failure inside the span is logged
///   before being displaced;
/// - otherwise, whatever the span produced — a [`PatchError::WriteFailed`]
///   from the patched write, or the error returned by `step` — surfaces
///   after restoration has completed.
pub(crate) fn with_patched<F>(file: &ConfigFile, patched: &str, step: F) -> Result<(), PatchError>
where
    F: FnOnce() -> Result<(), PatchError>,
{
    let outcome = fs::write(file.path(), patched)
        .map_err(|e| PatchError::write_failed(file.filename(), e))
        .and_then(|()| step());

    info!(filename = file.filename(), "restoring original configuration");
    if let Err(restore_error) = fs::write(file.path(), file.original_content()) {
        if let Err(span_error) = &outcome {
            error!(error = %span_error, "failure preceding a failed restore");
        }
        return Err(PatchError::restore_failed(file.filename(), restore_error));
    }
    info!(filename = file.filename(), "original configuration restored");

    outcome
}
