//! Orchestration of one full patch cycle.

use std::path::Path;

use tracing::info;

use crate::config_file::{ConfigFile, ConfigFormat};
use crate::error::PatchError;
use crate::sync::SyncRunner;
use crate::{code, guard, json};

/// Runs one patch cycle against the project in `project_dir`:
/// detect the configuration file, patch its `server` block to point at
/// `url`, write the patched content, run `command` through `runner`, and
/// restore the original content.
///
/// The cycle is strictly sequential and holds no lock on the file; callers
/// are responsible for not racing two cycles on the same project. Nothing
/// persists across cycles — each call re-reads the filesystem, so a cycle
/// after a failed restore picks up whatever is on disk now.
///
/// # Errors
///
/// Any [`PatchError`]; see that type for when each kind can occur and
/// which of them leave the file unrestored.
pub fn run_cycle(
    project_dir: &Path,
    url: &str,
    command: &str,
    runner: &impl SyncRunner,
) -> Result<(), PatchError> {
    let file = ConfigFile::detect(project_dir)?;

    info!(
        filename = file.filename(),
        format = file.format().as_str(),
        url,
        "editing app configuration"
    );
    let patched = match file.format() {
        ConfigFormat::Json => json::inject_server(file.original_content(), url, file.filename())?,
        ConfigFormat::Code => code::inject_server(file.original_content(), url, file.filename())?,
    };
    info!(filename = file.filename(), "app configuration patched");

    guard::with_patched(&file, &patched, || {
        info!(command, "running sync");
        runner
            .run(command)
            .map_err(|e| PatchError::sync_failed(command, e))?;
        info!(command, "sync finished");
        Ok(())
    })
}
