//! The capstan patch engine.
//!
//! Temporarily points a project's app configuration (`capacitor.config.ts`,
//! `.js`, or `.json`) at a locally running development server, runs the
//! project's native synchronization command, then restores the file to its
//! exact original bytes — no matter how the sync went.
//!
//! One [`run_cycle`] call performs one full cycle:
//!
//! 1. **detect** — select exactly one of the three candidate files and
//!    capture its content ([`ConfigFile::detect`]);
//! 2. **patch** — structurally inject `server.url` / `server.cleartext`
//!    into the document (JSON) or into the exported `config` object literal
//!    (TypeScript/JavaScript, via `capstan-syntax`);
//! 3. **sync** — hand the caller-supplied shell command to a
//!    [`SyncRunner`] and block on its exit;
//! 4. **restore** — rewrite the captured original content on every exit
//!    path. A restore failure is the one error that leaves the project
//!    modified on disk and is reported as its own kind,
//!    [`PatchError::RestoreFailed`].
//!
//! The engine holds no locks and caches nothing across cycles.

mod code;
mod config_file;
mod cycle;
mod error;
mod guard;
mod json;
mod sync;

pub use config_file::{CANDIDATE_FILENAMES, ConfigFile, ConfigFormat};
pub use cycle::run_cycle;
pub use error::PatchError;
pub use sync::{ShellSyncRunner, SyncError, SyncRunner};
