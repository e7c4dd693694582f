//! Error types for the patch engine.
//!
//! Every kind is terminal for the current patch cycle; nothing is retried
//! internally. The kinds split into three groups by when they can occur:
//! before any file is mutated (`ConfigNotFound`, `AmbiguousConfig`,
//! `InvalidExtension`, `MalformedJson`, `MalformedSource`,
//! `ConfigObjectNotFound`), during the guarded span (`WriteFailed`,
//! `SyncFailed` — both surface only after restoration has completed), and
//! the restoration itself (`RestoreFailed`, the one condition that leaves
//! the project modified on disk).

use std::io;

use thiserror::Error;

use capstan_syntax::SyntaxError;

use crate::sync::SyncError;

/// Errors from a patch cycle.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PatchError {
    /// None of the candidate configuration files exists.
    #[error(
        "no app configuration found; supported files are \
         \"capacitor.config.ts\", \"capacitor.config.js\", \"capacitor.config.json\""
    )]
    ConfigNotFound,

    /// More than one candidate configuration file exists.
    #[error("found multiple app config files: {}; remove all but one", .matches.join(", "))]
    AmbiguousConfig {
        /// The filenames that matched, in candidate order.
        matches: Vec<String>,
    },

    /// A selected file carries an extension outside the candidate set.
    ///
    /// Unreachable through [`crate::ConfigFile::detect`], which only scans
    /// the fixed candidate list; kept as an explicit invariant check.
    #[error("invalid config file extension on \"{filename}\"")]
    InvalidExtension {
        /// The offending filename.
        filename: String,
    },

    /// The JSON configuration could not be parsed as an object document.
    #[error("malformed JSON in \"{filename}\": {message}")]
    MalformedJson {
        /// The file that failed to parse.
        filename: String,
        /// Description of the parse failure.
        message: String,
    },

    /// The source configuration module could not be parsed.
    #[error("malformed source in \"{filename}\": {source}")]
    MalformedSource {
        /// The file that failed to parse.
        filename: String,
        /// Underlying syntax error.
        #[source]
        source: SyntaxError,
    },

    /// The source module parses but declares no `config` object literal.
    #[error(
        "\"{filename}\" declares no `config` object literal; expected \
         `const config = {{ ... }}` or `export const config = {{ ... }}`"
    )]
    ConfigObjectNotFound {
        /// The file that was scanned.
        filename: String,
    },

    /// Writing the patched content to disk failed.
    #[error("failed to write patched configuration to \"{filename}\": {source}")]
    WriteFailed {
        /// The file being written.
        filename: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The synchronization command failed.
    #[error("sync command `{command}` failed: {source}")]
    SyncFailed {
        /// The shell command that was executed.
        command: String,
        /// Underlying execution failure.
        #[source]
        source: SyncError,
    },

    /// Restoring the original configuration failed.
    ///
    /// The configuration file is left in its patched state on disk and must
    /// be restored by hand.
    #[error(
        "failed to restore \"{filename}\" to its original content: {source}; \
         the file is left patched on disk and must be restored manually"
    )]
    RestoreFailed {
        /// The file that could not be restored.
        filename: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl PatchError {
    /// Creates an ambiguous-config error.
    #[must_use]
    pub fn ambiguous_config(matches: Vec<String>) -> Self {
        Self::AmbiguousConfig { matches }
    }

    /// Creates an invalid-extension error.
    #[must_use]
    pub fn invalid_extension(filename: impl Into<String>) -> Self {
        Self::InvalidExtension {
            filename: filename.into(),
        }
    }

    /// Creates a malformed-JSON error.
    #[must_use]
    pub fn malformed_json(filename: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedJson {
            filename: filename.into(),
            message: message.into(),
        }
    }

    /// Creates a malformed-source error.
    #[must_use]
    pub fn malformed_source(filename: impl Into<String>, source: SyntaxError) -> Self {
        Self::MalformedSource {
            filename: filename.into(),
            source,
        }
    }

    /// Creates a missing-config-object error.
    #[must_use]
    pub fn config_object_not_found(filename: impl Into<String>) -> Self {
        Self::ConfigObjectNotFound {
            filename: filename.into(),
        }
    }

    /// Creates a patched-write error.
    #[must_use]
    pub fn write_failed(filename: impl Into<String>, source: io::Error) -> Self {
        Self::WriteFailed {
            filename: filename.into(),
            source,
        }
    }

    /// Creates a sync-failure error.
    #[must_use]
    pub fn sync_failed(command: impl Into<String>, source: SyncError) -> Self {
        Self::SyncFailed {
            command: command.into(),
            source,
        }
    }

    /// Creates a restore-failure error.
    #[must_use]
    pub fn restore_failed(filename: impl Into<String>, source: io::Error) -> Self {
        Self::RestoreFailed {
            filename: filename.into(),
            source,
        }
    }

    /// Returns whether this error leaves the configuration file modified on
    /// disk, requiring manual intervention.
    #[must_use]
    pub const fn requires_manual_intervention(&self) -> bool {
        matches!(self, Self::RestoreFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_names_all_candidates() {
        let message = PatchError::ConfigNotFound.to_string();

        assert!(message.contains("capacitor.config.ts"));
        assert!(message.contains("capacitor.config.js"));
        assert!(message.contains("capacitor.config.json"));
    }

    #[test]
    fn ambiguous_config_lists_matches() {
        let error = PatchError::ambiguous_config(vec![
            "capacitor.config.ts".to_owned(),
            "capacitor.config.json".to_owned(),
        ]);

        let message = error.to_string();
        assert!(message.contains("capacitor.config.ts, capacitor.config.json"));
        assert!(message.contains("remove all but one"));
    }

    #[test]
    fn only_restore_failure_requires_manual_intervention() {
        let restore = PatchError::restore_failed(
            "capacitor.config.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let sync = PatchError::sync_failed("npx cap sync", SyncError::Exit { code: 1 });

        assert!(restore.requires_manual_intervention());
        assert!(!sync.requires_manual_intervention());
        assert!(restore.to_string().contains("restored manually"));
    }
}
