//! Detection and capture of the project's app configuration file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PatchError;

/// The filenames the detector scans, in scan order.
pub const CANDIDATE_FILENAMES: [&str; 3] = [
    "capacitor.config.ts",
    "capacitor.config.js",
    "capacitor.config.json",
];

/// How a configuration file is parsed and patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// A JSON document.
    Json,
    /// A TypeScript or JavaScript module exporting an object literal.
    Code,
}

impl ConfigFormat {
    /// Infers the format from a file extension.
    ///
    /// Returns `None` for extensions outside the candidate set.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "json" => Some(Self::Json),
            "ts" | "js" => Some(Self::Code),
            _ => None,
        }
    }

    /// Returns the lower-case identifier for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Code => "code",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single configuration file selected for one patch cycle.
///
/// `original_content` is captured at detection time, before anything touches
/// the filesystem, and is the sole source of truth for restoration. Nothing
/// is cached across cycles: a new cycle re-runs detection and re-reads the
/// file, so repeated cycles are independent and self-healing even when a
/// prior cycle failed to restore.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    filename: &'static str,
    path: PathBuf,
    original_content: String,
    format: ConfigFormat,
}

impl ConfigFile {
    /// Scans `project_dir` for the candidate filenames and captures the one
    /// that exists.
    ///
    /// A read failure for a candidate, missing file or otherwise, is
    /// treated as absence: detection only reports files it could capture.
    ///
    /// # Errors
    ///
    /// - [`PatchError::ConfigNotFound`] when no candidate exists;
    /// - [`PatchError::AmbiguousConfig`] when more than one exists;
    /// - [`PatchError::InvalidExtension`] when the selected file's extension
    ///   maps to no format (unreachable from the fixed candidate list).
    pub fn detect(project_dir: &Path) -> Result<Self, PatchError> {
        let mut found: Vec<(&'static str, String)> = Vec::new();
        for filename in CANDIDATE_FILENAMES {
            if let Ok(content) = fs::read_to_string(project_dir.join(filename)) {
                found.push((filename, content));
            }
        }

        if found.len() > 1 {
            let matches = found
                .iter()
                .map(|(filename, _)| (*filename).to_owned())
                .collect();
            return Err(PatchError::ambiguous_config(matches));
        }
        let Some((filename, original_content)) = found.pop() else {
            return Err(PatchError::ConfigNotFound);
        };

        let extension = filename.rsplit('.').next().unwrap_or_default();
        let format = ConfigFormat::from_extension(extension)
            .ok_or_else(|| PatchError::invalid_extension(filename))?;

        Ok(Self {
            filename,
            path: project_dir.join(filename),
            original_content,
            format,
        })
    }

    /// Returns the selected filename.
    #[must_use]
    pub const fn filename(&self) -> &'static str {
        self.filename
    }

    /// Returns the full path of the selected file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the content captured before any mutation.
    #[must_use]
    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    /// Returns the inferred format.
    #[must_use]
    pub const fn format(&self) -> ConfigFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    fn project_with(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        for (name, content) in files {
            fs::write(dir.path().join(name), content).expect("write fixture");
        }
        dir
    }

    #[rstest]
    #[case("capacitor.config.json", ConfigFormat::Json)]
    #[case("capacitor.config.ts", ConfigFormat::Code)]
    #[case("capacitor.config.js", ConfigFormat::Code)]
    fn detects_single_candidate(#[case] filename: &str, #[case] format: ConfigFormat) {
        let dir = project_with(&[(filename, "content")]);

        let file = ConfigFile::detect(dir.path()).expect("detect");
        assert_eq!(file.filename(), filename);
        assert_eq!(file.format(), format);
        assert_eq!(file.original_content(), "content");
        assert_eq!(file.path(), dir.path().join(filename));
    }

    #[test]
    fn empty_project_is_config_not_found() {
        let dir = project_with(&[]);

        let result = ConfigFile::detect(dir.path());
        assert!(matches!(result, Err(PatchError::ConfigNotFound)));
    }

    #[test]
    fn unrelated_files_are_ignored() {
        let dir = project_with(&[("package.json", "{}"), ("vite.config.ts", "")]);

        let result = ConfigFile::detect(dir.path());
        assert!(matches!(result, Err(PatchError::ConfigNotFound)));
    }

    #[test]
    fn two_candidates_are_ambiguous() {
        let dir = project_with(&[
            ("capacitor.config.ts", "a"),
            ("capacitor.config.json", "b"),
        ]);

        match ConfigFile::detect(dir.path()) {
            Err(PatchError::AmbiguousConfig { matches }) => {
                assert_eq!(
                    matches,
                    vec![
                        "capacitor.config.ts".to_owned(),
                        "capacitor.config.json".to_owned()
                    ]
                );
            }
            other => panic!("expected AmbiguousConfig, got {other:?}"),
        }
    }
}
