//! Package-manager agent detection.
//!
//! When no explicit sync command is given, the project's lockfile decides
//! which package-manager agent runs the native sync. Detection never fails:
//! a project with no recognized lockfile falls back to npm.

use std::path::Path;

use strum::{Display, EnumString};

/// The package-manager agent driving the sync command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub(crate) enum Agent {
    /// npm (`package-lock.json`, and the fallback).
    #[default]
    Npm,
    /// pnpm (`pnpm-lock.yaml`).
    Pnpm,
    /// yarn (`yarn.lock`).
    Yarn,
    /// bun (`bun.lockb` or `bun.lock`).
    Bun,
}

/// Lockfiles probed in order; first hit wins.
const LOCKFILES: [(&str, Agent); 5] = [
    ("pnpm-lock.yaml", Agent::Pnpm),
    ("yarn.lock", Agent::Yarn),
    ("bun.lockb", Agent::Bun),
    ("bun.lock", Agent::Bun),
    ("package-lock.json", Agent::Npm),
];

impl Agent {
    /// Detects the agent from the lockfile present in `project_dir`.
    pub(crate) fn detect(project_dir: &Path) -> Self {
        LOCKFILES
            .into_iter()
            .find(|(lockfile, _)| project_dir.join(lockfile).exists())
            .map_or_else(Self::default, |(_, agent)| agent)
    }

    /// Returns the shell command that runs the native sync through this
    /// agent.
    pub(crate) const fn sync_command(self) -> &'static str {
        match self {
            Self::Npm => "npx cap sync",
            Self::Pnpm => "pnpm exec cap sync",
            Self::Yarn => "yarn cap sync",
            Self::Bun => "bunx cap sync",
        }
    }
}
