//! Command-line interface for the capstan dev-server tether.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Log output format for the telemetry subscriber.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub(crate) enum LogFormat {
    /// Human-readable single-line output.
    #[default]
    Compact,
    /// Structured JSON suitable for ingestion by logging stacks.
    Json,
}

/// Points a packaged app's configuration at a local dev server, runs the
/// native sync command, then restores the configuration file.
#[derive(Parser, Debug)]
#[command(name = "capstan", version)]
pub(crate) struct Cli {
    /// Project directory containing the app configuration.
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub(crate) project: PathBuf,

    /// Full dev-server URL (`scheme://host:port`); overrides
    /// --host/--port/--https.
    #[arg(long, value_name = "URL")]
    pub(crate) url: Option<String>,

    /// Dev-server host, used when --url is not given.
    #[arg(long, value_name = "HOST", default_value = "127.0.0.1")]
    pub(crate) host: String,

    /// Dev-server port, used when --url is not given.
    #[arg(long, value_name = "PORT", default_value_t = 5173)]
    pub(crate) port: u16,

    /// Assemble an https:// URL instead of http://.
    #[arg(long)]
    pub(crate) https: bool,

    /// Shell command for the sync step; detected from the project's
    /// package-manager lockfile when omitted.
    #[arg(long, value_name = "CMD")]
    pub(crate) sync_command: Option<String>,

    /// Suppress progress logging (errors are still reported).
    #[arg(long, short)]
    pub(crate) quiet: bool,

    /// Log output format.
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}

impl Cli {
    /// Resolves the connection URL the server block will point at.
    ///
    /// An explicit `--url` wins; otherwise the URL is assembled from
    /// `--host`, `--port` and `--https`. Either way the engine treats the
    /// result as opaque.
    pub(crate) fn connection_url(&self) -> String {
        if let Some(url) = &self.url {
            return url.clone();
        }
        let scheme = if self.https { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}
