//! Source-module variant of the configuration patcher.
//!
//! The structural work lives in `capstan-syntax`; this adapter maps its
//! errors onto the engine's kinds, keeping "the module does not parse"
//! distinct from "the module parses but declares no config object".

use capstan_syntax::SyntaxError;

use crate::error::PatchError;

/// Rewrites a TypeScript/JavaScript configuration module so its `config`
/// object carries a `server` block pointing at the development server.
///
/// # Errors
///
/// - [`PatchError::ConfigObjectNotFound`] when no `config` binding with an
///   object-literal initialiser exists;
/// - [`PatchError::MalformedSource`] for any other syntax failure.
pub(crate) fn inject_server(content: &str, url: &str, filename: &str) -> Result<String, PatchError> {
    capstan_syntax::inject_server_block(content, url).map_err(|error| match error {
        SyntaxError::MissingConfigObject => PatchError::config_object_not_found(filename),
        other => PatchError::malformed_source(filename, other),
    })
}
