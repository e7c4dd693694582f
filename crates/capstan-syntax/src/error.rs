//! Error types for source-level configuration rewriting.

use thiserror::Error;

/// Errors from parsing or rewriting a configuration module.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SyntaxError {
    /// Failed to initialise the Tree-sitter parser.
    #[error("failed to initialise TypeScript parser: {message}")]
    ParserInit {
        /// Description of the failure.
        message: String,
    },

    /// The source module could not be parsed.
    #[error("malformed source module: {message}")]
    Parse {
        /// Description of the first syntax error encountered.
        message: String,
    },

    /// No top-level `config` binding with an object-literal initialiser
    /// exists in the module.
    #[error(
        "no `config` object found; expected `const config = {{ ... }}` or \
         `export const config = {{ ... }}`"
    )]
    MissingConfigObject,

    /// Internal error indicating a bug in the edit computation.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the internal error.
        message: String,
    },
}

impl SyntaxError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(message: impl Into<String>) -> Self {
        Self::ParserInit {
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}
