//! Structural rewriting of TypeScript/JavaScript app-configuration modules.
//!
//! This crate implements the source-level half of the capstan patch engine:
//! given a configuration module that binds a top-level `config` object
//! literal (either `const config = { ... }` with a separate default export,
//! or `export const config = { ... }`), it injects a `server` block pointing
//! at a development server.
//!
//! Naive text substitution cannot do this safely — `server` or `url` may
//! occur anywhere in the file — so the module is parsed with Tree-sitter,
//! the config object is located structurally, and the mutation is applied as
//! byte-range edits. Everything outside the touched ranges survives
//! byte-for-byte.
//!
//! # Example
//!
//! ```
//! use capstan_syntax::inject_server_block;
//!
//! let source = "const config = { appId: 'a' };\nexport default config;";
//! let patched = inject_server_block(source, "http://10.0.0.5:5173")?;
//!
//! assert!(patched.contains("url: \"http://10.0.0.5:5173\""));
//! assert!(patched.contains("cleartext: true"));
//! assert!(patched.ends_with("export default config;"));
//! # Ok::<(), capstan_syntax::SyntaxError>(())
//! ```

mod error;
mod injector;
mod locator;
mod parser;
mod properties;

pub use error::SyntaxError;
pub use injector::inject_server_block;
pub use parser::{ParseResult, Parser};
