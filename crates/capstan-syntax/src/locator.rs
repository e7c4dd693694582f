//! Locates the exported configuration object within a parsed module.
//!
//! Two authoring styles bind the configuration object:
//!
//! ```ts
//! const config = { ... };
//! export default config;
//! ```
//!
//! ```ts
//! export const config = { ... };
//! ```
//!
//! Both reduce to the same shape: a top-level variable declaration whose
//! declarator binds the exact name `config` to an object literal. The default
//! export statement, when present, is never touched.

use crate::error::SyntaxError;
use crate::parser::{ParseResult, node_text};

/// The binding name the locator searches for.
const CONFIG_BINDING: &str = "config";

/// Finds the object literal bound to the top-level `config` declaration.
///
/// A type annotation on the binding (`const config: AppConfig = ...`) is
/// tolerated. Declarations nested inside functions or blocks are not
/// considered.
///
/// # Errors
///
/// Returns [`SyntaxError::MissingConfigObject`] when no top-level declarator
/// binds `config` to an object literal.
pub(crate) fn locate_config_object<'tree>(
    parsed: &'tree ParseResult,
) -> Result<tree_sitter::Node<'tree>, SyntaxError> {
    let root = parsed.root_node();
    let source = parsed.source();

    let mut statements = root.walk();
    for statement in root.named_children(&mut statements) {
        let Some(declaration) = declaration_of(statement) else {
            continue;
        };

        let mut declarators = declaration.walk();
        for declarator in declaration.named_children(&mut declarators) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            if node_text(name, source) != CONFIG_BINDING {
                continue;
            }
            if let Some(value) = declarator.child_by_field_name("value") {
                if value.kind() == "object" {
                    return Ok(value);
                }
            }
        }
    }

    Err(SyntaxError::MissingConfigObject)
}

/// Returns the variable declaration carried by a top-level statement.
///
/// Unwraps `export const ...` to the underlying declaration; plain
/// `const`/`let`/`var` declarations are returned as-is.
fn declaration_of(statement: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    match statement.kind() {
        "lexical_declaration" | "variable_declaration" => Some(statement),
        "export_statement" => statement
            .child_by_field_name("declaration")
            .filter(|d| matches!(d.kind(), "lexical_declaration" | "variable_declaration")),
        _ => None,
    }
}
