//! Tree-sitter parsing wrapper for configuration modules.
//!
//! Configuration modules are parsed with the TypeScript grammar, which is a
//! superset of the JavaScript dialect these files use, so a single parser
//! covers both `.ts` and `.js` sources.

use crate::error::SyntaxError;

/// Result of parsing a configuration module.
///
/// Owns the syntax tree together with the source it was produced from.
/// Tree-sitter is error-tolerant, so a parse result may contain a tree with
/// embedded ERROR or MISSING nodes; callers are expected to check
/// [`ParseResult::has_errors`] before trusting the tree.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns whether the parse produced any ERROR or MISSING nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        has_error_nodes(self.tree.root_node())
    }

    /// Describes the first syntax error in the tree, for diagnostics.
    ///
    /// Returns `None` when the parse was clean.
    #[must_use]
    pub fn first_error(&self) -> Option<String> {
        find_error_node(self.tree.root_node()).map(|node| describe_error(node, &self.source))
    }
}

/// Tree-sitter parser for configuration modules.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a new parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser cannot be initialised with
    /// the TypeScript grammar.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        inner
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;

        Ok(Self { inner })
    }

    /// Parses a configuration module.
    ///
    /// The returned result may still contain syntax errors; see
    /// [`ParseResult::has_errors`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a tree at all, which
    /// typically indicates a parser configuration issue.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("parsing produced no tree"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }
}

/// Returns the source text covered by a node.
pub(crate) fn node_text<'a>(node: tree_sitter::Node<'_>, source: &'a str) -> &'a str {
    source.get(node.byte_range()).unwrap_or_default()
}

/// Recursively checks whether a node or any descendant is an ERROR node.
fn has_error_nodes(node: tree_sitter::Node<'_>) -> bool {
    if node.is_error() || node.is_missing() {
        return true;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if has_error_nodes(child) {
            return true;
        }
    }

    false
}

/// Returns the first ERROR or MISSING node in pre-order, if any.
fn find_error_node(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_error_node(child) {
            return Some(found);
        }
    }

    None
}

/// Formats a one-line description of an error node with position context.
fn describe_error(node: tree_sitter::Node<'_>, source: &str) -> String {
    let start = node.start_position();
    let line = start.row.saturating_add(1);
    let column = start.column.saturating_add(1);

    let context = source
        .get(node.byte_range())
        .map(|text| {
            if text.len() > 50 {
                let truncated: String = text.chars().take(47).collect();
                format!("{truncated}...")
            } else {
                text.to_owned()
            }
        })
        .unwrap_or_default();

    if node.is_missing() {
        format!("line {line}, column {column}: missing {}", node.kind())
    } else {
        format!("line {line}, column {column}: syntax error near `{context}`")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("const config = { appId: 'a' };")]
    #[case("export const config = { appId: 'a' };")]
    #[case("const config: AppConfig = { appId: 'a' };\nexport default config;")]
    #[case("// a comment\nimport x from 'y';\nconst config = {};")]
    fn parses_valid_modules(#[case] source: &str) {
        let mut parser = Parser::new().expect("parser init");
        let result = parser.parse(source).expect("parse");

        assert!(!result.has_errors());
        assert!(result.first_error().is_none());
    }

    #[rstest]
    #[case("const config = {")]
    #[case("export const = }{")]
    fn detects_syntax_errors(#[case] source: &str) {
        let mut parser = Parser::new().expect("parser init");
        let result = parser.parse(source).expect("parse");

        assert!(result.has_errors());
        assert!(result.first_error().is_some());
    }

    #[test]
    fn error_description_includes_position() {
        let mut parser = Parser::new().expect("parser init");
        let result = parser.parse("const config = {\n").expect("parse");

        let message = result.first_error().expect("error info");
        assert!(message.starts_with("line "), "message was: {message}");
    }
}
