//! Structural injection of the dev-server block into a configuration module.
//!
//! The mutation is expressed as byte-range edits against the original source
//! and spliced in one pass, so everything outside the touched ranges —
//! imports, comments, other declarations, the default export — survives
//! byte-for-byte. Only the rewritten `server` object itself is reformatted.

use std::ops::Range;

use crate::error::SyntaxError;
use crate::locator::locate_config_object;
use crate::parser::{ParseResult, Parser, node_text};
use crate::properties::{append_property, entries, entry_key, removal_range};

/// Property key for the dev-server block inside the config object.
const SERVER_KEY: &str = "server";
/// Keys owned by the injector inside the server block.
const OWNED_KEYS: [&str; 2] = ["url", "cleartext"];

/// A single text edit: replace `range` of the original source with
/// `replacement`. An insertion is an edit with an empty range.
struct Edit {
    range: Range<usize>,
    replacement: String,
}

/// Rewrites a configuration module so its `config` object carries a `server`
/// block pointing at `url` with cleartext traffic allowed.
///
/// The normalisation rules, applied in order:
///
/// 1. a `server` entry whose value is not an object literal is removed;
/// 2. a missing (or just-removed) `server` entry is appended as the last
///    property of the config object;
/// 3. inside the server object, any `url` or `cleartext` entries are removed,
///    every other entry is preserved in order, and fresh `url`/`cleartext`
///    entries are appended at the tail.
///
/// Applying the rewrite twice yields the same `server` shape as applying it
/// once.
///
/// # Errors
///
/// - [`SyntaxError::Parse`] when the module does not parse cleanly;
/// - [`SyntaxError::MissingConfigObject`] when no top-level `config` binding
///   with an object-literal initialiser exists;
/// - [`SyntaxError::Internal`] when a computed edit is malformed (a bug).
pub fn inject_server_block(source: &str, url: &str) -> Result<String, SyntaxError> {
    let mut parser = Parser::new()?;
    let parsed = parser.parse(source)?;
    if parsed.has_errors() {
        let detail = parsed
            .first_error()
            .unwrap_or_else(|| "unknown syntax error".to_owned());
        return Err(SyntaxError::parse(detail));
    }

    let config_object = locate_config_object(&parsed)?;
    let edits = plan_edits(config_object, &parsed, url);
    apply_edits(parsed.source(), edits)
}

/// Computes the edits implementing the normalisation rules.
fn plan_edits(
    config_object: tree_sitter::Node<'_>,
    parsed: &ParseResult,
    url: &str,
) -> Vec<Edit> {
    let source = parsed.source();
    let server_entry = entries(config_object)
        .into_iter()
        .find(|entry| entry_key(*entry, source).as_deref() == Some(SERVER_KEY));

    let object_value = server_entry.and_then(|entry| {
        if entry.kind() != "pair" {
            return None;
        }
        entry
            .child_by_field_name("value")
            .filter(|value| value.kind() == "object")
    });

    if let Some(server_object) = object_value {
        // Existing server object: rebuild it in place, keeping every entry
        // that is not `url`/`cleartext`.
        return vec![Edit {
            range: server_object.byte_range(),
            replacement: rebuild_server_object(server_object, source, url),
        }];
    }

    let property = format!("{SERVER_KEY}: {}", fresh_server_object(url));
    match server_entry {
        // A `server` entry with a non-object value is dropped, then the
        // fresh block is appended at the tail of the property list.
        Some(entry) => {
            let removed = removal_range(entry);
            let appendix = append_property(config_object, &property, Some(&removed));
            vec![
                Edit {
                    range: removed,
                    replacement: String::new(),
                },
                Edit {
                    range: appendix.position..appendix.position,
                    replacement: appendix.text,
                },
            ]
        }
        None => {
            let appendix = append_property(config_object, &property, None);
            vec![Edit {
                range: appendix.position..appendix.position,
                replacement: appendix.text,
            }]
        }
    }
}

/// Regenerates a server object literal with `url`/`cleartext` at the tail.
fn rebuild_server_object(server_object: tree_sitter::Node<'_>, source: &str, url: &str) -> String {
    let mut parts: Vec<String> = entries(server_object)
        .into_iter()
        .filter(|entry| {
            !entry_key(*entry, source)
                .is_some_and(|key| OWNED_KEYS.contains(&key.as_str()))
        })
        .map(|entry| node_text(entry, source).to_owned())
        .collect();

    parts.push(format!("url: {}", string_literal(url)));
    parts.push("cleartext: true".to_owned());
    format!("{{ {} }}", parts.join(", "))
}

/// Builds the object literal for a freshly-created server block.
fn fresh_server_object(url: &str) -> String {
    format!("{{ url: {}, cleartext: true }}", string_literal(url))
}

/// Quotes a string as a double-quoted source literal.
fn string_literal(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

/// Splices edits into the source in one ascending pass.
///
/// Edits must be non-overlapping; insertions sharing a start offset with a
/// deletion are spliced first so the inserted text lands before the deleted
/// span.
fn apply_edits(source: &str, mut edits: Vec<Edit>) -> Result<String, SyntaxError> {
    edits.sort_by_key(|edit| (edit.range.start, edit.range.end));

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for edit in &edits {
        if edit.range.start < cursor || edit.range.end > source.len() {
            return Err(SyntaxError::internal("overlapping or out-of-bounds edit"));
        }
        if !source.is_char_boundary(edit.range.start) || !source.is_char_boundary(edit.range.end) {
            return Err(SyntaxError::internal(
                "edit range is not on a UTF-8 boundary",
            ));
        }
        let unchanged = source
            .get(cursor..edit.range.start)
            .ok_or_else(|| SyntaxError::internal("edit range slicing failed"))?;
        output.push_str(unchanged);
        output.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    let tail = source
        .get(cursor..)
        .ok_or_else(|| SyntaxError::internal("edit range slicing failed"))?;
    output.push_str(tail);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const URL: &str = "http://10.0.0.5:5173";

    fn inject(source: &str) -> String {
        inject_server_block(source, URL).expect("inject")
    }

    #[test]
    fn appends_server_to_config_without_one() {
        let output = inject("const config = { appId: 'a' };\nexport default config;");

        assert_eq!(
            output,
            "const config = { appId: 'a', server: { url: \"http://10.0.0.5:5173\", \
             cleartext: true } };\nexport default config;"
        );
    }

    #[test]
    fn rewrites_directly_exported_config() {
        let output = inject("export const config = { appId: 'a' };");

        assert!(output.starts_with("export const config = { appId: 'a', server: {"));
        assert!(output.contains("cleartext: true"));
    }

    #[test]
    fn preserves_unrelated_server_fields() {
        let output = inject(
            "const config = { appId: 'a', server: { androidScheme: 'https' } };\n\
             export default config;",
        );

        assert!(output.contains("androidScheme: 'https'"));
        assert!(output.contains("url: \"http://10.0.0.5:5173\""));
        assert!(output.contains("cleartext: true"));
        assert!(output.ends_with("export default config;"));
    }

    #[test]
    fn replaces_existing_url_and_cleartext() {
        let output = inject(
            "const config = { server: { url: 'http://old:1', cleartext: false, keepMe: 1 } };",
        );

        assert!(!output.contains("http://old:1"));
        assert!(!output.contains("cleartext: false"));
        assert_eq!(
            output,
            "const config = { server: { keepMe: 1, url: \"http://10.0.0.5:5173\", \
             cleartext: true } };"
        );
    }

    #[rstest]
    #[case("const config = { appId: 'a', server: 42 };")]
    #[case("const config = { server: 'no', appId: 'a' };")]
    #[case("const config = { appId: 'a', server: null };")]
    #[case("const config = { appId: 'a', server };")]
    fn replaces_non_object_server_values(#[case] source: &str) {
        let output = inject(source);

        assert!(output.contains("appId: 'a'"), "output was: {output}");
        assert!(
            output.contains("server: { url: \"http://10.0.0.5:5173\", cleartext: true }"),
            "output was: {output}"
        );
        assert_eq!(output.matches("server").count(), 1, "output was: {output}");
    }

    #[test]
    fn replaces_non_object_server_that_is_the_only_entry() {
        let output = inject("const config = { server: 42 };");

        assert!(
            output.contains("server: { url: \"http://10.0.0.5:5173\", cleartext: true }"),
            "output was: {output}"
        );
        assert!(!output.contains("42"));
    }

    #[test]
    fn keeps_trailing_comma_style() {
        let output = inject("const config = {\n  appId: 'a',\n};\nexport default config;");

        assert!(output.contains("appId: 'a',"));
        assert!(output.contains("cleartext: true },"));
    }

    #[test]
    fn leaves_imports_comments_and_export_untouched() {
        let source = "import { defineConfig } from 'pkg';\n\
                      // dev server override lives in `server`\n\
                      const config = { appId: 'a' };\n\
                      export default config;\n";
        let output = inject(source);

        assert!(output.starts_with("import { defineConfig } from 'pkg';\n"));
        assert!(output.contains("// dev server override lives in `server`\n"));
        assert!(output.ends_with("export default config;\n"));
    }

    #[test]
    fn handles_empty_config_object() {
        let output = inject("export const config = {};");

        assert_eq!(
            output,
            "export const config = { server: { url: \"http://10.0.0.5:5173\", \
             cleartext: true } };"
        );
    }

    #[test]
    fn injection_is_idempotent() {
        let once = inject("const config = { appId: 'a' };\nexport default config;");
        let twice = inject(&once);

        assert_eq!(once.matches("url:").count(), 1);
        assert_eq!(twice.matches("url:").count(), 1);
        assert!(twice.contains("cleartext: true"));
    }

    #[test]
    fn url_is_escaped_as_a_string_literal() {
        let output = inject_server_block("const config = {};", "http://h:1/\"x\"")
            .expect("inject");

        assert!(output.contains("url: \"http://h:1/\\\"x\\\"\""));
    }

    #[test]
    fn malformed_source_is_rejected() {
        let result = inject_server_block("const config = {", URL);

        assert!(matches!(result, Err(SyntaxError::Parse { .. })));
    }

    #[test]
    fn missing_config_binding_is_rejected() {
        let result = inject_server_block("const settings = {};", URL);

        assert!(matches!(result, Err(SyntaxError::MissingConfigObject)));
    }
}
