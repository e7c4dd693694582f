//! Property-list helpers for object literals.
//!
//! An object literal's entries are `pair` nodes, shorthand identifiers,
//! spread elements, or method definitions; comments interleave freely.
//! These helpers answer "what key does this entry carry", and compute the
//! byte ranges needed to delete or append entries without breaking comma
//! placement.

use std::ops::Range;

use crate::parser::node_text;

/// Returns the entries of an object literal in source order, skipping
/// comments.
pub(crate) fn entries(object: tree_sitter::Node<'_>) -> Vec<tree_sitter::Node<'_>> {
    let mut cursor = object.walk();
    object
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Returns the key text of an object-literal entry, or `None` when the entry
/// has no single key (a spread element, for example).
///
/// String keys are unquoted, so `"server"` and `server` compare equal.
pub(crate) fn entry_key(entry: tree_sitter::Node<'_>, source: &str) -> Option<String> {
    match entry.kind() {
        "pair" => entry
            .child_by_field_name("key")
            .map(|key| key_text(key, source)),
        "shorthand_property_identifier" => Some(node_text(entry, source).to_owned()),
        "method_definition" => entry
            .child_by_field_name("name")
            .map(|key| key_text(key, source)),
        _ => None,
    }
}

/// Returns the textual key of a property-key node, unquoting string keys.
fn key_text(key: tree_sitter::Node<'_>, source: &str) -> String {
    if key.kind() == "string" {
        let mut cursor = key.walk();
        return key
            .named_children(&mut cursor)
            .find(|child| child.kind() == "string_fragment")
            .map(|fragment| node_text(fragment, source).to_owned())
            .unwrap_or_default();
    }
    node_text(key, source).to_owned()
}

/// Returns the byte range that deletes an entry together with its separating
/// comma.
///
/// Prefers consuming the comma after the entry; when the entry is last, the
/// comma before it is consumed instead. An entry with no adjacent comma (the
/// only entry) is deleted on its own.
pub(crate) fn removal_range(entry: tree_sitter::Node<'_>) -> Range<usize> {
    if let Some(next) = entry.next_sibling() {
        if next.kind() == "," {
            return entry.start_byte()..next.end_byte();
        }
    }
    if let Some(prev) = entry.prev_sibling() {
        if prev.kind() == "," {
            return prev.start_byte()..entry.end_byte();
        }
    }
    entry.byte_range()
}

/// Where and how to splice an appended property into an object literal.
pub(crate) struct Appendix {
    /// Byte offset the replacement text is inserted at.
    pub position: usize,
    /// The property text wrapped with the separators the site requires.
    pub text: String,
}

/// Computes the insertion for appending `property` at the end of an object
/// literal's property list.
///
/// `removed` marks a byte range already scheduled for deletion; children
/// inside it are ignored when choosing the anchor, so the separator logic
/// sees the object as it will look after the deletion is applied.
pub(crate) fn append_property(
    object: tree_sitter::Node<'_>,
    property: &str,
    removed: Option<&Range<usize>>,
) -> Appendix {
    let mut anchor = None;
    let mut cursor = object.walk();
    for child in object.children(&mut cursor) {
        if child.kind() == "}" || child.kind() == "comment" {
            continue;
        }
        if let Some(range) = removed {
            if range.start <= child.start_byte() && child.end_byte() <= range.end {
                continue;
            }
        }
        anchor = Some(child);
    }

    match anchor {
        // Empty property list: splice right after the opening brace.
        Some(node) if node.kind() == "{" => Appendix {
            position: node.end_byte(),
            text: format!(" {property} "),
        },
        // Trailing comma present: keep the style and re-trail.
        Some(node) if node.kind() == "," => Appendix {
            position: node.end_byte(),
            text: format!(" {property},"),
        },
        // After the last surviving entry.
        Some(node) => Appendix {
            position: node.end_byte(),
            text: format!(", {property}"),
        },
        // Unreachable for a well-formed object node, but harmless: splice at
        // the start of the object body.
        None => Appendix {
            position: object.start_byte().saturating_add(1),
            text: format!(" {property} "),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::locate_config_object;
    use crate::parser::{ParseResult, Parser};
    use rstest::rstest;

    fn parse_config(body: &str) -> ParseResult {
        let mut parser = Parser::new().expect("parser init");
        parser
            .parse(&format!("const config = {body};"))
            .expect("parse")
    }

    #[rstest]
    #[case("{ server: 1 }", "server")]
    #[case("{ 'server': 1 }", "server")]
    #[case("{ \"server\": 1 }", "server")]
    #[case("{ server }", "server")]
    #[case("{ server() { return 1; } }", "server")]
    fn entry_key_reads_all_entry_shapes(#[case] body: &str, #[case] expected: &str) {
        let parsed = parse_config(body);
        let object = locate_config_object(&parsed).expect("config object");

        let found = entries(object)
            .into_iter()
            .filter_map(|entry| entry_key(entry, parsed.source()))
            .collect::<Vec<_>>();
        assert_eq!(found, vec![expected.to_owned()]);
    }

    #[test]
    fn entry_key_is_none_for_spread() {
        let parsed = parse_config("{ ...base }");
        let object = locate_config_object(&parsed).expect("config object");

        let all = entries(object);
        assert_eq!(all.len(), 1);
        let spread = all.first().copied().expect("spread entry");
        assert_eq!(entry_key(spread, parsed.source()), None);
    }

    #[rstest]
    #[case("{ server: 1, appId: 'a' }", "server: 1,")]
    #[case("{ appId: 'a', server: 1 }", ", server: 1")]
    #[case("{ server: 1 }", "server: 1")]
    fn removal_range_consumes_adjacent_comma(#[case] body: &str, #[case] removed_text: &str) {
        let parsed = parse_config(body);
        let object = locate_config_object(&parsed).expect("config object");

        let server = entries(object)
            .into_iter()
            .find(|entry| entry_key(*entry, parsed.source()).as_deref() == Some("server"))
            .expect("server entry");
        let range = removal_range(server);
        assert_eq!(parsed.source().get(range), Some(removed_text));
    }
}
