//! Serializer from resolved block trees to indented key/value text.
//!
//! Every block renders as its quoted primary name, an opening brace, one line
//! per resolved pair, its children one tab deeper, and a closing brace:
//!
//! ```text
//! "weapon"
//! {
//! 	"damage" "10"
//! 	"color" "red" [$windows]
//! 	"stats"
//! 	{
//! 	}
//! }
//! ```
//!
//! The document head is never emitted.

use std::io::{self, Write};

use log::{debug, trace};

use hoodie_core::{BlockId, Document, pair};
use hoodie_parser::TraitTable;

const INDENT: &str = "\t";

/// Write the resolved tree of `document` to `w`.
///
/// Top-level blocks whose primary name is a registered trait are removed from
/// the tree before anything is written.
pub fn compile_document<W: Write>(
    document: &mut Document,
    traits: &TraitTable,
    w: &mut W,
) -> io::Result<()> {
    document.detach_top_level(|block| traits.contains(block.name()));
    debug!(source = document.source(); "Compiling document");

    for &child in document.children(document.head()) {
        compile_block(document, child, 0, w)?;
    }
    Ok(())
}

/// Render the resolved tree of `document` to a string.
pub fn render(document: &mut Document, traits: &TraitTable) -> String {
    let mut out = Vec::new();
    compile_document(document, traits, &mut out).expect("writing to a Vec never fails");
    String::from_utf8(out).expect("rendered output is built from UTF-8 strings")
}

fn compile_block<W: Write>(
    document: &Document,
    id: BlockId,
    depth: usize,
    w: &mut W,
) -> io::Result<()> {
    let block = document.block(id);
    let indent = INDENT.repeat(depth);
    trace!(block = block.name(), depth; "Compiling block");

    writeln!(w, "{indent}\"{}\"", block.name())?;
    writeln!(w, "{indent}{{")?;

    for (key, value) in block.pairs() {
        match pair::split_key(key) {
            (base, Some(tag)) => writeln!(w, "{indent}{INDENT}\"{base}\" \"{value}\" [{tag}]")?,
            (base, None) => writeln!(w, "{indent}{INDENT}\"{base}\" \"{value}\"")?,
        }
    }

    for &child in block.children() {
        compile_block(document, child, depth + 1, w)?;
    }

    writeln!(w, "{indent}}}")
}

#[cfg(test)]
mod tests {
    use hoodie_parser::parse_all;

    use super::*;

    fn compile(sources: &[(&str, &str)], index: usize) -> String {
        let (mut documents, traits) = parse_all(sources).expect("sources should parse");
        render(&mut documents[index], &traits)
    }

    #[test]
    fn test_render_single_block() {
        let out = compile(&[("a.hoo", "item {\n  \"name\" \"sword\"\n}\n")], 0);
        assert_eq!(out, "\"item\"\n{\n\t\"name\" \"sword\"\n}\n");
    }

    #[test]
    fn test_render_conditional_tag() {
        let out = compile(&[("a.hoo", "item {\n  color$windows red\n}\n")], 0);
        assert_eq!(out, "\"item\"\n{\n\t\"color\" \"red\" [$windows]\n}\n");
    }

    #[test]
    fn test_render_nested_indentation() {
        let out = compile(
            &[("a.hoo", "outer {\n  k v\n  inner {\n    deep yes\n  }\n}\n")],
            0,
        );
        assert_eq!(
            out,
            "\"outer\"\n{\n\t\"k\" \"v\"\n\t\"inner\"\n\t{\n\t\t\"deep\" \"yes\"\n\t}\n}\n"
        );
    }

    #[test]
    fn test_traits_are_not_emitted() {
        let out = compile(
            &[("a.hoo", "trait sharp {\n  edge keen\n}\nsword sharp {\n  name blade\n}\n")],
            0,
        );
        assert_eq!(
            out,
            "\"sword\"\n{\n\t\"edge\" \"keen\"\n\t\"name\" \"blade\"\n}\n"
        );
    }

    #[test]
    fn test_trait_only_document_renders_empty() {
        let out = compile(&[("traits.hoo", "trait sharp {\n  edge keen\n}\n")], 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_output_reparses_to_same_pairs() {
        let source = "armory {\n  owner guild\n  weapon {\n    damage 10\n    name sword\n  }\n}\n";
        let first = compile(&[("a.hoo", source)], 0);
        let second = compile(&[("a.hoo", &first)], 0);

        assert_eq!(first, second);
    }
}
