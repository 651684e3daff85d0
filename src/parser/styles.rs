//! `Resources/Styles.xml`: paragraph and character style trees.

use super::xml;
use crate::error::Result;
use crate::model::{StyleDefinition, StyleSheets};
use roxmltree::Node;
use std::path::Path;

/// Paragraph style attributes the checks read.
const PARAGRAPH_ATTRIBUTES: [&str; 5] = [
    "Hyphenation",
    "FillTint",
    "GridAlignment",
    "Composer",
    "KerningMethod",
];

/// Character style attributes the checks read.
const CHARACTER_ATTRIBUTES: [&str; 1] = ["KerningMethod"];

/// Parse the style definitions file.
pub fn parse_style_sheets(path: &Path, max_depth: usize) -> Result<StyleSheets> {
    let text = xml::read_xml(path)?;
    parse_style_sheets_str(&text, path, max_depth)
}

pub(crate) fn parse_style_sheets_str(
    text: &str,
    path: &Path,
    max_depth: usize,
) -> Result<StyleSheets> {
    let doc = xml::parse(text, path)?;
    let root = doc.root_element();
    let mut sheets = StyleSheets::new().with_max_depth(max_depth);

    for node in xml::descendants(root, "ParagraphStyle") {
        if let Some((id, definition)) = definition(node, &PARAGRAPH_ATTRIBUTES) {
            sheets.paragraph.insert(id, definition);
        }
    }
    for node in xml::descendants(root, "CharacterStyle") {
        if let Some((id, definition)) = definition(node, &CHARACTER_ATTRIBUTES) {
            sheets.character.insert(id, definition);
        }
    }

    log::debug!(
        "{} paragraph styles, {} character styles",
        sheets.paragraph.len(),
        sheets.character.len()
    );
    Ok(sheets)
}

/// `Properties` children by tag, then the listed attributes.
fn definition(node: Node, attributes: &[&str]) -> Option<(String, StyleDefinition)> {
    let id = xml::attr(node, "Self")?;
    let mut definition = StyleDefinition::new();

    if let Some(properties) = xml::child(node, "Properties") {
        for property in properties.children().filter(|n| n.is_element()) {
            if let Some(value) = xml::text(property) {
                definition
                    .properties
                    .insert(property.tag_name().name().to_string(), value);
            }
        }
    }
    for name in attributes {
        if let Some(value) = xml::attr(node, name) {
            definition.properties.insert((*name).to_string(), value);
        }
    }
    Some((id, definition))
}
