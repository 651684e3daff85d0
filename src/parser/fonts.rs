//! `Resources/Fonts.xml`: the declared font manifest.

use super::xml;
use crate::error::Result;
use crate::model::DeclaredFontFamily;
use std::path::Path;

/// Parse the font manifest into declared families.
pub fn parse_font_manifest(path: &Path) -> Result<Vec<DeclaredFontFamily>> {
    let text = xml::read_xml(path)?;
    parse_font_manifest_str(&text, path)
}

pub(crate) fn parse_font_manifest_str(text: &str, path: &Path) -> Result<Vec<DeclaredFontFamily>> {
    let doc = xml::parse(text, path)?;
    let mut families = Vec::new();

    for family_node in xml::descendants(doc.root_element(), "FontFamily") {
        let Some(name) = xml::attr(family_node, "Name") else {
            log::warn!("FontFamily without Name in {}", path.display());
            continue;
        };
        let mut family = DeclaredFontFamily::new(name);
        for font in xml::descendants(family_node, "Font") {
            let style = xml::attr(font, "Name").unwrap_or_default();
            family = family.with_font(style, xml::attr(font, "FontType"));
            if font.has_attribute("NumDesignAxes") {
                family.variable = true;
            }
        }
        families.push(family);
    }

    log::debug!("{} font families declared", families.len());
    Ok(families)
}
