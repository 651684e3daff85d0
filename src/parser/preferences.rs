//! `Resources/Preferences.xml`: document bleed.

use super::xml;
use crate::error::Result;
use crate::model::DocumentBleed;
use std::path::Path;

/// Read the bleed offsets of the first `DocumentPreference`.
///
/// Returns `None` when the file has no `DocumentPreference` element.
pub fn parse_preferences(path: &Path) -> Result<Option<DocumentBleed>> {
    let text = xml::read_xml(path)?;
    parse_preferences_str(&text, path)
}

pub(crate) fn parse_preferences_str(text: &str, path: &Path) -> Result<Option<DocumentBleed>> {
    let doc = xml::parse(text, path)?;
    let Some(pref) = xml::descendants(doc.root_element(), "DocumentPreference").next() else {
        log::debug!("no DocumentPreference in {}", path.display());
        return Ok(None);
    };

    Ok(Some(DocumentBleed {
        top: xml::attr(pref, "DocumentBleedTopOffset"),
        bottom: xml::attr(pref, "DocumentBleedBottomOffset"),
        inside: xml::attr(pref, "DocumentBleedInsideOrLeftOffset"),
        outside: xml::attr(pref, "DocumentBleedOutsideOrRightOffset"),
    }))
}
