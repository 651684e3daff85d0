//! Font files from the `Document Fonts` folder, read with ttf-parser.

use crate::model::SourceFontFamily;
use std::fs;
use std::path::Path;
use ttf_parser::{name_id, Face, PlatformId};

/// US English, the language InDesign reads family names in.
const LANG_EN_US: u16 = 0x0409;

/// Read family name, styles and technology of one font file.
///
/// Files that cannot be read or parsed become an unsupported placeholder.
pub fn parse_font_file(path: &Path) -> SourceFontFamily {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            log::warn!("cannot read font {}: {}", path.display(), e);
            return SourceFontFamily::unsupported(file_name, extension);
        }
    };
    parse_font_bytes(&data, file_name, extension)
}

pub(crate) fn parse_font_bytes(data: &[u8], file_name: String, extension: String) -> SourceFontFamily {
    let face = match Face::parse(data, 0) {
        Ok(face) => face,
        Err(e) => {
            log::warn!("error processing font {}: {}", file_name, e);
            return SourceFontFamily::unsupported(file_name, extension);
        }
    };

    let Some(family_name) = family_name(&face) else {
        log::warn!("font {} has no family name", file_name);
        return SourceFontFamily::unsupported(file_name, extension);
    };

    SourceFontFamily {
        file_name,
        family_name,
        styles: style_names(&face),
        font_type: font_type(data).to_string(),
        extension,
        variable: face.is_variable(),
        font_error: false,
    }
}

/// English Windows name record with the given id.
fn english_name(face: &Face, id: u16) -> Option<String> {
    face.names()
        .into_iter()
        .filter(|n| n.platform_id == PlatformId::Windows && n.language_id == LANG_EN_US)
        .filter(|n| n.name_id == id)
        .find_map(|n| n.to_string())
}

/// Typographic family, then legacy family, then any family record.
fn family_name(face: &Face) -> Option<String> {
    english_name(face, name_id::TYPOGRAPHIC_FAMILY)
        .or_else(|| english_name(face, name_id::FAMILY))
        .or_else(|| {
            face.names()
                .into_iter()
                .filter(|n| n.name_id == name_id::FAMILY)
                .find_map(|n| n.to_string())
        })
        .filter(|name| !name.is_empty())
}

fn style_names(face: &Face) -> Vec<String> {
    let collect = |id: u16| -> Vec<String> {
        face.names()
            .into_iter()
            .filter(|n| n.platform_id == PlatformId::Windows && n.language_id == LANG_EN_US)
            .filter(|n| n.name_id == id)
            .filter_map(|n| n.to_string())
            .collect()
    };
    let typographic = collect(name_id::TYPOGRAPHIC_SUBFAMILY);
    if typographic.is_empty() {
        collect(name_id::SUBFAMILY)
    } else {
        typographic
    }
}

/// Technology label from the sfnt version tag.
pub(crate) fn font_type(data: &[u8]) -> &'static str {
    match data.get(0..4) {
        Some([0x00, 0x01, 0x00, 0x00]) | Some(b"true") => "TrueType",
        Some(b"OTTO") => "OpenTypeCFF",
        _ => "Other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNSUPPORTED_FONT;
    use std::io::Write;

    #[test]
    fn test_font_type_tags() {
        assert_eq!(font_type(&[0, 1, 0, 0, 9]), "TrueType");
        assert_eq!(font_type(b"true...."), "TrueType");
        assert_eq!(font_type(b"OTTO...."), "OpenTypeCFF");
        assert_eq!(font_type(b"wOFF...."), "Other");
        assert_eq!(font_type(b"ab"), "Other");
    }

    #[test]
    fn test_garbage_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Broken.OTF");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"definitely not a font").unwrap();

        let font = parse_font_file(&path);
        assert!(font.font_error);
        assert_eq!(font.font_type, UNSUPPORTED_FONT);
        assert_eq!(font.family_name, "Broken.OTF");
        assert_eq!(font.extension, ".otf");
    }

    #[test]
    fn test_missing_file_is_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let font = parse_font_file(&dir.path().join("gone.ttf"));
        assert!(font.font_error);
        assert_eq!(font.extension, ".ttf");
    }
}
