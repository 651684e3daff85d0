//! Inventory of the `Links` and `Document Fonts` folders.

use super::font_file::parse_font_file;
use crate::detect::PackageLayout;
use crate::error::Result;
use crate::model::{Image, SourceAssets};
use std::fs;
use std::path::{Path, PathBuf};

/// Finder metadata files that are never assets.
const DS_STORE: &str = ".DS_Store";

/// Font list files written by InDesign's package command.
const FONT_LIST_EXTENSION: &str = ".lst";

/// List images and fonts shipped next to the XML.
///
/// Absent folders yield empty lists.
pub fn inventory(layout: &PackageLayout) -> Result<SourceAssets> {
    let mut assets = SourceAssets::new();

    if let Some(links) = &layout.links_dir {
        for (name, path) in files_in(links)? {
            if name == DS_STORE {
                continue;
            }
            let size = fs::metadata(&path)?.len();
            assets.images.push(Image::new(name, path, size));
        }
    }

    if let Some(fonts) = &layout.document_fonts_dir {
        for (name, path) in files_in(fonts)? {
            if name == DS_STORE || name.ends_with(FONT_LIST_EXTENSION) {
                continue;
            }
            assets.fonts.push(parse_font_file(&path));
        }
    }

    log::debug!(
        "assets: {} images, {} fonts",
        assets.images.len(),
        assets.fonts.len()
    );
    Ok(assets)
}

/// Regular files of a folder, sorted by name.
fn files_in(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let links = dir.path().join("Links");
        let fonts = dir.path().join("Document Fonts");
        fs::create_dir_all(&links).unwrap();
        fs::create_dir_all(&fonts).unwrap();
        fs::write(links.join("b.png"), vec![0u8; 2048]).unwrap();
        fs::write(links.join("a.jpg"), b"").unwrap();
        fs::write(links.join(".DS_Store"), b"x").unwrap();
        fs::write(fonts.join("AdobeFnt.lst"), b"list").unwrap();
        fs::write(fonts.join("Broken.otf"), b"nope").unwrap();

        let layout = PackageLayout::discover(dir.path(), None, false).unwrap();
        let assets = inventory(&layout).unwrap();

        let names: Vec<&str> = assets.images.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
        assert!(assets.images[0].is_zero_size());
        assert_eq!(assets.images[1].byte_size, 2048);

        assert_eq!(assets.fonts.len(), 1);
        assert!(assets.fonts[0].font_error);
    }

    #[test]
    fn test_missing_folders_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let layout = PackageLayout::discover(dir.path(), None, false).unwrap();
        let assets = inventory(&layout).unwrap();
        assert!(assets.images.is_empty());
        assert!(assets.fonts.is_empty());
    }
}
