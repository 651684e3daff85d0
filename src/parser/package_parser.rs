//! Document model builder for unpacked IDML packages.

use std::fs;
use std::path::{Path, PathBuf};

use crate::detect::PackageLayout;
use crate::error::{Error, Result, StructuralFailure};
use crate::model::{Document, FontRegistry, SkippedArtifact};

use super::assets::inventory;
use super::fonts::parse_font_manifest;
use super::options::{ErrorMode, ParseOptions};
use super::preferences::parse_preferences;
use super::spreads::{parse_master_spread, parse_spread};
use super::stories::parse_story_file;
use super::styles::parse_style_sheets;

const SPREADS_DIR: &str = "Spreads directory";
const FONTS_XML: &str = "Fonts.XML";
const STYLES_XML: &str = "Styles.xml file";
const PREFERENCES_XML: &str = "Preferences.xml file";

/// Builds a [`Document`] from an unpacked package.
pub struct PackageParser {
    layout: PackageLayout,
    options: ParseOptions,
}

impl PackageParser {
    /// Open an unpacked package directory.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::open_with_options(root, ParseOptions::default())
    }

    /// Open an unpacked package directory with custom options.
    pub fn open_with_options<P: AsRef<Path>>(root: P, options: ParseOptions) -> Result<Self> {
        let layout = PackageLayout::discover(
            root,
            options.asset_root.as_deref(),
            options.create_missing_asset_dirs,
        )?;
        Ok(Self { layout, options })
    }

    /// Create a parser over an already discovered layout.
    pub fn from_layout(layout: PackageLayout, options: ParseOptions) -> Self {
        Self { layout, options }
    }

    /// The package layout being parsed.
    pub fn layout(&self) -> &PackageLayout {
        &self.layout
    }

    /// Build the cross-referenced document.
    ///
    /// Mandatory artifacts are verified first, in a fixed order, so that the
    /// first missing one is the one reported.
    pub fn parse(&self) -> Result<Document> {
        self.check_mandatory()?;

        let mut document = Document::new();
        document.assets = inventory(&self.layout)?;

        let declared = parse_font_manifest(&self.layout.fonts_xml)
            .map_err(|e| unparsable(FONTS_XML, e))?;
        document.fonts = FontRegistry::new(declared);

        for path in xml_files(&self.layout.spreads_dir)? {
            if let Some(spread) = self.per_file(&path, &mut document.skipped, parse_spread(&path))? {
                document.spreads.push(spread);
            }
        }

        document.styles = parse_style_sheets(&self.layout.styles_xml, self.options.max_style_depth)
            .map_err(|e| unparsable(STYLES_XML, e))?;

        document.stories_exist = self.layout.stories_dir.is_dir();
        if document.stories_exist {
            for path in xml_files(&self.layout.stories_dir)? {
                let parsed = parse_story_file(&path, &document.styles, &mut document.fonts);
                if let Some(stories) = self.per_file(&path, &mut document.skipped, parsed)? {
                    for story in stories {
                        document.add_story(story);
                    }
                }
            }
        } else {
            log::debug!("no Stories directory; story checks will be skipped");
        }

        document.assign_story_pages();
        let unresolved = document.link_frames_to_stories();
        if unresolved > 0 {
            log::debug!("{} text frames without a parsed story", unresolved);
        }
        document.link_images_to_links();

        document.master_spreads.present = self.layout.master_spreads_dir.is_dir();
        if document.master_spreads.present {
            for path in xml_files(&self.layout.master_spreads_dir)? {
                let parsed = parse_master_spread(&path);
                if let Some(master) = self.per_file(&path, &mut document.skipped, parsed)? {
                    document
                        .master_spreads
                        .unexpected_elements
                        .extend(master.unexpected_elements);
                    document.master_spreads.links.extend(master.links);
                }
            }
        }

        document.bleed = parse_preferences(&self.layout.preferences_xml)
            .map_err(|e| unparsable(PREFERENCES_XML, e))?;

        log::debug!(
            "document built: {} spreads, {} stories, {} skipped",
            document.spreads.len(),
            document.stories.len(),
            document.skipped.len()
        );
        Ok(document)
    }

    fn check_mandatory(&self) -> Result<()> {
        if !self.layout.spreads_dir.is_dir() {
            return Err(StructuralFailure::missing(SPREADS_DIR, &self.layout.spreads_dir).into());
        }
        let files = [
            (FONTS_XML, &self.layout.fonts_xml),
            (STYLES_XML, &self.layout.styles_xml),
            (PREFERENCES_XML, &self.layout.preferences_xml),
        ];
        for (artifact, path) in files {
            if !path.is_file() {
                return Err(StructuralFailure::missing(artifact, path).into());
            }
        }
        Ok(())
    }

    /// Apply the error mode to one per-file result.
    fn per_file<T>(
        &self,
        path: &Path,
        skipped: &mut Vec<SkippedArtifact>,
        result: Result<T>,
    ) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_structural() || self.options.error_mode == ErrorMode::Strict => Err(e),
            Err(e) => {
                log::warn!("skipping {}: {}", path.display(), e);
                skipped.push(SkippedArtifact {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                });
                Ok(None)
            }
        }
    }
}

fn unparsable(artifact: &'static str, err: Error) -> Error {
    match err {
        Error::Structural(_) => err,
        other => StructuralFailure::UnparsableArtifact {
            artifact,
            message: other.to_string(),
        }
        .into(),
    }
}

/// `.xml` files of a folder, sorted by name.
fn xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_xml = path
            .extension()
            .map(|e| e.eq_ignore_ascii_case("xml"))
            .unwrap_or(false);
        if is_xml && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
