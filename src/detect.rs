//! Unpacked IDML package detection and layout discovery.

use crate::error::{Result, StructuralFailure};
use std::fs;
use std::path::{Path, PathBuf};

/// Folder holding placed images.
pub const LINKS_DIR: &str = "Links";

/// Folder holding packaged fonts.
pub const DOCUMENT_FONTS_DIR: &str = "Document Fonts";

/// Top-level XML folders of an IDML package.
pub const XML_FOLDERS: [&str; 6] = [
    "MasterSpreads",
    "META-INF",
    "Resources",
    "Spreads",
    "Stories",
    "XML",
];

/// Where the pieces of an unpacked package live.
///
/// Paths are computed, not checked; mandatory artifacts are verified by the
/// parser so that failures surface in a fixed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    /// Root of the unpacked XML tree
    pub root: PathBuf,
    /// Folder holding `Links` and `Document Fonts`
    pub asset_root: PathBuf,
    pub spreads_dir: PathBuf,
    pub stories_dir: PathBuf,
    pub master_spreads_dir: PathBuf,
    pub meta_inf_dir: PathBuf,
    pub fonts_xml: PathBuf,
    pub styles_xml: PathBuf,
    pub preferences_xml: PathBuf,
    /// `Links`, matched case-insensitively
    pub links_dir: Option<PathBuf>,
    /// `Document Fonts`, matched case-insensitively
    pub document_fonts_dir: Option<PathBuf>,
}

impl PackageLayout {
    /// Discover the layout of an unpacked package.
    ///
    /// # Arguments
    /// * `root` - Root of the unpacked XML tree
    /// * `asset_root` - Folder holding `Links` and `Document Fonts`; defaults to `root`
    /// * `create_missing` - Create empty asset folders when absent
    ///
    /// # Example
    /// ```no_run
    /// use idmlcheck::detect::PackageLayout;
    ///
    /// let layout = PackageLayout::discover("unpacked/", None, true).unwrap();
    /// println!("Spreads: {}", layout.spreads_dir.display());
    /// ```
    pub fn discover<P: AsRef<Path>>(
        root: P,
        asset_root: Option<&Path>,
        create_missing: bool,
    ) -> Result<Self> {
        let root = root.as_ref();
        check_dir(root)?;
        let asset_root = match asset_root {
            Some(dir) => {
                check_dir(dir)?;
                dir.to_path_buf()
            }
            None => root.to_path_buf(),
        };

        let resources = root.join("Resources");
        let links_dir = asset_dir(&asset_root, LINKS_DIR, create_missing)?;
        let document_fonts_dir = asset_dir(&asset_root, DOCUMENT_FONTS_DIR, create_missing)?;

        Ok(Self {
            spreads_dir: root.join("Spreads"),
            stories_dir: root.join("Stories"),
            master_spreads_dir: root.join("MasterSpreads"),
            meta_inf_dir: root.join("META-INF"),
            fonts_xml: resources.join("Fonts.xml"),
            styles_xml: resources.join("Styles.xml"),
            preferences_xml: resources.join("Preferences.xml"),
            links_dir,
            document_fonts_dir,
            root: root.to_path_buf(),
            asset_root,
        })
    }

    /// Name of the root folder, used as the default template name.
    pub fn root_name(&self) -> Option<String> {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

fn check_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(StructuralFailure::MissingRoot(path.to_path_buf()).into());
    }
    if !path.is_dir() {
        return Err(StructuralFailure::NotADirectory(path.to_path_buf()).into());
    }
    Ok(())
}

fn asset_dir(parent: &Path, name: &str, create_missing: bool) -> Result<Option<PathBuf>> {
    if let Some(found) = find_dir_case_insensitive(parent, name)? {
        return Ok(Some(found));
    }
    if !create_missing {
        return Ok(None);
    }
    let path = parent.join(name);
    log::debug!("creating missing folder {}", path.display());
    fs::create_dir_all(&path)?;
    Ok(Some(path))
}

/// Find a direct child directory whose name matches ignoring case.
pub fn find_dir_case_insensitive(parent: &Path, name: &str) -> Result<Option<PathBuf>> {
    let wanted = name.to_lowercase();
    for entry in fs::read_dir(parent)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().to_lowercase() == wanted {
            return Ok(Some(entry.path()));
        }
    }
    Ok(None)
}

/// Check if a directory looks like an unpacked IDML package.
///
/// # Returns
/// * `true` if it has `designmap.xml`, or both `Spreads` and `Resources`
/// * `false` otherwise
pub fn is_idml_root<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    path.join("designmap.xml").is_file()
        || (path.join("Spreads").is_dir() && path.join("Resources").is_dir())
}
