//! On-disk package resources: linked images and document fonts.

use super::SourceFontFamily;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// An image file found in the package's `Links` folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// File name including extension
    pub name: String,

    /// Extension including the dot, as found on disk
    pub extension: String,

    /// Full path on disk
    #[serde(skip_serializing)]
    pub path: PathBuf,

    /// Size in bytes
    pub byte_size: u64,

    /// Size in MB, rounded to two decimals
    pub size_mb: f64,

    /// Container rectangle of the link consuming this image
    pub parent_link_data_id: Option<String>,
}

impl Image {
    /// Create an image entry.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, byte_size: u64) -> Self {
        let name = name.into();
        let extension = extension_of(&name);
        Self {
            name,
            extension,
            path: path.into(),
            byte_size,
            size_mb: size_in_mb(byte_size),
            parent_link_data_id: None,
        }
    }

    /// Whether the file is empty.
    pub fn is_zero_size(&self) -> bool {
        self.byte_size == 0
    }
}

/// Extension of a file name including the dot, or an empty string.
pub fn extension_of(name: &str) -> String {
    match name.rfind('.') {
        Some(pos) if pos > 0 => name[pos..].to_string(),
        _ => String::new(),
    }
}

/// Bytes to MB, rounded to two decimals.
pub fn size_in_mb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * 100.0).round() / 100.0
}

/// Images and fonts shipped alongside the XML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceAssets {
    pub images: Vec<Image>,
    pub fonts: Vec<SourceFontFamily>,
}

impl SourceAssets {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find an image by file name.
    pub fn image(&self, name: &str) -> Option<&Image> {
        self.images.iter().find(|i| i.name == name)
    }

    /// Whether a source font has the given family name.
    pub fn has_font_family(&self, family: &str) -> bool {
        self.fonts.iter().any(|f| f.family_name == family)
    }
}
