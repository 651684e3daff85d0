//! Font families: declared in the manifest, found on disk, and used in content.

use serde::{Deserialize, Serialize};

/// Font type label stored for a font file that could not be parsed.
pub const UNSUPPORTED_FONT: &str = "UNSUPPORTED FONT";

/// Capabilities shared by declared and on-disk font families.
pub trait FontFamily {
    /// Family name used for matching.
    fn family_name(&self) -> &str;

    /// Font technology label (e.g. "OpenTypeCFF", "TrueType").
    fn font_type(&self) -> Option<&str>;

    /// Style (face) names in this family.
    fn style_list(&self) -> &[String];

    /// Whether the family is a variable font.
    fn is_variable(&self) -> bool;
}

/// A font family listed in `Resources/Fonts.xml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeclaredFontFamily {
    pub name: String,
    /// FontType of the last font in the family.
    pub font_type: Option<String>,
    pub styles: Vec<String>,
    /// Set when any font in the family declares design axes.
    pub variable: bool,
}

impl DeclaredFontFamily {
    /// Create a family with no fonts.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            font_type: None,
            styles: Vec::new(),
            variable: false,
        }
    }

    /// Add a font (face) to the family.
    pub fn with_font(mut self, style: impl Into<String>, font_type: Option<String>) -> Self {
        self.styles.push(style.into());
        if font_type.is_some() {
            self.font_type = font_type;
        }
        self
    }

    /// Mark the family as variable.
    pub fn variable(mut self) -> Self {
        self.variable = true;
        self
    }
}

impl FontFamily for DeclaredFontFamily {
    fn family_name(&self) -> &str {
        &self.name
    }

    fn font_type(&self) -> Option<&str> {
        self.font_type.as_deref()
    }

    fn style_list(&self) -> &[String] {
        &self.styles
    }

    fn is_variable(&self) -> bool {
        self.variable
    }
}

/// A font file found in the package's `Document Fonts` folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFontFamily {
    pub file_name: String,
    pub family_name: String,
    pub styles: Vec<String>,
    pub font_type: String,
    /// Lowercased extension including the dot (e.g. ".otf").
    pub extension: String,
    pub variable: bool,
    /// The file could not be parsed as a font.
    pub font_error: bool,
}

impl SourceFontFamily {
    /// Placeholder for a file that is not a readable font.
    pub fn unsupported(file_name: impl Into<String>, extension: impl Into<String>) -> Self {
        let file_name = file_name.into();
        Self {
            family_name: file_name.clone(),
            file_name,
            styles: Vec::new(),
            font_type: UNSUPPORTED_FONT.to_string(),
            extension: extension.into(),
            variable: false,
            font_error: true,
        }
    }
}

impl FontFamily for SourceFontFamily {
    fn family_name(&self) -> &str {
        &self.family_name
    }

    fn font_type(&self) -> Option<&str> {
        Some(&self.font_type)
    }

    fn style_list(&self) -> &[String] {
        &self.styles
    }

    fn is_variable(&self) -> bool {
        self.variable
    }
}

/// A declared family that content actually applies.
#[derive(Debug, Clone, Copy)]
pub struct UsedFontFamily<'a>(pub &'a DeclaredFontFamily);

impl FontFamily for UsedFontFamily<'_> {
    fn family_name(&self) -> &str {
        self.0.family_name()
    }

    fn font_type(&self) -> Option<&str> {
        self.0.font_type()
    }

    fn style_list(&self) -> &[String] {
        self.0.style_list()
    }

    fn is_variable(&self) -> bool {
        self.0.is_variable()
    }
}

/// Declared families plus the subset marked as used, in first-use order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontRegistry {
    declared: Vec<DeclaredFontFamily>,
    used: Vec<usize>,
}

impl FontRegistry {
    /// Create a registry from the manifest.
    pub fn new(declared: Vec<DeclaredFontFamily>) -> Self {
        Self {
            declared,
            used: Vec::new(),
        }
    }

    /// All declared families.
    pub fn declared(&self) -> &[DeclaredFontFamily] {
        &self.declared
    }

    /// Mark the declared family named `name` as used.
    ///
    /// Names not in the manifest are ignored; repeated names are kept once.
    /// Returns whether a declared family matched.
    pub fn mark_used(&mut self, name: &str) -> bool {
        let Some(index) = self.declared.iter().position(|f| f.name == name) else {
            log::debug!("applied font '{}' is not declared in the manifest", name);
            return false;
        };
        if !self.used.contains(&index) {
            self.used.push(index);
        }
        true
    }

    /// Used families, in first-use order.
    pub fn used(&self) -> impl Iterator<Item = UsedFontFamily<'_>> {
        self.used
            .iter()
            .filter_map(|&i| self.declared.get(i))
            .map(UsedFontFamily)
    }

    /// Number of used families.
    pub fn used_count(&self) -> usize {
        self.used.len()
    }
}
