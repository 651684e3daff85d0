//! Style sheets and BasedOn cascade resolution.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Placeholder marker InDesign puts in front of built-in names.
pub const ID_MARKER: &str = "$ID/";

/// Property holding the parent style reference.
pub const BASED_ON: &str = "BasedOn";

/// Default recursion bound for BasedOn chains.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Which of the two independent style trees a style belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleKind {
    Paragraph,
    Character,
}

impl StyleKind {
    /// Namespace prefix used in style ids (`ParagraphStyle`, `CharacterStyle`).
    pub fn namespace(self) -> &'static str {
        match self {
            StyleKind::Paragraph => "ParagraphStyle",
            StyleKind::Character => "CharacterStyle",
        }
    }

    /// Pick the tree a style id belongs to, by namespace.
    pub fn of(style_id: &str) -> Option<Self> {
        if style_id.contains("ParagraphStyle") {
            Some(StyleKind::Paragraph)
        } else if style_id.contains("CharacterStyle") {
            Some(StyleKind::Character)
        } else {
            None
        }
    }

    /// Strip the namespace (and placeholder marker) from a style id.
    ///
    /// `ParagraphStyle/$ID/NormalParagraphStyle` becomes `NormalParagraphStyle`,
    /// `ParagraphStyle/Body` becomes `Body`. Ids outside the namespace are
    /// returned unchanged.
    pub fn normalize<'a>(self, style_id: &'a str) -> &'a str {
        let ns = self.namespace();
        style_id
            .strip_prefix(ns)
            .and_then(|rest| rest.strip_prefix('/'))
            .map(|rest| rest.strip_prefix(ID_MARKER).unwrap_or(rest))
            .unwrap_or(style_id)
    }
}

/// Raw properties of one style definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleDefinition {
    /// Property name to raw value, `BasedOn` included.
    pub properties: HashMap<String, String>,
}

impl StyleDefinition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Get a raw property value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Parent style reference, if any.
    pub fn based_on(&self) -> Option<&str> {
        self.get(BASED_ON).filter(|v| !v.is_empty())
    }
}

/// One style tree: style id to definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    pub kind: StyleKind,
    pub styles: HashMap<String, StyleDefinition>,
}

impl StyleSheet {
    /// Create an empty sheet.
    pub fn new(kind: StyleKind) -> Self {
        Self {
            kind,
            styles: HashMap::new(),
        }
    }

    /// Add or replace a style definition.
    pub fn insert(&mut self, style_id: impl Into<String>, definition: StyleDefinition) {
        self.styles.insert(style_id.into(), definition);
    }

    /// Get a definition by id.
    pub fn get(&self, style_id: &str) -> Option<&StyleDefinition> {
        self.styles.get(style_id)
    }

    /// Number of styles.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the sheet has no styles.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Qualify a BasedOn reference: `$ID/[No paragraph style]` becomes
    /// `ParagraphStyle/$ID/[No paragraph style]`.
    fn qualify<'a>(&self, based_on: &'a str) -> std::borrow::Cow<'a, str> {
        if based_on.starts_with(ID_MARKER) {
            std::borrow::Cow::Owned(format!("{}/{}", self.kind.namespace(), based_on))
        } else {
            std::borrow::Cow::Borrowed(based_on)
        }
    }

    /// Resolve the effective value of `property` for `style_id`.
    ///
    /// A style that declares a non-empty value wins with no provenance.
    /// Otherwise the BasedOn chain is followed; `inherited_from` names the
    /// immediate parent consulted from `style_id`, not the style that
    /// finally defines the value.
    pub fn resolve(
        &self,
        style_id: &str,
        property: &str,
        max_depth: usize,
    ) -> Result<ResolvedProperty> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut current = style_id.to_string();
        let mut nearest_parent: Option<String> = None;

        loop {
            if !visited.insert(current.clone()) {
                return Err(Error::StyleCycle {
                    style_id: current,
                    property: property.to_string(),
                });
            }
            if visited.len() > max_depth {
                return Err(Error::StyleDepthExceeded {
                    style_id: current,
                    property: property.to_string(),
                    depth: max_depth,
                });
            }

            let Some(definition) = self.get(&current) else {
                return Ok(ResolvedProperty::unset());
            };

            if let Some(value) = definition.get(property).map(strip_marker) {
                if !value.is_empty() {
                    return Ok(ResolvedProperty {
                        value: Some(value.to_string()),
                        inherited_from: nearest_parent,
                    });
                }
            }

            let Some(parent) = definition.based_on() else {
                return Ok(ResolvedProperty::unset());
            };
            let parent = self.qualify(parent).into_owned();
            if nearest_parent.is_none() {
                nearest_parent = Some(parent.clone());
            }
            current = parent;
        }
    }
}

/// Strip the placeholder marker from a raw value.
pub fn strip_marker(value: &str) -> &str {
    value.strip_prefix(ID_MARKER).unwrap_or(value)
}

/// Effective value of a property plus where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedProperty {
    pub value: Option<String>,
    pub inherited_from: Option<String>,
}

impl ResolvedProperty {
    /// No value anywhere on the chain.
    pub fn unset() -> Self {
        Self::default()
    }

    /// A value declared directly on the style.
    pub fn own(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            inherited_from: None,
        }
    }

    /// Resolved value as a string slice.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// `Inherited from: X`, or an empty string for own values.
    pub fn inherited_note(&self) -> String {
        match &self.inherited_from {
            Some(parent) => format!("Inherited from: {}", parent),
            None => String::new(),
        }
    }
}

/// The paragraph and character trees of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleSheets {
    pub paragraph: StyleSheet,
    pub character: StyleSheet,
    /// BasedOn recursion bound.
    pub max_depth: usize,
}

impl StyleSheets {
    /// Create empty sheets.
    pub fn new() -> Self {
        Self {
            paragraph: StyleSheet::new(StyleKind::Paragraph),
            character: StyleSheet::new(StyleKind::Character),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the recursion bound.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sheet for a given kind.
    pub fn sheet(&self, kind: StyleKind) -> &StyleSheet {
        match kind {
            StyleKind::Paragraph => &self.paragraph,
            StyleKind::Character => &self.character,
        }
    }

    /// Resolve against the tree selected by the style id's namespace.
    pub fn resolve(&self, style_id: &str, property: &str) -> Result<ResolvedProperty> {
        match StyleKind::of(style_id) {
            Some(kind) => self.sheet(kind).resolve(style_id, property, self.max_depth),
            None => {
                log::debug!("style id '{}' has no known namespace", style_id);
                Ok(ResolvedProperty::unset())
            }
        }
    }
}

impl Default for StyleSheets {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> StyleSheets {
        let mut sheets = StyleSheets::new();
        sheets.paragraph.insert(
            "ParagraphStyle/S1",
            StyleDefinition::new().with(BASED_ON, "ParagraphStyle/S2"),
        );
        sheets.paragraph.insert(
            "ParagraphStyle/S2",
            StyleDefinition::new().with(BASED_ON, "ParagraphStyle/S3"),
        );
        sheets.paragraph.insert(
            "ParagraphStyle/S3",
            StyleDefinition::new()
                .with(BASED_ON, "$ID/[No paragraph style]")
                .with("KerningMethod", "$ID/Optical"),
        );
        sheets.paragraph.insert(
            "ParagraphStyle/$ID/[No paragraph style]",
            StyleDefinition::new()
                .with("KerningMethod", "$ID/Metrics")
                .with("Composer", "HL Composer"),
        );
        sheets
    }

    #[test]
    fn test_no_value_no_parent() {
        let mut sheets = StyleSheets::new();
        sheets
            .paragraph
            .insert("ParagraphStyle/Lonely", StyleDefinition::new());
        let resolved = sheets.resolve("ParagraphStyle/Lonely", "Hyphenation").unwrap();
        assert_eq!(resolved, ResolvedProperty::unset());
    }

    #[test]
    fn test_own_value_has_no_provenance() {
        let sheets = chain();
        let resolved = sheets.resolve("ParagraphStyle/S3", "KerningMethod").unwrap();
        assert_eq!(resolved, ResolvedProperty::own("Optical"));
    }

    #[test]
    fn test_inherited_reports_nearest_parent() {
        let sheets = chain();
        let resolved = sheets.resolve("ParagraphStyle/S1", "KerningMethod").unwrap();
        assert_eq!(resolved.value(), Some("Optical"));
        assert_eq!(resolved.inherited_from.as_deref(), Some("ParagraphStyle/S2"));
        assert_eq!(resolved.inherited_note(), "Inherited from: ParagraphStyle/S2");
    }

    #[test]
    fn test_marker_based_on_is_qualified() {
        let sheets = chain();
        let resolved = sheets.resolve("ParagraphStyle/S1", "Composer").unwrap();
        assert_eq!(resolved.value(), Some("HL Composer"));
        assert_eq!(resolved.inherited_from.as_deref(), Some("ParagraphStyle/S2"));
    }

    #[test]
    fn test_empty_value_falls_through() {
        let mut sheets = chain();
        sheets.paragraph.insert(
            "ParagraphStyle/S0",
            StyleDefinition::new()
                .with("KerningMethod", "")
                .with(BASED_ON, "ParagraphStyle/S3"),
        );
        let resolved = sheets.resolve("ParagraphStyle/S0", "KerningMethod").unwrap();
        assert_eq!(resolved.value(), Some("Optical"));
    }

    #[test]
    fn test_cycle_is_an_error() {
        let mut sheets = StyleSheets::new();
        sheets.paragraph.insert(
            "ParagraphStyle/A",
            StyleDefinition::new().with(BASED_ON, "ParagraphStyle/B"),
        );
        sheets.paragraph.insert(
            "ParagraphStyle/B",
            StyleDefinition::new().with(BASED_ON, "ParagraphStyle/A"),
        );
        let err = sheets.resolve("ParagraphStyle/A", "AppliedFont").unwrap_err();
        assert!(matches!(err, Error::StyleCycle { ref style_id, .. } if style_id == "ParagraphStyle/A"));
    }

    #[test]
    fn test_depth_bound() {
        let mut sheets = StyleSheets::new().with_max_depth(3);
        for i in 0..5 {
            sheets.character.insert(
                format!("CharacterStyle/C{}", i),
                StyleDefinition::new().with(BASED_ON, format!("CharacterStyle/C{}", i + 1)),
            );
        }
        let err = sheets.resolve("CharacterStyle/C0", "KerningMethod").unwrap_err();
        assert!(matches!(err, Error::StyleDepthExceeded { depth: 3, .. }));
    }

    #[test]
    fn test_unknown_namespace_and_style() {
        let sheets = chain();
        assert_eq!(
            sheets.resolve("ObjectStyle/X", "AppliedFont").unwrap(),
            ResolvedProperty::unset()
        );
        assert_eq!(
            sheets.resolve("ParagraphStyle/Missing", "AppliedFont").unwrap(),
            ResolvedProperty::unset()
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            StyleKind::Paragraph.normalize("ParagraphStyle/$ID/NormalParagraphStyle"),
            "NormalParagraphStyle"
        );
        assert_eq!(StyleKind::Paragraph.normalize("ParagraphStyle/Body"), "Body");
        assert_eq!(
            StyleKind::Character.normalize("CharacterStyle/$ID/[No character style]"),
            "[No character style]"
        );
        assert_eq!(StyleKind::Character.normalize("Other"), "Other");
    }
}
