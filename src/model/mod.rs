//! Document model types for IDML packages.
//!
//! This module defines the entity graph the parser builds and the checks
//! read: spreads with their links and text frames, stories with paragraph
//! and character runs, the two style trees, declared and on-disk fonts,
//! and the images shipped in the package. Relations between entities are
//! plain ids resolved through tables on [`Document`].

mod document;
mod font;
mod resource;
mod spread;
mod story;
mod style;
mod transform;

pub use document::{Document, DocumentBleed, MasterSpreads, SkippedArtifact};
pub use font::{
    DeclaredFontFamily, FontFamily, FontRegistry, SourceFontFamily, UsedFontFamily,
    UNSUPPORTED_FONT,
};
pub use resource::{extension_of, size_in_mb, Image, SourceAssets};
pub use spread::{Link, Spread, TextFrame, EMBEDDED};
pub use story::{
    group_by_style, CharacterStyleRun, Overrides, ParagraphProperties, ParagraphStyleRun, Story,
};
pub use style::{
    strip_marker, ResolvedProperty, StyleDefinition, StyleKind, StyleSheet, StyleSheets,
    BASED_ON, DEFAULT_MAX_DEPTH, ID_MARKER,
};
pub use transform::{AffineTransform, Manipulation, ROTATION_EPSILON_DEG, SKEW_EPSILON};
