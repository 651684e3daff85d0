//! Spread-level types: spreads, placed-graphic links and text frames.

use super::AffineTransform;
use serde::{Deserialize, Serialize};

/// `StoredState` of a link whose graphic lives inside the document.
pub const EMBEDDED: &str = "Embedded";

/// One layout surface parsed from a `Spreads/*.xml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    /// `Self` of the Spread element
    pub id: String,

    /// Source file name
    pub file_name: String,

    /// `Self` of the first page
    pub page_id: Option<String>,

    /// `Name` of the first page
    pub page_name: Option<String>,

    /// `GeometricBounds` of the first page
    pub geometric_bounds: Option<String>,

    pub links: Vec<Link>,

    pub text_frames: Vec<TextFrame>,

    /// Story ids referenced by any `ParentStory` attribute, in document order
    pub child_story_ids: Vec<String>,

    /// Rectangles holding pasted (unlinked) graphics
    pub pasted_graphics: usize,
}

impl Spread {
    /// Create an empty spread.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set the first page.
    pub fn with_page(mut self, page_id: impl Into<String>, page_name: impl Into<String>) -> Self {
        self.page_id = Some(page_id.into());
        self.page_name = Some(page_name.into());
        self
    }

    /// Whether a story is placed on this spread.
    pub fn contains_story(&self, story_id: &str) -> bool {
        self.child_story_ids.iter().any(|id| id == story_id)
    }

    /// Record a child story id, keeping the first occurrence only.
    pub fn add_child_story(&mut self, story_id: impl Into<String>) {
        let story_id = story_id.into();
        if !self.contains_story(&story_id) {
            self.child_story_ids.push(story_id);
        }
    }
}

/// A placed graphic referencing an image file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// `Self` of the Link element
    pub id: String,

    /// Decoded file name (last segment of `LinkResourceURI`)
    pub image_name: String,

    /// Decoded `LinkResourceURI`
    pub resource_uri: String,

    /// `StoredState` (Normal, Embedded, ...)
    pub stored_state: Option<String>,

    /// Transform of the image element inside its container
    pub item_transform: Option<AffineTransform>,

    /// Transform of the container (rectangle)
    pub container_transform: Option<AffineTransform>,

    /// `Self` of the container rectangle
    pub rectangle_id: Option<String>,

    /// Object style applied to the image element
    pub image_object_style: Option<String>,

    /// Object style applied to the container
    pub container_object_style: Option<String>,
}

impl Link {
    /// Create a link to an image file.
    pub fn new(id: impl Into<String>, image_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image_name: image_name.into(),
            ..Default::default()
        }
    }

    /// Whether the graphic is stored inside the document.
    pub fn is_embedded(&self) -> bool {
        self.stored_state.as_deref() == Some(EMBEDDED)
    }
}

/// A text container placed on a spread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextFrame {
    /// `Self` of the TextFrame element
    pub id: String,

    /// `ParentStory`
    pub parent_story_id: Option<String>,

    /// `AppliedObjectStyle`
    pub applied_object_style: Option<String>,

    /// Threaded to a previous or next frame
    pub linked: bool,

    pub auto_sizing_type: Option<String>,

    pub auto_sizing_reference_point: Option<String>,

    /// `UseNoLineBreaksForAutoSizing`
    pub use_no_line_breaks: Option<String>,

    pub text_column_count: Option<String>,

    pub text_wrap_mode: Option<String>,
}

impl TextFrame {
    /// Create a frame for a story.
    pub fn new(id: impl Into<String>, parent_story_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_story_id: Some(parent_story_id.into()),
            ..Default::default()
        }
    }

    /// Auto-sizing is on when a type other than `Off` is set.
    pub fn is_auto_size(&self) -> bool {
        matches!(self.auto_sizing_type.as_deref(), Some(t) if t != "Off")
    }

    /// `No Line Breaks` is checked.
    pub fn no_line_breaks(&self) -> bool {
        matches!(self.use_no_line_breaks.as_deref(), Some(v) if !v.is_empty() && v != "false")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_story_dedup() {
        let mut spread = Spread::new("uc4");
        spread.add_child_story("u10");
        spread.add_child_story("u11");
        spread.add_child_story("u10");
        assert_eq!(spread.child_story_ids, vec!["u10", "u11"]);
        assert!(spread.contains_story("u11"));
        assert!(!spread.contains_story("u12"));
    }

    #[test]
    fn test_auto_size_flags() {
        let mut frame = TextFrame::new("u20", "u10");
        assert!(!frame.is_auto_size());
        frame.auto_sizing_type = Some("Off".into());
        assert!(!frame.is_auto_size());
        frame.auto_sizing_type = Some("HeightOnly".into());
        assert!(frame.is_auto_size());

        assert!(!frame.no_line_breaks());
        frame.use_no_line_breaks = Some("false".into());
        assert!(!frame.no_line_breaks());
        frame.use_no_line_breaks = Some("true".into());
        assert!(frame.no_line_breaks());
    }

    #[test]
    fn test_embedded_link() {
        let mut link = Link::new("u30", "logo.png");
        assert!(!link.is_embedded());
        link.stored_state = Some(EMBEDDED.into());
        assert!(link.is_embedded());
    }
}
