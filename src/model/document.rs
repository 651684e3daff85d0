//! Document-level types.

use super::{FontRegistry, Link, SourceAssets, Spread, Story, StyleSheets, TextFrame};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// A fully cross-referenced IDML package.
///
/// Built once per run by [`PackageParser`](crate::parser::PackageParser) and
/// read-only afterwards. Entities live in plain vectors; relations between
/// them are id-keyed tables filled in after both sides exist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Declared and used font families
    pub fonts: FontRegistry,

    /// Spreads in file-name order
    pub spreads: Vec<Spread>,

    /// Paragraph and character style trees
    pub styles: StyleSheets,

    /// Stories in file-name order
    pub stories: Vec<Story>,

    /// Whether the package has a `Stories` directory
    pub stories_exist: bool,

    /// Master spread findings
    pub master_spreads: MasterSpreads,

    /// Bleed from `Preferences.xml`
    pub bleed: Option<DocumentBleed>,

    /// Images and fonts shipped alongside the XML
    pub assets: SourceAssets,

    /// Per-file artifacts dropped while building
    pub skipped: Vec<SkippedArtifact>,

    story_index: HashMap<String, usize>,
    frame_story: HashMap<String, usize>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a story and index it by id.
    pub fn add_story(&mut self, story: Story) {
        self.story_index.insert(story.id.clone(), self.stories.len());
        self.stories.push(story);
    }

    /// Get a story by id.
    pub fn story(&self, id: &str) -> Option<&Story> {
        self.story_index.get(id).and_then(|&i| self.stories.get(i))
    }

    /// Story shown in a text frame.
    pub fn story_for_frame(&self, frame: &TextFrame) -> Option<&Story> {
        self.frame_story
            .get(&frame.id)
            .and_then(|&i| self.stories.get(i))
    }

    /// Check if there are stories to validate.
    pub fn has_stories(&self) -> bool {
        self.stories_exist && !self.stories.is_empty()
    }

    /// Place stories on pages: each story takes the first page of the first
    /// spread listing it as a child story.
    pub fn assign_story_pages(&mut self) {
        for story in &mut self.stories {
            if let Some(spread) = self.spreads.iter().find(|s| s.contains_story(&story.id)) {
                story.page = spread.page_name.clone();
                story.page_id = spread.page_id.clone();
            }
        }
    }

    /// Resolve each text frame's parent story and record the frame on it.
    ///
    /// Returns the number of frames whose story could not be found.
    pub fn link_frames_to_stories(&mut self) -> usize {
        let mut unresolved = 0;
        for spread in &self.spreads {
            for frame in &spread.text_frames {
                let index = frame
                    .parent_story_id
                    .as_deref()
                    .and_then(|id| self.story_index.get(id).copied());
                match index {
                    Some(i) => {
                        self.frame_story.insert(frame.id.clone(), i);
                        if let Some(story) = self.stories.get_mut(i) {
                            story.parent_text_frame_id = Some(frame.id.clone());
                        }
                    }
                    None => unresolved += 1,
                }
            }
        }
        unresolved
    }

    /// Record on each source image the rectangle of the spread link using it.
    pub fn link_images_to_links(&mut self) {
        let by_name: HashMap<&str, &Link> = self
            .spreads
            .iter()
            .flat_map(|s| s.links.iter())
            .map(|l| (l.image_name.as_str(), l))
            .collect();

        for image in &mut self.assets.images {
            if let Some(link) = by_name.get(image.name.as_str()) {
                image.parent_link_data_id = link.rectangle_id.clone();
            }
        }
    }

    /// All links on regular spreads, with the spread holding them.
    pub fn spread_links(&self) -> impl Iterator<Item = (&Spread, &Link)> {
        self.spreads
            .iter()
            .flat_map(|s| s.links.iter().map(move |l| (s, l)))
    }

    /// All text frames, with the spread holding them.
    pub fn text_frames(&self) -> impl Iterator<Item = (&Spread, &TextFrame)> {
        self.spreads
            .iter()
            .flat_map(|s| s.text_frames.iter().map(move |f| (s, f)))
    }
}

/// Findings from `MasterSpreads/*.xml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterSpreads {
    /// Whether the directory exists at all
    pub present: bool,

    /// Tag names of master spread children other than Properties and Page
    pub unexpected_elements: Vec<String>,

    /// Links placed on master spreads
    pub links: Vec<Link>,
}

/// Document bleed offsets as written in `DocumentPreference`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBleed {
    pub top: Option<String>,
    pub bottom: Option<String>,
    pub inside: Option<String>,
    pub outside: Option<String>,
}

impl DocumentBleed {
    /// Offsets in report order, with their labels.
    pub fn offsets(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("top", self.top.as_deref()),
            ("bottom", self.bottom.as_deref()),
            ("inside", self.inside.as_deref()),
            ("outside", self.outside.as_deref()),
        ]
    }

    /// Whether any offset is set to something other than zero.
    pub fn is_applied(&self) -> bool {
        self.offsets()
            .iter()
            .any(|(_, v)| matches!(v, Some(v) if *v != "0"))
    }
}

/// A per-file artifact that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedArtifact {
    pub path: PathBuf,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Image;

    fn document() -> Document {
        let mut doc = Document::new();
        doc.stories_exist = true;

        let mut spread = Spread::new("uc1").with_page("ud1", "1");
        spread.add_child_story("u10");
        spread.text_frames.push(TextFrame::new("u20", "u10"));
        spread.text_frames.push(TextFrame::new("u21", "u99"));
        let mut link = Link::new("u30", "photo.jpg");
        link.rectangle_id = Some("u31".into());
        spread.links.push(link);
        doc.spreads.push(spread);

        doc.add_story(Story::new("u10"));
        doc.add_story(Story::new("u11"));
        doc.assets
            .images
            .push(Image::new("photo.jpg", "/tmp/photo.jpg", 100));
        doc
    }

    #[test]
    fn test_cross_references() {
        let mut doc = document();
        doc.assign_story_pages();
        assert_eq!(doc.link_frames_to_stories(), 1);
        doc.link_images_to_links();

        let story = doc.story("u10").unwrap();
        assert_eq!(story.page.as_deref(), Some("1"));
        assert_eq!(story.page_id.as_deref(), Some("ud1"));
        assert_eq!(story.parent_text_frame_id.as_deref(), Some("u20"));
        assert!(doc.story("u11").unwrap().page.is_none());

        let frame = &doc.spreads[0].text_frames[0];
        assert_eq!(doc.story_for_frame(frame).map(|s| s.id.as_str()), Some("u10"));
        assert!(doc.story_for_frame(&doc.spreads[0].text_frames[1]).is_none());

        assert_eq!(
            doc.assets.images[0].parent_link_data_id.as_deref(),
            Some("u31")
        );
    }

    #[test]
    fn test_has_stories() {
        let mut doc = Document::new();
        assert!(!doc.has_stories());
        doc.stories_exist = true;
        assert!(!doc.has_stories());
        doc.add_story(Story::new("u1"));
        assert!(doc.has_stories());
    }

    #[test]
    fn test_bleed_applied() {
        let mut bleed = DocumentBleed {
            top: Some("0".into()),
            bottom: Some("0".into()),
            inside: None,
            outside: Some("0".into()),
        };
        assert!(!bleed.is_applied());
        bleed.inside = Some("3".into());
        assert!(bleed.is_applied());
    }
}
