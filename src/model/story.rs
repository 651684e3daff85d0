//! Story types: text flows and their style runs.

use super::{ResolvedProperty, StyleKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Local formatting on a run: attribute or property name to raw value,
/// in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overrides(pub Vec<(String, String)>);

impl Overrides {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing an earlier one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl fmt::Display for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}': '{}'", name, value)?;
        }
        f.write_str("}")
    }
}

/// Paragraph properties resolved through the BasedOn cascade.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphProperties {
    pub applied_font: ResolvedProperty,
    pub hyphenation: ResolvedProperty,
    pub grid_alignment: ResolvedProperty,
    pub composer: ResolvedProperty,
    pub kerning_method: ResolvedProperty,
    pub fill_tint: ResolvedProperty,
}

impl ParagraphProperties {
    /// Hyphenation resolves to `true`.
    pub fn has_hyphenation(&self) -> bool {
        self.hyphenation.value() == Some("true")
    }
}

/// A `ParagraphStyleRange`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyleRun {
    /// `AppliedParagraphStyle`
    pub style_id: Option<String>,

    /// Style id without namespace and marker
    pub normalized_id: Option<String>,

    /// Position among the story's paragraph runs
    pub index: usize,

    pub properties: ParagraphProperties,

    pub overrides: Overrides,

    /// Child character runs, as a range into `Story::character_runs`
    pub character_runs: Range<usize>,

    /// Concatenated content of the child character runs
    pub content: String,
}

impl ParagraphStyleRun {
    /// Create a run with a style id.
    pub fn new(index: usize, style_id: Option<String>) -> Self {
        let normalized_id = style_id
            .as_deref()
            .map(|id| StyleKind::Paragraph.normalize(id).to_string());
        Self {
            style_id,
            normalized_id,
            index,
            ..Default::default()
        }
    }

    pub fn style_id(&self) -> Option<&str> {
        self.style_id.as_deref()
    }

    pub fn normalized_id(&self) -> Option<&str> {
        self.normalized_id.as_deref()
    }
}

/// A `CharacterStyleRange`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CharacterStyleRun {
    /// `AppliedCharacterStyle`
    pub style_id: Option<String>,

    pub normalized_id: Option<String>,

    /// Concatenated `Content` children
    pub content: String,

    /// `Properties/AppliedFont`
    pub applied_font: Option<String>,

    pub kerning_method: ResolvedProperty,

    pub overrides: Overrides,

    /// A `Table` element sits directly in this run
    pub has_table: bool,
}

impl CharacterStyleRun {
    /// Create a run with a style id.
    pub fn new(style_id: Option<String>) -> Self {
        let normalized_id = style_id
            .as_deref()
            .map(|id| StyleKind::Character.normalize(id).to_string());
        Self {
            style_id,
            normalized_id,
            ..Default::default()
        }
    }

    /// Set the text content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn normalized_id(&self) -> Option<&str> {
        self.normalized_id.as_deref()
    }
}

/// A text flow parsed from a `Stories/*.xml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Story {
    /// `Self` of the Story element
    pub id: String,

    pub paragraph_runs: Vec<ParagraphStyleRun>,

    pub character_runs: Vec<CharacterStyleRun>,

    /// Paragraph runs sharing a style id, merged when consecutive
    pub grouped_runs: Vec<Range<usize>>,

    /// Name of the first page of the first spread placing this story
    pub page: Option<String>,

    pub page_id: Option<String>,

    /// Frame holding this story, set once frames are cross-linked
    pub parent_text_frame_id: Option<String>,
}

impl Story {
    /// Create an empty story.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Append a paragraph run and its character runs.
    pub fn push_paragraph(
        &mut self,
        mut paragraph: ParagraphStyleRun,
        characters: Vec<CharacterStyleRun>,
    ) {
        let start = self.character_runs.len();
        paragraph.content = characters.iter().map(|c| c.content.as_str()).collect();
        self.character_runs.extend(characters);
        paragraph.character_runs = start..self.character_runs.len();
        self.paragraph_runs.push(paragraph);
    }

    /// Recompute `grouped_runs` from the paragraph runs.
    pub fn group_runs(&mut self) {
        self.grouped_runs = group_by_style(&self.paragraph_runs);
    }

    /// Character runs belonging to a paragraph run.
    pub fn characters_of(&self, paragraph: &ParagraphStyleRun) -> &[CharacterStyleRun] {
        self.character_runs
            .get(paragraph.character_runs.clone())
            .unwrap_or(&[])
    }

    /// Paragraph runs of a group.
    pub fn group(&self, range: &Range<usize>) -> &[ParagraphStyleRun] {
        self.paragraph_runs.get(range.clone()).unwrap_or(&[])
    }

    /// Content of a group, joined without separators.
    pub fn group_content(&self, range: &Range<usize>) -> String {
        self.group(range)
            .iter()
            .map(|p| p.content.as_str())
            .collect()
    }

    /// All character content, joined without separators.
    pub fn text_content(&self) -> String {
        self.character_runs
            .iter()
            .map(|c| c.content.as_str())
            .collect()
    }

    /// Paragraph contents, each followed by a newline.
    pub fn content(&self) -> String {
        self.paragraph_runs
            .iter()
            .map(|p| format!("{}\n", p.content))
            .collect()
    }

    /// Whether there is nothing but a lone space (or nothing at all).
    pub fn is_empty_text(&self) -> bool {
        let text = self.text_content();
        text.is_empty() || text == " "
    }
}

/// Group consecutive paragraph runs that share a style id.
pub fn group_by_style(runs: &[ParagraphStyleRun]) -> Vec<Range<usize>> {
    let mut groups: Vec<Range<usize>> = Vec::new();
    for (i, run) in runs.iter().enumerate() {
        match groups.last_mut() {
            Some(last) if runs[last.start].style_id == run.style_id => last.end = i + 1,
            _ => groups.push(i..i + 1),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(i: usize, style: &str) -> ParagraphStyleRun {
        ParagraphStyleRun::new(i, Some(format!("ParagraphStyle/{}", style)))
    }

    #[test]
    fn test_grouping_merges_consecutive() {
        let runs = vec![para(0, "A"), para(1, "A"), para(2, "B")];
        assert_eq!(group_by_style(&runs), vec![0..2, 2..3]);

        let runs = vec![para(0, "A"), para(1, "B"), para(2, "A")];
        assert_eq!(group_by_style(&runs), vec![0..1, 1..2, 2..3]);

        assert!(group_by_style(&[]).is_empty());
    }

    #[test]
    fn test_push_paragraph_content_and_ranges() {
        let mut story = Story::new("u10");
        story.push_paragraph(
            para(0, "Body"),
            vec![
                CharacterStyleRun::new(None).with_content("Hello "),
                CharacterStyleRun::new(None).with_content("world"),
            ],
        );
        story.push_paragraph(
            para(1, "Body"),
            vec![CharacterStyleRun::new(None).with_content("Again")],
        );
        story.group_runs();

        assert_eq!(story.paragraph_runs[0].content, "Hello world");
        assert_eq!(story.characters_of(&story.paragraph_runs[1]).len(), 1);
        assert_eq!(story.text_content(), "Hello worldAgain");
        assert_eq!(story.content(), "Hello world\nAgain\n");
        assert_eq!(story.grouped_runs, vec![0..2]);
        assert_eq!(story.group_content(&story.grouped_runs[0]), "Hello worldAgain");
    }

    #[test]
    fn test_empty_text() {
        let mut story = Story::new("u11");
        assert!(story.is_empty_text());
        story.push_paragraph(para(0, "Body"), vec![CharacterStyleRun::new(None).with_content(" ")]);
        assert!(story.is_empty_text());
    }

    #[test]
    fn test_normalized_ids() {
        let p = ParagraphStyleRun::new(0, Some("ParagraphStyle/$ID/NormalParagraphStyle".into()));
        assert_eq!(p.normalized_id(), Some("NormalParagraphStyle"));
        let c = CharacterStyleRun::new(Some("CharacterStyle/Emphasis".into()));
        assert_eq!(c.normalized_id(), Some("Emphasis"));
    }

    #[test]
    fn test_overrides_display_and_replace() {
        let mut overrides = Overrides::new();
        overrides.insert("PointSize", "12");
        overrides.insert("FontStyle", "Bold");
        overrides.insert("PointSize", "14");
        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("PointSize"), Some("14"));
        assert_eq!(overrides.to_string(), "{'PointSize': '14', 'FontStyle': 'Bold'}");
    }
}
