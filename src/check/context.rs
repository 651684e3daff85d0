//! Shared inputs and helpers for the rules.

use super::RuleOptions;
use crate::model::{Document, Spread, Story, TextFrame};
use crate::report::Diagnostic;

/// What every rule reads: the built document and the rule options.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    pub document: &'a Document,
    pub options: &'a RuleOptions,
}

impl<'a> CheckContext<'a> {
    /// Create a context.
    pub fn new(document: &'a Document, options: &'a RuleOptions) -> Self {
        Self { document, options }
    }

    /// Stories to check, empty when the package has no `Stories` folder.
    pub fn stories(&self) -> &'a [Story] {
        if self.document.stories_exist {
            &self.document.stories
        } else {
            &[]
        }
    }

    /// Text frames with their spread and story, empty without stories.
    pub fn story_frames(&self) -> impl Iterator<Item = (&'a Spread, &'a TextFrame, Option<&'a Story>)> {
        let document = self.document;
        let frames = if document.stories_exist {
            Some(document.text_frames())
        } else {
            None
        };
        frames
            .into_iter()
            .flatten()
            .map(move |(spread, frame)| (spread, frame, document.story_for_frame(frame)))
    }
}

/// Diagnostic located at a story: page of the story, the story id as
/// identifier and its frame as data id.
pub(crate) fn at_story(diagnostic: Diagnostic, story: &Story) -> Diagnostic {
    diagnostic
        .with_identifier(story.id.as_str())
        .with_page(story.page.as_deref(), story.page_id.as_deref())
        .with_data_id(story.parent_text_frame_id.as_deref())
}

/// Diagnostic located at a text frame, through the story it shows.
pub(crate) fn at_frame(diagnostic: Diagnostic, frame: &TextFrame, story: Option<&Story>) -> Diagnostic {
    let diagnostic = match story {
        Some(story) => diagnostic
            .with_identifier(story.id.as_str())
            .with_page(story.page.as_deref(), story.page_id.as_deref()),
        None => diagnostic,
    };
    diagnostic.with_data_id(Some(&frame.id))
}

/// Diagnostic located on a spread's first page.
pub(crate) fn on_spread(diagnostic: Diagnostic, spread: &Spread) -> Diagnostic {
    diagnostic.with_page(spread.page_name.as_deref(), spread.page_id.as_deref())
}

/// Hint for content that is only whitespace: the neighbouring text.
///
/// Returns an empty string when `contents[index]` has visible text.
pub(crate) fn whitespace_context<S: AsRef<str>>(contents: &[S], index: usize) -> String {
    let Some(current) = contents.get(index) else {
        return String::new();
    };
    if !current.as_ref().trim().is_empty() {
        return String::new();
    }

    let neighbour = |i: Option<usize>| {
        i.and_then(|i| contents.get(i))
            .map(|c| c.as_ref().trim())
            .unwrap_or_default()
    };
    let prev = neighbour(index.checked_sub(1));
    let next = neighbour(index.checked_add(1));

    if !prev.is_empty() {
        format!("Whitespace after text: {}", prev)
    } else if !next.is_empty() {
        format!("Whitespace before text: {}", next)
    } else {
        "Whitespace".to_string()
    }
}

/// Format a float the way report consumers expect: integral values keep
/// one decimal (`12.0`), others use the shortest exact form (`11.29`).
pub(crate) fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
