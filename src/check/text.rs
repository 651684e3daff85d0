//! Rules over stories and their style runs.

use std::collections::HashSet;

use super::context::{at_story, whitespace_context, CheckContext};
use crate::model::{ParagraphStyleRun, ResolvedProperty};
use crate::report::{Diagnostic, Diagnostics, ErrorKind, InfoKind, WarningKind};

/// Paragraph styles InDesign applies when the designer picked none.
pub const DEFAULT_PARAGRAPH_STYLES: [&str; 2] = [
    "ParagraphStyle/$ID/NormalParagraphStyle",
    "ParagraphStyle/$ID/[No paragraph style]",
];

fn is_default_style(style_id: Option<&str>) -> bool {
    style_id.is_some_and(|id| DEFAULT_PARAGRAPH_STYLES.contains(&id))
}

/// Text set in a default paragraph style.
///
/// Empty stories get an info and are otherwise skipped. A story made of a
/// single default-style group is reported once as a whole; otherwise each
/// default-style group is reported with its text.
pub fn paragraph_style(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for story in ctx.stories() {
        if story.is_empty_text() {
            sink.add(at_story(Diagnostic::new(InfoKind::EmptyTextFrame), story));
            continue;
        }

        let groups = &story.grouped_runs;
        let first_style = |range: &std::ops::Range<usize>| {
            story.group(range).first().and_then(ParagraphStyleRun::style_id)
        };

        if groups.len() == 1 && is_default_style(first_style(&groups[0])) {
            sink.add(at_story(Diagnostic::new(ErrorKind::ParagraphStyleTextBox), story));
            continue;
        }

        let contents: Vec<String> = groups.iter().map(|g| story.group_content(g)).collect();
        for (i, group) in groups.iter().enumerate() {
            if !is_default_style(first_style(group)) {
                continue;
            }
            let context = format!("{} {}", contents[i], whitespace_context(&contents, i));
            sink.add(at_story(
                Diagnostic::new(ErrorKind::ParagraphStyle).with_context(context),
                story,
            ));
        }
    }
}

/// Hyphenation enabled, once per paragraph style.
pub fn hyphenation(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    let mut processed: HashSet<Option<&str>> = HashSet::new();
    for story in ctx.stories() {
        for paragraph in &story.paragraph_runs {
            let style_id = paragraph.style_id();
            if is_default_style(style_id) || !paragraph.properties.has_hyphenation() {
                continue;
            }
            if !processed.insert(style_id) {
                continue;
            }
            sink.add(
                Diagnostic::new(WarningKind::Hyphenation)
                    .with_context(paragraph.properties.hyphenation.inherited_note())
                    .with_identifier(paragraph.normalized_id().unwrap_or_default())
                    .with_data_id(story.parent_text_frame_id.as_deref()),
            );
        }
    }
}

/// Local formatting on paragraph and character runs.
pub fn overrides(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for story in ctx.stories() {
        let paragraph_contents: Vec<&str> = story
            .paragraph_runs
            .iter()
            .map(|p| p.content.as_str())
            .collect();

        for (i, paragraph) in story.paragraph_runs.iter().enumerate() {
            if !paragraph.overrides.is_empty() && !is_default_style(paragraph.style_id()) {
                let context = format!(
                    "1. Text where issue is:  {} {} 2. Overrides: {}",
                    paragraph.content,
                    whitespace_context(&paragraph_contents, i),
                    paragraph.overrides
                );
                sink.add(at_story(
                    Diagnostic::new(WarningKind::Override).with_context(context),
                    story,
                ));
            }

            let characters = story.characters_of(paragraph);
            let character_contents: Vec<&str> =
                characters.iter().map(|c| c.content.as_str()).collect();
            for (j, character) in characters.iter().enumerate() {
                if character.overrides.is_empty() {
                    continue;
                }
                let context = format!(
                    "1. Text where issue is: {} {} 2. Overrides: {}",
                    character.content,
                    whitespace_context(&character_contents, j),
                    character.overrides
                );
                sink.add(at_story(
                    Diagnostic::new(WarningKind::Override).with_context(context),
                    story,
                ));
            }
        }
    }
}

fn is_non_metrics(kerning: &ResolvedProperty) -> bool {
    matches!(kerning.value(), Some(v) if !v.is_empty() && v != "Metrics")
}

/// Kerning method other than `Metrics`, on paragraph and character runs.
pub fn kerning(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for story in ctx.stories() {
        let page = story.page.as_deref();
        let page_id = story.page_id.as_deref();
        let frame = story.parent_text_frame_id.as_deref();

        for paragraph in &story.paragraph_runs {
            let kerning = &paragraph.properties.kerning_method;
            if is_non_metrics(kerning) {
                sink.add(
                    Diagnostic::new(ErrorKind::Kerning)
                        .with_context(kerning.inherited_note())
                        .with_identifier(paragraph.normalized_id().unwrap_or_default())
                        .with_page(page, page_id)
                        .with_data_id(frame),
                );
            }

            for character in story.characters_of(paragraph) {
                if is_non_metrics(&character.kerning_method) {
                    sink.add(
                        Diagnostic::new(ErrorKind::KerningChar)
                            .with_context(character.kerning_method.inherited_note())
                            .with_identifier(character.normalized_id().unwrap_or_default())
                            .with_page(page, page_id)
                            .with_data_id(frame),
                    );
                }
            }
        }
    }
}

/// Tables inside text.
pub fn table(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for story in ctx.stories() {
        for _ in story.character_runs.iter().filter(|c| c.has_table) {
            sink.add(at_story(Diagnostic::new(ErrorKind::Table), story));
        }
    }
}

/// Report a resolved paragraph property once per normalized style id.
fn per_paragraph_style<F>(ctx: &CheckContext<'_>, sink: &mut Diagnostics, mut flag: F)
where
    F: FnMut(&ParagraphStyleRun) -> Option<Diagnostic>,
{
    let mut flagged: HashSet<Option<&str>> = HashSet::new();
    for story in ctx.stories() {
        for paragraph in &story.paragraph_runs {
            if flagged.contains(&paragraph.normalized_id()) {
                continue;
            }
            if let Some(diagnostic) = flag(paragraph) {
                flagged.insert(paragraph.normalized_id());
                sink.add(
                    diagnostic
                        .with_identifier(paragraph.normalized_id().unwrap_or_default())
                        .with_data_id(story.parent_text_frame_id.as_deref()),
                );
            }
        }
    }
}

/// Grid alignment other than `None`.
pub fn grid_alignment(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    per_paragraph_style(ctx, sink, |paragraph| {
        let grid = &paragraph.properties.grid_alignment;
        match grid.value() {
            Some(v) if v != "None" => {
                Some(Diagnostic::new(ErrorKind::GridAlignment).with_context(grid.inherited_note()))
            }
            _ => None,
        }
    });
}

/// Composer other than the single-line composer.
pub fn composer(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    per_paragraph_style(ctx, sink, |paragraph| {
        let composer = &paragraph.properties.composer;
        match composer.value() {
            Some(v) if v != "HL Single" => {
                Some(Diagnostic::new(WarningKind::Composer).with_context(composer.inherited_note()))
            }
            _ => None,
        }
    });
}

/// Fill tint other than 100 %.
pub fn fill_tint(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    per_paragraph_style(ctx, sink, |paragraph| {
        let tint = &paragraph.properties.fill_tint;
        let value = tint.value()?;
        if value == "-1" || value == "100" {
            return None;
        }
        let mut context = format!("Fill Tint is: {}", value);
        if let Some(parent) = &tint.inherited_from {
            context.push_str(&format!("; Inherited from: {}", parent));
        }
        Some(Diagnostic::new(ErrorKind::FillTint).with_context(context))
    });
}
