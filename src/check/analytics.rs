//! Header totals for the report.

use std::collections::BTreeSet;

use super::context::CheckContext;
use crate::report::ReportCounts;

/// Count distinct styles, stories, fonts and images.
///
/// Style and story totals stay zero when the package has no stories.
pub fn results_analytics(ctx: &CheckContext<'_>) -> ReportCounts {
    let document = ctx.document;
    let stories = ctx.stories();

    let par_styles: BTreeSet<Option<&str>> = stories
        .iter()
        .flat_map(|s| s.paragraph_runs.iter())
        .map(|p| p.normalized_id())
        .collect();
    let char_styles: BTreeSet<Option<&str>> = stories
        .iter()
        .flat_map(|s| s.character_runs.iter())
        .map(|c| c.normalized_id())
        .collect();

    let images = document
        .spreads
        .iter()
        .map(|s| s.links.len() + s.pasted_graphics)
        .sum();

    ReportCounts {
        par_styles: par_styles.len(),
        char_styles: char_styles.len(),
        text_boxes: stories.len(),
        fonts: document.fonts.used_count() + document.assets.fonts.len(),
        images,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::RuleOptions;
    use crate::model::{
        CharacterStyleRun, DeclaredFontFamily, Document, FontRegistry, Link, ParagraphStyleRun,
        Spread, Story,
    };

    fn document() -> Document {
        let mut document = Document::new();
        document.stories_exist = true;

        let mut story = Story::new("u10");
        for (i, style) in ["Body", "Body", "Heading"].iter().enumerate() {
            story.push_paragraph(
                ParagraphStyleRun::new(i, Some(format!("ParagraphStyle/{}", style))),
                vec![CharacterStyleRun::new(Some("CharacterStyle/$ID/[No character style]".into()))],
            );
        }
        document.add_story(story);
        document.add_story(Story::new("u11"));

        let mut fonts = FontRegistry::new(vec![DeclaredFontFamily::new("Minion Pro")]);
        fonts.mark_used("Minion Pro");
        document.fonts = fonts;

        let mut spread = Spread::new("uc1");
        spread.links.push(Link::new("u30", "a.png"));
        spread.links.push(Link::new("u31", "b.png"));
        spread.pasted_graphics = 1;
        document.spreads.push(spread);
        document
    }

    #[test]
    fn test_counts() {
        let document = document();
        let options = RuleOptions::default();
        let counts = results_analytics(&CheckContext::new(&document, &options));
        assert_eq!(counts.par_styles, 2);
        assert_eq!(counts.char_styles, 1);
        assert_eq!(counts.text_boxes, 2);
        assert_eq!(counts.fonts, 1);
        assert_eq!(counts.images, 3);
    }

    #[test]
    fn test_counts_without_stories() {
        let mut document = document();
        document.stories_exist = false;
        let options = RuleOptions::default();
        let counts = results_analytics(&CheckContext::new(&document, &options));
        assert_eq!(counts.par_styles, 0);
        assert_eq!(counts.text_boxes, 0);
        assert_eq!(counts.images, 3);
    }
}
