//! Text frame and object style rules.

use super::context::{at_frame, on_spread, CheckContext};
use crate::report::{Diagnostic, Diagnostics, ErrorKind};

/// Object styles that count as "no object style".
pub const DEFAULT_OBJECT_STYLES: [&str; 3] = [
    "ObjectStyle/$ID/[None]",
    "ObjectStyle/$ID/[Normal Graphics Frame]",
    "ObjectStyle/$ID/[Normal Text Frame]",
];

const HEIGHT_ONLY_POINTS: [&str; 2] = ["TopCenterPoint", "BottomCenterPoint"];
const WIDTH_ONLY_POINTS: [&str; 2] = ["LeftCenterPoint", "RightCenterPoint"];
const CORNER_POINTS: [&str; 4] = [
    "TopLeftPoint",
    "BottomLeftPoint",
    "BottomRightPoint",
    "TopRightPoint",
];

fn has_custom_object_style(style: Option<&str>) -> bool {
    matches!(style, Some(s) if !DEFAULT_OBJECT_STYLES.contains(&s))
}

fn anchored(reference_point: Option<&str>, allowed: &[&str]) -> bool {
    reference_point.is_some_and(|p| allowed.contains(&p))
}

/// Auto-sizing problem of a frame, if any.
fn auto_size_problem(
    sizing_type: &str,
    reference_point: Option<&str>,
    no_line_breaks: bool,
) -> Option<&'static str> {
    match sizing_type {
        "HeightOnly" if !anchored(reference_point, &HEIGHT_ONLY_POINTS) => {
            Some("HeightOnly cannot autosize from center.")
        }
        "HeightOnly" => None,
        "WidthOnly" | "HeightAndWidth" if !no_line_breaks => {
            Some("'No Line Breaks' must be checked.")
        }
        "WidthOnly" if !anchored(reference_point, &WIDTH_ONLY_POINTS) => {
            Some("WidthOnly cannot autosize from center.")
        }
        "WidthOnly" => None,
        "HeightAndWidth" if !anchored(reference_point, &CORNER_POINTS) => {
            Some("HeightAndWidth must auto size from corners.")
        }
        "HeightAndWidth" => None,
        _ => Some("Only width, height, and WidthAndHeight are supported."),
    }
}

/// Auto-sizing frames must grow away from a supported anchor.
pub fn auto_size_text_box(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for (_, frame, story) in ctx.story_frames() {
        if !frame.is_auto_size() {
            continue;
        }
        let sizing_type = frame.auto_sizing_type.as_deref().unwrap_or_default();
        let problem = auto_size_problem(
            sizing_type,
            frame.auto_sizing_reference_point.as_deref(),
            frame.no_line_breaks(),
        );
        if let Some(message) = problem {
            sink.add(at_frame(
                Diagnostic::new(ErrorKind::AutoSizeTextBox).with_context(message),
                frame,
                story,
            ));
        }
    }
}

/// More than one text column.
pub fn text_columns(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for (_, frame, story) in ctx.story_frames() {
        if matches!(frame.text_column_count.as_deref(), Some(count) if count != "1") {
            sink.add(at_frame(Diagnostic::new(ErrorKind::TextColumns), frame, story));
        }
    }
}

/// Text wrap other than `None`.
pub fn text_wrap(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for (_, frame, story) in ctx.story_frames() {
        let Some(mode) = frame.text_wrap_mode.as_deref().filter(|m| *m != "None") else {
            continue;
        };
        sink.add(at_frame(
            Diagnostic::new(ErrorKind::TextWrap)
                .with_context(format!("Text box wrap is '{}' not None.", mode)),
            frame,
            story,
        ));
    }
}

/// Frames threaded to another frame.
pub fn linked_text_frame(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for (_, frame, story) in ctx.story_frames().filter(|(_, f, _)| f.linked) {
        sink.add(at_frame(Diagnostic::new(ErrorKind::LinkedTextFrame), frame, story));
    }
}

/// Custom object styles on text frames, images and image containers.
///
/// Runs whether or not the package has stories.
pub fn object_style(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    let document = ctx.document;

    for (_, frame) in document.text_frames() {
        if has_custom_object_style(frame.applied_object_style.as_deref()) {
            let story = document.story_for_frame(frame);
            sink.add(at_frame(Diagnostic::new(ErrorKind::ObjectStyleText), frame, story));
        }
    }

    for (spread, link) in document.spread_links() {
        let styles = [
            link.image_object_style.as_deref(),
            link.container_object_style.as_deref(),
        ];
        for _ in styles.into_iter().filter(|s| has_custom_object_style(*s)) {
            sink.add(on_spread(
                Diagnostic::new(ErrorKind::ObjectStyleImage)
                    .with_identifier(link.image_name.as_str())
                    .with_data_id(link.rectangle_id.as_deref()),
                spread,
            ));
        }
    }
}
