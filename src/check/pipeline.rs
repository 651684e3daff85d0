//! The validation state machine.

use std::fmt;

use super::context::CheckContext;
use super::{analytics, fonts, frames, general, images, text, RuleOptions};
use crate::model::Document;
use crate::report::{Diagnostics, ReportCounts};

/// A rule: reads the document, appends diagnostics.
pub type CheckFn = fn(&CheckContext<'_>, &mut Diagnostics);

/// States of a run, in their fixed order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Unpack,
    BuildModel,
    Masterpage,
    ParagraphStyle,
    Hyphenation,
    Overrides,
    Kerning,
    FontsIncluded,
    OtfTtfFont,
    VariableFont,
    ImagesIncluded,
    LargeImage,
    EmbeddedImage,
    ImageTransformation,
    Table,
    PastedGraphics,
    DocumentBleed,
    AutoSizeTextBox,
    TextColumns,
    TextWrap,
    LinkedTextFrame,
    ObjectStyle,
    GridAlignment,
    Composer,
    FillTint,
    ResultsAnalytics,
    Exit,
}

impl State {
    /// The rule states, in run order.
    pub const CHECKS: [State; 23] = [
        State::Masterpage,
        State::ParagraphStyle,
        State::Hyphenation,
        State::Overrides,
        State::Kerning,
        State::FontsIncluded,
        State::OtfTtfFont,
        State::VariableFont,
        State::ImagesIncluded,
        State::LargeImage,
        State::EmbeddedImage,
        State::ImageTransformation,
        State::Table,
        State::PastedGraphics,
        State::DocumentBleed,
        State::AutoSizeTextBox,
        State::TextColumns,
        State::TextWrap,
        State::LinkedTextFrame,
        State::ObjectStyle,
        State::GridAlignment,
        State::Composer,
        State::FillTint,
    ];

    /// The state that always follows this one.
    pub fn next(self) -> State {
        match self {
            State::Unpack => State::BuildModel,
            State::BuildModel => State::Masterpage,
            State::Masterpage => State::ParagraphStyle,
            State::ParagraphStyle => State::Hyphenation,
            State::Hyphenation => State::Overrides,
            State::Overrides => State::Kerning,
            State::Kerning => State::FontsIncluded,
            State::FontsIncluded => State::OtfTtfFont,
            State::OtfTtfFont => State::VariableFont,
            State::VariableFont => State::ImagesIncluded,
            State::ImagesIncluded => State::LargeImage,
            State::LargeImage => State::EmbeddedImage,
            State::EmbeddedImage => State::ImageTransformation,
            State::ImageTransformation => State::Table,
            State::Table => State::PastedGraphics,
            State::PastedGraphics => State::DocumentBleed,
            State::DocumentBleed => State::AutoSizeTextBox,
            State::AutoSizeTextBox => State::TextColumns,
            State::TextColumns => State::TextWrap,
            State::TextWrap => State::LinkedTextFrame,
            State::LinkedTextFrame => State::ObjectStyle,
            State::ObjectStyle => State::GridAlignment,
            State::GridAlignment => State::Composer,
            State::Composer => State::FillTint,
            State::FillTint => State::ResultsAnalytics,
            State::ResultsAnalytics | State::Exit => State::Exit,
        }
    }

    /// The rule run in this state, if it is a rule state.
    pub fn check(self) -> Option<CheckFn> {
        let check: CheckFn = match self {
            State::Masterpage => general::masterpage,
            State::ParagraphStyle => text::paragraph_style,
            State::Hyphenation => text::hyphenation,
            State::Overrides => text::overrides,
            State::Kerning => text::kerning,
            State::FontsIncluded => fonts::fonts_included,
            State::OtfTtfFont => fonts::otf_ttf_font,
            State::VariableFont => fonts::variable_font,
            State::ImagesIncluded => images::images_included,
            State::LargeImage => images::large_image,
            State::EmbeddedImage => images::embedded_image,
            State::ImageTransformation => images::image_transformation,
            State::Table => text::table,
            State::PastedGraphics => images::pasted_graphics,
            State::DocumentBleed => general::document_bleed,
            State::AutoSizeTextBox => frames::auto_size_text_box,
            State::TextColumns => frames::text_columns,
            State::TextWrap => frames::text_wrap,
            State::LinkedTextFrame => frames::linked_text_frame,
            State::ObjectStyle => frames::object_style,
            State::GridAlignment => text::grid_alignment,
            State::Composer => text::composer,
            State::FillTint => text::fill_tint,
            State::Unpack | State::BuildModel | State::ResultsAnalytics | State::Exit => {
                return None
            }
        };
        Some(check)
    }

    /// Upper snake case name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            State::Unpack => "UNPACK",
            State::BuildModel => "BUILD_MODEL",
            State::Masterpage => "MASTERPAGE_CHECK",
            State::ParagraphStyle => "PAR_CHECK",
            State::Hyphenation => "HYPHENATION_CHECK",
            State::Overrides => "OVERRIDES_CHECK",
            State::Kerning => "KERNING_CHECK",
            State::FontsIncluded => "FONTS_INCLUDED_CHECK",
            State::OtfTtfFont => "OTF_TTF_FONT_CHECK",
            State::VariableFont => "VARIABLE_FONT_CHECK",
            State::ImagesIncluded => "IMAGES_INCLUDED_CHECK",
            State::LargeImage => "LARGE_IMAGE_CHECK",
            State::EmbeddedImage => "EMBEDDED_IMAGE_CHECK",
            State::ImageTransformation => "IMAGE_TRANSFORMATION_CHECK",
            State::Table => "TABLE_CHECK",
            State::PastedGraphics => "PASTED_GRAPHICS_CHECK",
            State::DocumentBleed => "DOCUMENT_BLEED_CHECK",
            State::AutoSizeTextBox => "AUTO_SIZE_TEXT_BOX_CHECK",
            State::TextColumns => "TEXT_COLUMNS_CHECK",
            State::TextWrap => "TEXT_WRAP_CHECK",
            State::LinkedTextFrame => "LINKED_TEXT_FRAME_CHECK",
            State::ObjectStyle => "OBJECT_STYLE_CHECK",
            State::GridAlignment => "GRID_ALIGNMENT_CHECK",
            State::Composer => "COMPOSER_CHECK",
            State::FillTint => "FILL_TINT_CHECK",
            State::ResultsAnalytics => "RESULTS",
            State::Exit => "EXIT",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a finished pipeline produced.
#[derive(Debug, Clone, Default)]
pub struct CheckOutcome {
    pub diagnostics: Diagnostics,
    pub counts: ReportCounts,
    /// States visited, from the first rule to `Exit`
    pub trace: Vec<State>,
}

/// Drives a built document through the rule states.
pub struct Pipeline<'a> {
    context: CheckContext<'a>,
    state: State,
    diagnostics: Diagnostics,
    counts: ReportCounts,
    trace: Vec<State>,
}

impl<'a> Pipeline<'a> {
    /// Start a pipeline right after the model was built.
    ///
    /// Artifacts the builder skipped are reported before the first rule.
    pub fn new(document: &'a Document, options: &'a RuleOptions) -> Self {
        let context = CheckContext::new(document, options);
        let mut diagnostics = Diagnostics::new();
        general::skipped_artifacts(&context, &mut diagnostics);
        Self {
            context,
            state: State::BuildModel.next(),
            diagnostics,
            counts: ReportCounts::default(),
            trace: Vec::new(),
        }
    }

    /// Current state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Run the current state and advance. Returns the new state.
    pub fn step(&mut self) -> State {
        let current = self.state;
        self.trace.push(current);

        if let Some(check) = current.check() {
            let before = self.diagnostics.len();
            check(&self.context, &mut self.diagnostics);
            log::debug!(
                "{} -> {} ({} diagnostics)",
                current,
                current.next(),
                self.diagnostics.len() - before
            );
        } else if current == State::ResultsAnalytics {
            self.counts = analytics::results_analytics(&self.context);
            log::debug!("{} -> {}", current, current.next());
        }

        self.state = current.next();
        self.state
    }

    /// Run every remaining state up to `Exit`.
    pub fn run(mut self) -> CheckOutcome {
        while self.state != State::Exit {
            self.step();
        }
        self.trace.push(State::Exit);
        CheckOutcome {
            diagnostics: self.diagnostics,
            counts: self.counts,
            trace: self.trace,
        }
    }
}

/// Run all rules and the analytics over a document.
pub fn run_checks(document: &Document, options: &RuleOptions) -> CheckOutcome {
    Pipeline::new(document, options).run()
}
