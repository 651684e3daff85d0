//! Report assembly.

use std::collections::BTreeMap;

use serde::Serialize;

use super::classifier::{Category, ClassifierDescriptor, ErrorKind, Severity};
use super::diagnostic::{Diagnostic, DiagnosticEntry, Diagnostics};
use crate::error::StructuralFailure;
use crate::model::Document;

/// Template name used when none is known.
pub const NO_NAME: &str = "No Name";

/// Per-category totals shown in the report header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportCounts {
    /// Distinct paragraph styles applied in stories
    pub par_styles: usize,
    /// Distinct character styles applied in stories
    pub char_styles: usize,
    /// Number of stories
    pub text_boxes: usize,
    /// Used declared families plus fonts found on disk
    pub fonts: usize,
    /// Links plus pasted graphics
    pub images: usize,
}

impl ReportCounts {
    /// Total for one category; the general section has none.
    pub fn total(&self, category: Category) -> usize {
        match category {
            Category::ParStyles => self.par_styles,
            Category::CharStyles => self.char_styles,
            Category::TextBoxes => self.text_boxes,
            Category::Fonts => self.fonts,
            Category::Images => self.images,
            Category::General => 0,
        }
    }
}

/// Diagnostics of one subject, by severity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailBuckets {
    pub errors: Vec<DiagnosticEntry>,
    pub warnings: Vec<DiagnosticEntry>,
    pub infos: Vec<DiagnosticEntry>,
}

impl DetailBuckets {
    fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<DiagnosticEntry> {
        match severity {
            Severity::Error => &mut self.errors,
            Severity::Warning => &mut self.warnings,
            Severity::Info => &mut self.infos,
        }
    }

    /// Entries of one severity.
    pub fn bucket(&self, severity: Severity) -> &[DiagnosticEntry] {
        match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Info => &self.infos,
        }
    }
}

/// One report section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategorySection {
    pub details: BTreeMap<String, DetailBuckets>,
    pub total_count: usize,
}

impl CategorySection {
    /// Number of entries of one severity across all subjects.
    pub fn count(&self, severity: Severity) -> usize {
        self.details.values().map(|d| d.bucket(severity).len()).sum()
    }
}

/// Content and location of a story referenced by a text-box diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextBoxData {
    pub identifier: String,
    pub content: String,
    pub page: Option<String>,
    pub page_id: Option<String>,
}

/// Final report of a successful run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub template_name: String,
    pub output_folder: Option<String>,
    pub par_styles: CategorySection,
    pub char_styles: CategorySection,
    pub text_boxes: CategorySection,
    pub fonts: CategorySection,
    pub images: CategorySection,
    pub general: CategorySection,
    pub validation_classifiers: BTreeMap<String, ClassifierDescriptor>,
    pub text_box_data: BTreeMap<String, TextBoxData>,
}

impl Report {
    /// Build a report from accumulated diagnostics.
    ///
    /// Pure: the same inputs always produce the same report. `document` is
    /// used to look up story content for text-box diagnostics; pass `None`
    /// when the package has no stories.
    pub fn assemble(
        template_name: Option<&str>,
        output_folder: Option<&str>,
        diagnostics: &Diagnostics,
        counts: &ReportCounts,
        document: Option<&Document>,
    ) -> Self {
        let mut sections: BTreeMap<Category, CategorySection> = Category::ALL
            .iter()
            .map(|&c| {
                (
                    c,
                    CategorySection {
                        details: BTreeMap::new(),
                        total_count: counts.total(c),
                    },
                )
            })
            .collect();
        let mut classifiers = BTreeMap::new();
        let mut text_box_data = BTreeMap::new();

        for diagnostic in diagnostics.iter() {
            let category = diagnostic.category();
            let identifier = diagnostic.identifier_key();

            if category == Category::TextBoxes && !text_box_data.contains_key(identifier) {
                if let Some(data) = document.and_then(|d| text_box(d, identifier)) {
                    text_box_data.insert(identifier.to_string(), data);
                }
            }

            if let Some(section) = sections.get_mut(&category) {
                section
                    .details
                    .entry(identifier.to_string())
                    .or_default()
                    .bucket_mut(diagnostic.severity())
                    .push(diagnostic.entry());
            }

            classifiers
                .entry(diagnostic.classifier.code().to_string())
                .or_insert_with(|| diagnostic.classifier.descriptor());
        }

        let mut take = |c: Category| sections.remove(&c).unwrap_or_default();
        Self {
            template_name: template_name.unwrap_or(NO_NAME).to_string(),
            output_folder: output_folder.map(str::to_string),
            par_styles: take(Category::ParStyles),
            char_styles: take(Category::CharStyles),
            text_boxes: take(Category::TextBoxes),
            fonts: take(Category::Fonts),
            images: take(Category::Images),
            general: take(Category::General),
            validation_classifiers: classifiers,
            text_box_data,
        }
    }

    /// Section for a category.
    pub fn section(&self, category: Category) -> &CategorySection {
        match category {
            Category::ParStyles => &self.par_styles,
            Category::CharStyles => &self.char_styles,
            Category::TextBoxes => &self.text_boxes,
            Category::Fonts => &self.fonts,
            Category::Images => &self.images,
            Category::General => &self.general,
        }
    }

    /// Number of entries of one severity across all sections.
    pub fn count(&self, severity: Severity) -> usize {
        Category::ALL
            .iter()
            .map(|&c| self.section(c).count(severity))
            .sum()
    }

    /// Whether any section holds an error.
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

fn text_box(document: &Document, identifier: &str) -> Option<TextBoxData> {
    let story = document.story(identifier)?;
    Some(TextBoxData {
        identifier: identifier.to_string(),
        content: story.content(),
        page: story.page.clone(),
        page_id: story.page_id.clone(),
    })
}

/// Short report for a run that stopped on a structural failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureReport {
    pub template_name: String,
    pub output_folder: Option<String>,
    pub failure: DiagnosticEntry,
    pub validation_classifiers: BTreeMap<String, ClassifierDescriptor>,
}

impl FailureReport {
    /// Build the failure report for a structural failure.
    pub fn new(
        template_name: Option<&str>,
        output_folder: Option<&str>,
        failure: &StructuralFailure,
    ) -> Self {
        let diagnostic = Diagnostic::new(ErrorKind::Idml).with_context(failure.to_string());
        let mut validation_classifiers = BTreeMap::new();
        validation_classifiers.insert(
            diagnostic.classifier.code().to_string(),
            diagnostic.classifier.descriptor(),
        );
        Self {
            template_name: template_name.unwrap_or(NO_NAME).to_string(),
            output_folder: output_folder.map(str::to_string),
            failure: diagnostic.entry(),
            validation_classifiers,
        }
    }
}
