//! Diagnostics, their classification, and the final report.
//!
//! Checks append [`Diagnostic`]s to a [`Diagnostics`] sink. Once all checks
//! have run, [`Report::assemble`] files them under their category and
//! identifier and [`to_json`] renders the result.

mod classifier;
mod diagnostic;
mod json;
#[allow(clippy::module_inception)]
mod report;

pub use classifier::{
    Category, Classifier, ClassifierDescriptor, ErrorKind, InfoKind, Severity, WarningKind,
};
pub use diagnostic::{Diagnostic, DiagnosticEntry, Diagnostics, NULL_ID};
pub use json::{to_json, JsonFormat};
pub use report::{
    CategorySection, DetailBuckets, FailureReport, Report, ReportCounts, TextBoxData, NO_NAME,
};
