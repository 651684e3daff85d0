//! Document-wide rules.

use super::context::CheckContext;
use crate::report::{Diagnostic, Diagnostics, ErrorKind, WarningKind};

/// Master spreads may only hold `Properties` and `Page` elements.
pub fn masterpage(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    let master_spreads = &ctx.document.master_spreads;
    if !master_spreads.present {
        sink.add(
            Diagnostic::new(WarningKind::Warning)
                .with_context("MasterSpreads directory does not exist"),
        );
        return;
    }
    if master_spreads.unexpected_elements.is_empty() {
        return;
    }
    let context = format!(
        "Elements: {}",
        master_spreads.unexpected_elements.join(", ")
    );
    sink.add(Diagnostic::new(ErrorKind::Masterpage).with_context(context));
}

/// One warning when any bleed offset is set.
pub fn document_bleed(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    let Some(bleed) = &ctx.document.bleed else {
        return;
    };
    if !bleed.is_applied() {
        return;
    }
    let offsets: Vec<String> = bleed
        .offsets()
        .iter()
        .map(|(label, value)| format!("{}: {}pt", label, value.unwrap_or("0")))
        .collect();
    sink.add(
        Diagnostic::new(WarningKind::DocumentBleed).with_context(format!("{}.", offsets.join(", "))),
    );
}

/// Files the builder had to drop, one generic error each.
pub(crate) fn skipped_artifacts(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for skipped in &ctx.document.skipped {
        let name = skipped
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| skipped.path.display().to_string());
        sink.add(
            Diagnostic::new(ErrorKind::Error)
                .with_context(format!("{} could not be read: {}", name, skipped.reason)),
        );
    }
}
