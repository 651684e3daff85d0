//! Font rules.

use super::context::CheckContext;
use crate::model::FontFamily;
use crate::report::{Diagnostic, Diagnostics, ErrorKind};

const SUPPORTED_FONT_EXTENSIONS: [&str; 2] = [".otf", ".ttf"];

/// Used families must ship in `Document Fonts`. Variable families are
/// reported by [`variable_font`] instead.
pub fn fonts_included(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    let assets = &ctx.document.assets;
    for family in ctx.document.fonts.used() {
        if family.is_variable() || assets.has_font_family(family.family_name()) {
            continue;
        }
        sink.add(Diagnostic::new(ErrorKind::FontsIncluded).with_identifier(family.family_name()));
    }
}

/// Shipped font files must be OpenType or TrueType.
pub fn otf_ttf_font(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for font in &ctx.document.assets.fonts {
        let extension = font.extension.to_lowercase();
        if SUPPORTED_FONT_EXTENSIONS.contains(&extension.as_str()) {
            continue;
        }
        sink.add(
            Diagnostic::new(ErrorKind::OtfTtfFont)
                .with_context(format!("Font is {}", font.extension))
                .with_identifier(font.family_name.as_str()),
        );
    }
}

/// Used families flagged variable in the manifest.
pub fn variable_font(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for family in ctx.document.fonts.used().filter(|f| f.is_variable()) {
        sink.add(Diagnostic::new(ErrorKind::VariableFont).with_identifier(family.family_name()));
    }
}
