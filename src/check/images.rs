//! Image and placed-graphic rules.

use std::collections::{BTreeMap, BTreeSet};

use super::context::{format_float, on_spread, CheckContext};
use crate::model::{AffineTransform, Manipulation};
use crate::report::{Diagnostic, Diagnostics, ErrorKind, InfoKind, WarningKind};

/// Where a link that must resolve to a file was placed.
enum LinkSite<'a> {
    Spread { rectangle_id: Option<&'a str> },
    Master,
}

/// Links and images must match up, and images must not be empty.
///
/// Only non-embedded links need a file. Any link, embedded or not, marks
/// its image as used.
pub fn images_included(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    let document = ctx.document;

    let mut required: BTreeMap<&str, LinkSite<'_>> = BTreeMap::new();
    for (_, link) in document.spread_links().filter(|(_, l)| !l.is_embedded()) {
        required.insert(
            link.image_name.as_str(),
            LinkSite::Spread {
                rectangle_id: link.rectangle_id.as_deref(),
            },
        );
    }
    for link in document.master_spreads.links.iter().filter(|l| !l.is_embedded()) {
        required.insert(link.image_name.as_str(), LinkSite::Master);
    }

    let referenced: BTreeSet<&str> = document
        .spread_links()
        .map(|(_, l)| l.image_name.as_str())
        .chain(document.master_spreads.links.iter().map(|l| l.image_name.as_str()))
        .collect();

    let mut on_disk: BTreeSet<&str> = BTreeSet::new();
    for image in &document.assets.images {
        on_disk.insert(image.name.as_str());
        if image.is_zero_size() {
            sink.add(Diagnostic::new(ErrorKind::Error).with_context(format!(
                "Image '{}' has zero size. Likely a corrupted image.",
                image.name
            )));
        }
    }

    for (name, site) in required.iter().filter(|(n, _)| !on_disk.contains(*n)) {
        let diagnostic = match site {
            LinkSite::Spread { rectangle_id } => Diagnostic::new(ErrorKind::ImageIncluded)
                .with_context(format!(
                    "Link '{}' (ID: {}) is used but not found in the Links folder.",
                    name,
                    rectangle_id.unwrap_or("None")
                ))
                .with_data_id(*rectangle_id),
            LinkSite::Master => Diagnostic::new(ErrorKind::ImageIncluded).with_context(format!(
                "Link '{}' is used in a master page but not found in the Links folder.",
                name
            )),
        };
        sink.add(diagnostic.with_identifier(*name));
    }

    for name in on_disk.difference(&referenced) {
        sink.add(
            Diagnostic::new(WarningKind::UnusedImage)
                .with_context(format!(
                    "Image '{}' is present in the document but not used.",
                    name
                ))
                .with_identifier(*name),
        );
    }
}

/// Images above the configured size.
pub fn large_image(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    let threshold = ctx.options.large_image_threshold_mb;
    for image in ctx.document.assets.images.iter().filter(|i| i.size_mb > threshold) {
        sink.add(
            Diagnostic::new(InfoKind::LargeImage)
                .with_context(format!(
                    "Image {} is {}MB.",
                    image.name,
                    format_float(image.size_mb)
                ))
                .with_identifier(image.name.as_str())
                .with_data_id(image.parent_link_data_id.as_deref()),
        );
    }
}

/// Graphics stored inside the document instead of linked.
pub fn embedded_image(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for (spread, link) in ctx.document.spread_links().filter(|(_, l)| l.is_embedded()) {
        sink.add(on_spread(
            Diagnostic::new(ErrorKind::EmbeddedImage)
                .with_identifier(link.image_name.as_str())
                .with_data_id(link.rectangle_id.as_deref()),
            spread,
        ));
    }
}

/// Flips, rotations and skews of the image and of its container.
pub fn image_transformation(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for (spread, link) in ctx.document.spread_links() {
        let transforms = [
            ("Image inside Container", link.item_transform),
            ("Image Container", link.container_transform),
        ];
        for (subject, transform) in transforms {
            let Some(diagnostic) = transform.as_ref().and_then(|t| manipulation(subject, t)) else {
                continue;
            };
            sink.add(on_spread(
                diagnostic
                    .with_identifier(link.image_name.as_str())
                    .with_data_id(link.rectangle_id.as_deref()),
                spread,
            ));
        }
    }
}

fn manipulation(subject: &str, transform: &AffineTransform) -> Option<Diagnostic> {
    let diagnostic = match transform.classify()? {
        Manipulation::HorizontalFlip => Diagnostic::new(ErrorKind::ImageTransformation)
            .with_context(format!("{} has a horizontal flip transformation.", subject)),
        Manipulation::VerticalFlip => Diagnostic::new(ErrorKind::ImageTransformation)
            .with_context(format!("{} has a vertical flip transformation.", subject)),
        Manipulation::Rotation(degrees) => Diagnostic::new(WarningKind::ImageTransformation)
            .with_context(format!("{} has been rotated by {:.2} degrees.", subject, degrees)),
        Manipulation::Skew { b, c } => Diagnostic::new(ErrorKind::ImageTransformation)
            .with_context(format!(
                "{} has skew transformations. Skew factors: b={}, c={}",
                subject,
                format_float(b),
                format_float(c)
            )),
    };
    Some(diagnostic)
}

/// Pasted graphics, one error per spread holding any.
pub fn pasted_graphics(ctx: &CheckContext<'_>, sink: &mut Diagnostics) {
    for spread in ctx.document.spreads.iter().filter(|s| s.pasted_graphics > 0) {
        sink.add(on_spread(
            Diagnostic::new(ErrorKind::PastedGraphics)
                .with_context(format!("{} pasted graphics found.", spread.pasted_graphics)),
            spread,
        ));
    }
}
