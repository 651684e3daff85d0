//! IDML package parsing.
//!
//! [`PackageParser`] turns an unpacked package into a [`Document`](crate::model::Document).
//! Each XML subsystem has its own small parser; they can also be used on
//! their own.

mod assets;
mod font_file;
mod fonts;
mod options;
mod package_parser;
mod preferences;
mod spreads;
mod stories;
mod styles;
mod xml;

pub use assets::inventory;
pub use font_file::parse_font_file;
pub use fonts::parse_font_manifest;
pub use options::{ErrorMode, ParseOptions};
pub use package_parser::PackageParser;
pub use preferences::parse_preferences;
pub use spreads::{parse_master_spread, parse_spread, MasterSpreadFile};
pub use stories::parse_story_file;
pub use styles::parse_style_sheets;
