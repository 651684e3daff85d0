//! Validation rules and the state machine that runs them.
//!
//! A run walks a fixed sequence of states. After the model is built, each
//! rule state reads the [`Document`](crate::model::Document) and appends
//! diagnostics; rules never modify the document. Rules with nothing to look
//! at (no stories, no master spreads) emit nothing. The final analytics
//! state computes the report header totals.
//!
//! ```no_run
//! use idmlcheck::check::{run_checks, RuleOptions};
//! use idmlcheck::parser::PackageParser;
//!
//! # fn main() -> idmlcheck::Result<()> {
//! let document = PackageParser::open("unpacked/Brochure")?.parse()?;
//! let outcome = run_checks(&document, &RuleOptions::default());
//! println!("{} diagnostics", outcome.diagnostics.len());
//! # Ok(())
//! # }
//! ```

mod analytics;
mod context;
pub mod fonts;
pub mod frames;
pub mod general;
pub mod images;
mod options;
mod pipeline;
pub mod text;

pub use analytics::results_analytics;
pub use context::CheckContext;
pub use options::{RuleOptions, DEFAULT_LARGE_IMAGE_MB};
pub use pipeline::{run_checks, CheckFn, CheckOutcome, Pipeline, State};
