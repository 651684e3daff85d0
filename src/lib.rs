//! # idmlcheck
//!
//! Template-readiness validation for unpacked InDesign IDML packages.
//!
//! This library reads the XML tree of an unpacked `.idml` file together with
//! its `Links` and `Document Fonts` folders, builds a document model, runs a
//! fixed sequence of rules over it and produces a JSON report grouped by
//! category and severity.
//!
//! ## Quick Start
//!
//! ```no_run
//! use idmlcheck::{check_dir, JsonFormat};
//!
//! fn main() -> idmlcheck::Result<()> {
//!     let report = check_dir("unpacked/")?;
//!     println!("{} errors", report.count(idmlcheck::Severity::Error));
//!
//!     let json = idmlcheck::report::to_json(&report, JsonFormat::Pretty)?;
//!     println!("{}", json);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Style resolution**: BasedOn chains with cycle and depth detection
//! - **Font checks**: manifest status, shipped font files, variable families
//! - **Image checks**: missing, unused, embedded, large and transformed links
//! - **Frame checks**: auto-sizing, columns, wrap, threading, object styles
//! - **Source archive**: re-zip the package XML for downstream tools

pub mod check;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod report;
pub mod session;

// Re-export commonly used types
pub use check::{run_checks, RuleOptions, DEFAULT_LARGE_IMAGE_MB};
pub use detect::{is_idml_root, PackageLayout};
pub use error::{Error, Result, StructuralFailure};
pub use model::Document;
pub use parser::{ErrorMode, PackageParser, ParseOptions};
pub use report::{
    Category, Diagnostic, DiagnosticEntry, FailureReport, JsonFormat, Report, Severity,
};
pub use session::{Session, XML_ARCHIVE_NAME};

use std::path::{Path, PathBuf};

/// Build the document model of an unpacked package.
///
/// # Example
///
/// ```no_run
/// use idmlcheck::parse_dir;
///
/// let doc = parse_dir("unpacked/").unwrap();
/// println!("Stories: {}", doc.stories.len());
/// ```
pub fn parse_dir<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = PackageParser::open(path)?;
    parser.parse()
}

/// Build the document model with custom options.
///
/// # Example
///
/// ```no_run
/// use idmlcheck::{parse_dir_with_options, ParseOptions};
///
/// let options = ParseOptions::new().strict().with_max_style_depth(16);
/// let doc = parse_dir_with_options("unpacked/", options).unwrap();
/// ```
pub fn parse_dir_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = PackageParser::open_with_options(path, options)?;
    parser.parse()
}

/// Validate an unpacked package with default settings.
///
/// Structural failures are returned as [`Error::Structural`].
pub fn check_dir<P: AsRef<Path>>(path: P) -> Result<Report> {
    let session = IdmlCheck::new().open(path)?;
    let report = session.run();
    session.cleanup()?;
    report
}

/// Validate an unpacked package and render the report as JSON.
///
/// A structural failure renders the short failure report instead of
/// returning an error; every other error is propagated.
///
/// # Example
///
/// ```no_run
/// use idmlcheck::{check_dir_to_json, JsonFormat};
///
/// let json = check_dir_to_json("unpacked/", JsonFormat::Pretty).unwrap();
/// std::fs::write("report.json", json).unwrap();
/// ```
pub fn check_dir_to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let path = path.as_ref();
    match check_dir(path) {
        Ok(report) => report::to_json(&report, format),
        Err(Error::Structural(failure)) => {
            let template_name = path.file_name().map(|n| n.to_string_lossy().into_owned());
            let output_folder = path.display().to_string();
            let failure = FailureReport::new(
                template_name.as_deref(),
                Some(output_folder.as_str()),
                &failure,
            );
            report::to_json(&failure, format)
        }
        Err(e) => Err(e),
    }
}

/// Builder for validation sessions.
///
/// # Example
///
/// ```no_run
/// use idmlcheck::IdmlCheck;
///
/// let session = IdmlCheck::new()
///     .with_template_name("Spring Catalog")
///     .with_large_image_threshold_mb(5.0)
///     .lenient()
///     .open("unpacked/")?;
/// let report = session.run()?;
/// let archive = session.repackage_source_xml()?;
/// println!("{} -> {}", report.template_name, archive.display());
/// session.cleanup()?;
/// # Ok::<(), idmlcheck::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IdmlCheck {
    parse_options: ParseOptions,
    rule_options: RuleOptions,
    template_name: Option<String>,
    scratch_dir: Option<PathBuf>,
    remove_source_on_cleanup: bool,
}

impl IdmlCheck {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            rule_options: RuleOptions::default(),
            template_name: None,
            scratch_dir: None,
            remove_source_on_cleanup: false,
        }
    }

    /// Skip unparsable spread, story and master spread files.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Fail on any unparsable artifact.
    pub fn strict(mut self) -> Self {
        self.parse_options = self.parse_options.strict();
        self
    }

    /// Replace the parse options wholesale.
    pub fn with_parse_options(mut self, options: ParseOptions) -> Self {
        self.parse_options = options;
        self
    }

    /// Look for `Links` and `Document Fonts` in another folder.
    pub fn with_asset_root(mut self, dir: impl Into<PathBuf>) -> Self {
        self.parse_options = self.parse_options.with_asset_root(dir);
        self
    }

    /// Set the BasedOn recursion bound.
    pub fn with_max_style_depth(mut self, depth: usize) -> Self {
        self.parse_options = self.parse_options.with_max_style_depth(depth);
        self
    }

    /// Set the size above which an image is reported as large.
    pub fn with_large_image_threshold_mb(mut self, mb: f64) -> Self {
        self.rule_options = self.rule_options.with_large_image_threshold_mb(mb);
        self
    }

    /// Name to put in the report instead of the root folder name.
    pub fn with_template_name(mut self, name: impl Into<String>) -> Self {
        self.template_name = Some(name.into());
        self
    }

    /// Folder for derived artifacts; a fresh temp folder by default.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = Some(dir.into());
        self
    }

    /// Also delete the unpacked package on [`Session::cleanup`].
    pub fn remove_source_on_cleanup(mut self, remove: bool) -> Self {
        self.remove_source_on_cleanup = remove;
        self
    }

    /// Discover the package layout and open a session over it.
    pub fn open<P: AsRef<Path>>(self, root: P) -> Result<Session> {
        let layout = PackageLayout::discover(
            root,
            self.parse_options.asset_root.as_deref(),
            self.parse_options.create_missing_asset_dirs,
        )?;
        Ok(Session::new(
            layout,
            self.parse_options,
            self.rule_options,
            self.template_name,
            self.scratch_dir,
            self.remove_source_on_cleanup,
        ))
    }
}

impl Default for IdmlCheck {
    fn default() -> Self {
        Self::new()
    }
}
