//! One validation run over an unpacked package.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use zip::write::{SimpleFileOptions, ZipWriter};

use crate::check::{run_checks, CheckOutcome, RuleOptions};
use crate::detect::{PackageLayout, XML_FOLDERS};
use crate::error::{Result, StructuralFailure};
use crate::model::Document;
use crate::parser::{PackageParser, ParseOptions};
use crate::report::{FailureReport, Report};

/// File name of the source-XML archive written into the scratch folder.
pub const XML_ARCHIVE_NAME: &str = "xml_output.zip";

/// Loose files at the package root that belong in the source-XML archive.
const ROOT_FILES: [&str; 2] = ["mimetype", "designmap.xml"];

static SCRATCH_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A validation session: an unpacked package plus a private scratch folder.
///
/// Created through [`IdmlCheck::open`](crate::IdmlCheck::open). The caller
/// consumes the report (and any repackaged archive) and then calls
/// [`cleanup`](Session::cleanup).
#[derive(Debug)]
pub struct Session {
    layout: PackageLayout,
    parse_options: ParseOptions,
    rule_options: RuleOptions,
    template_name: Option<String>,
    scratch_dir: PathBuf,
    remove_source_on_cleanup: bool,
}

impl Session {
    pub(crate) fn new(
        layout: PackageLayout,
        parse_options: ParseOptions,
        rule_options: RuleOptions,
        template_name: Option<String>,
        scratch_dir: Option<PathBuf>,
        remove_source_on_cleanup: bool,
    ) -> Self {
        let scratch_dir = scratch_dir.unwrap_or_else(default_scratch_dir);
        Self {
            layout,
            parse_options,
            rule_options,
            template_name,
            scratch_dir,
            remove_source_on_cleanup,
        }
    }

    /// The discovered package layout.
    pub fn layout(&self) -> &PackageLayout {
        &self.layout
    }

    /// Folder for derived artifacts of this run.
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Explicit template name, or the name of the unpacked root folder.
    pub fn template_name(&self) -> Option<String> {
        self.template_name
            .clone()
            .or_else(|| self.layout.root_name())
    }

    /// Folder the report refers to as its output folder.
    pub fn output_folder(&self) -> String {
        self.layout.root.display().to_string()
    }

    /// Build the document model.
    pub fn build(&self) -> Result<Document> {
        PackageParser::from_layout(self.layout.clone(), self.parse_options.clone()).parse()
    }

    /// Build the model and run every rule, without assembling a report.
    pub fn check(&self) -> Result<(Document, CheckOutcome)> {
        let document = self.build()?;
        let outcome = run_checks(&document, &self.rule_options);
        Ok((document, outcome))
    }

    /// Validate the package.
    ///
    /// A structural failure comes back as
    /// [`Error::Structural`](crate::Error::Structural); turn it into a
    /// short report with [`failure_report`](Session::failure_report).
    pub fn run(&self) -> Result<Report> {
        log::info!("checking {}", self.layout.root.display());
        let (document, outcome) = self.check()?;

        let template_name = self.template_name();
        let output_folder = self.output_folder();
        let stories = document.stories_exist.then_some(&document);
        let report = Report::assemble(
            template_name.as_deref(),
            Some(output_folder.as_str()),
            &outcome.diagnostics,
            &outcome.counts,
            stories,
        );

        log::info!(
            "checked {}: {} diagnostics",
            self.layout.root.display(),
            outcome.diagnostics.len()
        );
        Ok(report)
    }

    /// Short report for a structural failure of this session.
    pub fn failure_report(&self, failure: &StructuralFailure) -> FailureReport {
        let template_name = self.template_name();
        FailureReport::new(
            template_name.as_deref(),
            Some(self.output_folder().as_str()),
            failure,
        )
    }

    /// Zip the package's XML tree into the scratch folder.
    ///
    /// `mimetype` is stored first and uncompressed; everything else is
    /// deflated. Entry names are relative to the unpacked root.
    pub fn repackage_source_xml(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.scratch_dir)?;
        let archive_path = self.scratch_dir.join(XML_ARCHIVE_NAME);
        let root = &self.layout.root;

        let mut folder_files = Vec::new();
        for folder in XML_FOLDERS {
            let dir = root.join(folder);
            if dir.is_dir() {
                collect_files(&dir, &mut folder_files)?;
            }
        }
        folder_files.sort();

        let mut files: Vec<PathBuf> = ROOT_FILES
            .iter()
            .map(|name| root.join(name))
            .filter(|path| path.is_file())
            .collect();
        files.extend(folder_files);

        let mut writer = ZipWriter::new(File::create(&archive_path)?);
        for path in &files {
            let name = entry_name(root, path);
            let method = if name == "mimetype" {
                zip::CompressionMethod::Stored
            } else {
                zip::CompressionMethod::Deflated
            };
            writer.start_file(name, SimpleFileOptions::default().compression_method(method))?;
            writer.write_all(&fs::read(path)?)?;
        }
        writer.finish()?;

        log::debug!(
            "wrote {} entries to {}",
            files.len(),
            archive_path.display()
        );
        Ok(archive_path)
    }

    /// Remove the scratch folder, and the unpacked root when the session
    /// owns it. Safe to call more than once.
    pub fn cleanup(&self) -> Result<()> {
        remove_dir_if_exists(&self.scratch_dir)?;
        if self.remove_source_on_cleanup {
            remove_dir_if_exists(&self.layout.root)?;
        }
        Ok(())
    }
}

fn default_scratch_dir() -> PathBuf {
    let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!("idmlcheck-{}-{}", std::process::id(), n))
}

fn remove_dir_if_exists(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {
            log::debug!("removed {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_files(&path, files)?;
        } else if path.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

/// Archive entry name: path relative to `root`, `/`-separated.
fn entry_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
