//! idmlcheck CLI - IDML template validation tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use idmlcheck::{report, Category, Error, IdmlCheck, JsonFormat, Report, Session, Severity};

#[derive(Parser)]
#[command(name = "idmlcheck")]
#[command(version)]
#[command(about = "Validate unpacked InDesign IDML packages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a package and write the JSON report
    Check {
        /// Unpacked package directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Fail on any unparsable spread, story or master spread file
        #[arg(long)]
        strict: bool,

        /// Size in MB above which an image is reported as large
        #[arg(long, value_name = "MB", env = "IDMLCHECK_LARGE_IMAGE_MB")]
        large_image_mb: Option<f64>,

        /// Template name for the report (defaults to the directory name)
        #[arg(long, value_name = "NAME")]
        template_name: Option<String>,

        /// Folder holding Links and Document Fonts
        #[arg(long, value_name = "DIR")]
        assets: Option<PathBuf>,
    },

    /// Print diagnostic counts per category
    Summary {
        /// Unpacked package directory
        #[arg(value_name = "DIR")]
        input: PathBuf,
    },

    /// Zip the package XML into an archive
    Repackage {
        /// Unpacked package directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Archive to write
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            input,
            output,
            compact,
            strict,
            large_image_mb,
            template_name,
            assets,
        } => {
            let mut builder = IdmlCheck::new();
            if strict {
                builder = builder.strict();
            }
            if let Some(mb) = large_image_mb {
                builder = builder.with_large_image_threshold_mb(mb);
            }
            if let Some(name) = template_name {
                builder = builder.with_template_name(name);
            }
            if let Some(dir) = assets {
                builder = builder.with_asset_root(dir);
            }
            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            cmd_check(builder, &input, output.as_deref(), format)
        }
        Commands::Summary { input } => cmd_summary(&input),
        Commands::Repackage { input, output } => cmd_repackage(&input, &output),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

/// Run a session, printing the failure report when the package is unusable.
fn run_session(
    session: &Session,
    output: Option<&Path>,
    format: JsonFormat,
) -> Result<Report, Box<dyn std::error::Error>> {
    let pb = spinner("Checking package...");
    let result = session.run();
    pb.finish_and_clear();

    match result {
        Ok(report) => Ok(report),
        Err(Error::Structural(failure)) => {
            let json = report::to_json(&session.failure_report(&failure), format)?;
            write_output(output, &json)?;
            Err(failure.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn cmd_check(
    builder: IdmlCheck,
    input: &Path,
    output: Option<&Path>,
    format: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if !idmlcheck::is_idml_root(input) {
        log::warn!("{} does not look like an unpacked IDML package", input.display());
    }
    let session = builder.open(input)?;
    let result = run_session(&session, output, format);
    session.cleanup()?;
    let report = result?;

    let json = report::to_json(&report, format)?;
    write_output(output, &json)?;

    if output.is_some() {
        let errors = report.count(Severity::Error);
        let warnings = report.count(Severity::Warning);
        let status = if errors == 0 {
            "Passed".green().bold()
        } else {
            "Failed".red().bold()
        };
        println!("{}: {} errors, {} warnings", status, errors, warnings);
    }
    Ok(())
}

fn cmd_summary(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = IdmlCheck::new().open(input)?;
    let result = run_session(&session, None, JsonFormat::Pretty);
    session.cleanup()?;
    let report = result?;

    println!("{}", "Template".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Name".bold(), report.template_name);
    if let Some(ref folder) = report.output_folder {
        println!("{}: {}", "Folder".bold(), folder);
    }

    println!();
    println!("{}", "Diagnostics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for category in Category::ALL {
        let section = report.section(category);
        println!(
            "{}: {} errors, {} warnings, {} infos (total {})",
            category.label().bold(),
            section.count(Severity::Error),
            section.count(Severity::Warning),
            section.count(Severity::Info),
            section.total_count
        );
    }

    println!();
    let errors = report.count(Severity::Error);
    if errors == 0 {
        println!("{}", "No errors found".green().bold());
    } else {
        println!("{} {}", errors.to_string().red().bold(), "errors found".red());
    }
    Ok(())
}

fn cmd_repackage(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let session = IdmlCheck::new().open(input)?;

    let pb = spinner("Packaging source XML...");
    let result = session.repackage_source_xml().and_then(|archive| {
        fs::copy(&archive, output)?;
        Ok(())
    });
    pb.finish_and_clear();
    session.cleanup()?;
    result?;

    println!("{} {}", "Saved to".green(), output.display());
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "idmlcheck".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("IDML template validation tool");
    println!();
    println!("License: MIT");
}
