use anyhow::{Context, Result};
use clap::Parser;
use oppnda_check::cli::{Cli, Command, OutputFormat, SnapshotCommand};
use oppnda_check::layout::ProjectLayout;
use oppnda_check::report;
use oppnda_check::runner::SuiteReport;
use oppnda_check::settings::CheckerSettings;
use oppnda_check::snapshot::{self, SnapshotStore};
use oppnda_check::suites;
use oppnda_check::syntax::PythonSyntaxChecker;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the project root and load checker settings
fn load_context(args: &Cli) -> Result<(ProjectLayout, CheckerSettings)> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };
    if !root.is_dir() {
        anyhow::bail!("Project root {} is not a directory", root.display());
    }

    let settings = match &args.config {
        Some(path) => CheckerSettings::from_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => CheckerSettings::discover(&root).context("Failed to load checker settings")?,
    };

    Ok((ProjectLayout::new(root), settings))
}

/// Print suite reports; returns whether every check passed
fn print_suites(reports: &[SuiteReport], format: OutputFormat) -> Result<bool> {
    match format {
        OutputFormat::Text => {
            for suite in reports {
                print!("{}", report::render_suite_text(suite));
            }
        }
        OutputFormat::Json => {
            println!("{}", report::render_suites_json(reports)?);
        }
    }
    Ok(reports.iter().all(SuiteReport::all_passed))
}

fn run(args: &Cli) -> Result<bool> {
    let (layout, settings) = load_context(args)?;
    let checker = PythonSyntaxChecker::new(settings.python.clone());
    let snapshot_dir: PathBuf = layout.snapshot_dir(&settings.snapshot_dir);

    match args.command() {
        Command::Configs => print_suites(&[suites::run_config_suite(&layout)], args.format),
        Command::Framework => print_suites(
            &[suites::run_framework_suite(&layout, &checker)],
            args.format,
        ),
        Command::All => print_suites(
            &[
                suites::run_config_suite(&layout),
                suites::run_framework_suite(&layout, &checker),
            ],
            args.format,
        ),
        Command::Snapshot(SnapshotCommand::Capture) => {
            let store = SnapshotStore::new(snapshot_dir);
            let entries = snapshot::capture_baseline(&layout, &store)
                .context("Failed to capture baseline snapshots")?;
            match args.format {
                OutputFormat::Text => print!("{}", report::render_baseline_text(&entries)),
                OutputFormat::Json => println!("{}", report::render_baseline_json(&entries)?),
            }
            Ok(true)
        }
        Command::Snapshot(SnapshotCommand::Compare) => {
            let store = SnapshotStore::new(snapshot_dir);
            let drifts = snapshot::compare_baseline(&layout, &store)
                .context("Failed to compare with baseline snapshots")?;
            match args.format {
                OutputFormat::Text => print!("{}", report::render_drift_text(&drifts)),
                OutputFormat::Json => println!("{}", report::render_drift_json(&drifts)?),
            }
            Ok(drifts.iter().all(snapshot::BaselineDrift::is_clean))
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let clean = run(&args)?;
    if args.strict && !clean {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
