//! The two check suites and their individual checks
//!
//! Every check takes the project layout explicitly and can be called on its
//! own; the suite builders only bundle them with their report labels.

use crate::config_doc::{load_document, verify_round_trip, ConfigKind};
use crate::error::{CheckError, Result};
use crate::html::check_settings_html;
use crate::layout::{ProjectLayout, APP_ENTRY, CORE_MODULES, GUI_FILES};
use crate::runner::{run_checks, Check, SuiteReport};
use crate::schema::missing_keys;
use crate::syntax::{check_source_module, SyntaxChecker};
use serde_json::Value;

pub const CONFIG_SUITE_TITLE: &str = "CONFIG FILE TESTS";
pub const CONFIG_SUITE_TALLY: &str = "Config Tests";
pub const FRAMEWORK_SUITE_TITLE: &str = "FRAMEWORK TESTS";
pub const FRAMEWORK_SUITE_TALLY: &str = "Framework Tests";

fn load_config(layout: &ProjectLayout, kind: ConfigKind) -> Result<Value> {
    load_document(&layout.config_file(kind.file_name()))
}

/// The config file exists, parses, and is not `null`
pub fn check_config_parses(layout: &ProjectLayout, kind: ConfigKind) -> Result<()> {
    let path = layout.config_file(kind.file_name());
    match load_document(&path)? {
        Value::Null => Err(CheckError::NullDocument(path)),
        _ => Ok(()),
    }
}

/// The config file carries every key its schema requires
pub fn check_config_schema(layout: &ProjectLayout, kind: ConfigKind) -> Result<()> {
    let document = load_config(layout, kind)?;
    let missing = missing_keys(&document, kind.schema());
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::MissingKeys(missing))
    }
}

/// The config file survives a write and re-read unchanged
pub fn check_config_round_trip(layout: &ProjectLayout, kind: ConfigKind) -> Result<()> {
    let document = load_config(layout, kind)?;
    let scratch = tempfile::tempdir().map_err(|e| CheckError::io(std::env::temp_dir(), e))?;
    verify_round_trip(&document, scratch.path())
}

/// Every settings GUI asset exists
pub fn check_gui_files(layout: &ProjectLayout) -> Result<()> {
    let missing: Vec<&str> = GUI_FILES
        .iter()
        .copied()
        .filter(|relative| !layout.resolve(relative).exists())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CheckError::MissingArtifact(missing.join(", ")))
    }
}

/// Checks of the config suite, in report order
pub fn config_checks(layout: &ProjectLayout) -> Vec<Check<'_>> {
    let mut checks = Vec::with_capacity(ConfigKind::ALL.len() * 3);
    for kind in ConfigKind::ALL {
        let label = kind.label();
        checks.push(Check::new(format!("{label} JSON Valid"), move || {
            check_config_parses(layout, kind)
        }));
        checks.push(Check::new(format!("{label} Schema Valid"), move || {
            check_config_schema(layout, kind)
        }));
        checks.push(Check::new(format!("{label} Round Trip"), move || {
            check_config_round_trip(layout, kind)
        }));
    }
    checks
}

/// Checks of the framework suite, in report order
pub fn framework_checks<'a>(
    layout: &'a ProjectLayout,
    checker: &'a dyn SyntaxChecker,
) -> Vec<Check<'a>> {
    let module_labels = [
        "Analysis Module Syntax",
        "Averager Module Syntax",
        "Regression Module Syntax",
    ];

    let mut checks = Vec::with_capacity(CORE_MODULES.len() + 3);
    checks.push(Check::new("Flask App Syntax", move || {
        check_source_module(checker, layout, APP_ENTRY)
    }));
    for (label, module) in module_labels.into_iter().zip(CORE_MODULES) {
        checks.push(Check::new(label, move || {
            check_source_module(checker, layout, module)
        }));
    }
    checks.push(Check::new("GUI Files Exist", move || check_gui_files(layout)));
    checks.push(Check::new("HTML Valid", move || check_settings_html(layout)));
    checks
}

/// Run the config suite against `layout`
pub fn run_config_suite(layout: &ProjectLayout) -> SuiteReport {
    tracing::info!(root = %layout.root().display(), "running config suite");
    run_checks(CONFIG_SUITE_TITLE, CONFIG_SUITE_TALLY, &config_checks(layout))
}

/// Run the framework suite against `layout`
pub fn run_framework_suite(layout: &ProjectLayout, checker: &dyn SyntaxChecker) -> SuiteReport {
    tracing::info!(
        root = %layout.root().display(),
        syntax_checker = checker.name(),
        "running framework suite"
    );
    run_checks(
        FRAMEWORK_SUITE_TITLE,
        FRAMEWORK_SUITE_TALLY,
        &framework_checks(layout, checker),
    )
}
