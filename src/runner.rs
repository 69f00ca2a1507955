//! Fault-isolating batch runner
//!
//! Checks run one after another on the calling thread. Each one produces a
//! [`CheckResult`]; an error or a panic in one check is recorded and the run
//! moves on to the next. A panic inside a check is logged through `tracing`
//! instead of the process panic hook, so it does not interleave with the
//! report on stderr. Panics outside a check still reach the previous hook.

use crate::error::{CheckError, Result};
use serde::Serialize;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

thread_local! {
    static IN_CHECK: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the panic hook once so panics raised inside a check are not printed
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !IN_CHECK.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Whether the current thread is inside [`Check::execute`]
pub fn in_check() -> bool {
    IN_CHECK.with(Cell::get)
}

/// A labelled check
pub struct Check<'a> {
    label: String,
    run: Box<dyn Fn() -> Result<()> + 'a>,
}

impl<'a> Check<'a> {
    pub fn new(label: impl Into<String>, run: impl Fn() -> Result<()> + 'a) -> Self {
        Self {
            label: label.into(),
            run: Box::new(run),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the check, turning errors and panics into a failed outcome
    pub fn execute(&self) -> CheckResult {
        install_quiet_hook();
        IN_CHECK.with(|flag| flag.set(true));
        let caught = panic::catch_unwind(AssertUnwindSafe(|| (self.run)()));
        IN_CHECK.with(|flag| flag.set(false));

        let outcome = match caught {
            Ok(Ok(())) => CheckOutcome::Pass,
            Ok(Err(err)) => CheckOutcome::Fail(err.to_string()),
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::warn!(label = %self.label, %message, "check panicked");
                CheckOutcome::Fail(CheckError::Panicked(message).to_string())
            }
        };
        CheckResult {
            label: self.label.clone(),
            outcome,
        }
    }
}

impl std::fmt::Debug for Check<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check").field("label", &self.label).finish()
    }
}

/// Pass or fail, with the failure reason
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Pass,
    Fail(String),
}

/// Outcome of one check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub label: String,
    pub outcome: CheckOutcome,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.outcome == CheckOutcome::Pass
    }

    /// Failure reason, if the check failed
    pub fn message(&self) -> Option<&str> {
        match &self.outcome {
            CheckOutcome::Pass => None,
            CheckOutcome::Fail(message) => Some(message),
        }
    }
}

impl Serialize for CheckResult {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CheckResult", 3)?;
        state.serialize_field("label", &self.label)?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

/// Results of one suite run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    /// Header title, e.g. `CONFIG FILE TESTS`
    pub title: String,
    /// Tally label, e.g. `Config Tests`
    pub tally: String,
    pub checks: Vec<CheckResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.checks.iter().filter(|c| c.passed()).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }
}

/// Run `checks` in order and collect every result
pub fn run_checks(title: &str, tally: &str, checks: &[Check<'_>]) -> SuiteReport {
    let mut results = Vec::with_capacity(checks.len());
    for check in checks {
        let result = check.execute();
        match result.message() {
            None => tracing::debug!(label = %result.label, "check passed"),
            Some(reason) => tracing::debug!(label = %result.label, reason, "check failed"),
        }
        results.push(result);
    }

    SuiteReport {
        title: title.to_string(),
        tally: tally.to_string(),
        checks: results,
    }
}
