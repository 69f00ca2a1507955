//! Parse-only checks for the Python sources of the project
//!
//! The modules are never imported or executed. Parsing is handed to the
//! project's own interpreter, which compiles the file to an AST and exits.
//! The interpreter runs isolated (`-I`) from the source's directory, so a
//! sibling `ast.py` or a `PYTHONPATH` entry cannot stand in for the stdlib.

use crate::error::{CheckError, Result};
use crate::layout::ProjectLayout;
use std::path::Path;
use std::process::Command;

/// Inline program run by the interpreter: parse `argv[1]`, print nothing
const PARSE_ONLY_PROGRAM: &str =
    "import ast, sys\nwith open(sys.argv[1], 'rb') as f:\n    ast.parse(f.read(), sys.argv[1])\n";

/// Something that can tell whether a source file parses
pub trait SyntaxChecker {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Parse `path` without executing it
    fn check(&self, path: &Path) -> Result<()>;
}

/// Parse-only check through an external Python interpreter
#[derive(Debug, Clone)]
pub struct PythonSyntaxChecker {
    interpreter: String,
}

impl PythonSyntaxChecker {
    /// Use the given interpreter command (e.g. `python3`, `/opt/venv/bin/python`)
    pub fn new(interpreter: impl Into<String>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// The interpreter command being used
    pub fn interpreter(&self) -> &str {
        &self.interpreter
    }
}

impl Default for PythonSyntaxChecker {
    fn default() -> Self {
        Self::new("python3")
    }
}

impl SyntaxChecker for PythonSyntaxChecker {
    fn name(&self) -> &str {
        &self.interpreter
    }

    fn check(&self, path: &Path) -> Result<()> {
        tracing::debug!(
            interpreter = %self.interpreter,
            path = %path.display(),
            "parse-only check"
        );

        let mut command = Command::new(&self.interpreter);
        command
            .arg("-I")
            .arg("-B")
            .arg("-c")
            .arg(PARSE_ONLY_PROGRAM)
            .arg(path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            command.current_dir(parent);
        }

        let output = command
            .output()
            .map_err(|source| CheckError::InterpreterUnavailable {
                interpreter: self.interpreter.clone(),
                source,
            })?;

        if output.status.success() {
            return Ok(());
        }

        // Last stderr line carries "SyntaxError: ..." from the traceback
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("interpreter exited with {:?}", output.status.code()));

        Err(CheckError::Syntax {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// Require `relative` to exist in the tree, then require it to parse
pub fn check_source_module(
    checker: &dyn SyntaxChecker,
    layout: &ProjectLayout,
    relative: &str,
) -> Result<()> {
    let path = layout.resolve(relative);
    if !path.exists() {
        return Err(CheckError::MissingArtifact(format!("{relative} not found")));
    }
    checker.check(&path)
}
