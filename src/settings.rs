//! Tool settings (`oppnda-check.toml`)
//!
//! Every field is optional; a missing file means all defaults.
//!
//! # Example TOML
//!
//! ```toml
//! snapshot_dir = "tests/snapshots"
//! python = "/opt/oppnda/venv/bin/python"
//! ```

use crate::error::{CheckError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name looked up in the project root when `--config` is not given
pub const SETTINGS_FILE: &str = "oppnda-check.toml";

/// Settings for the checker itself, not for the checked project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckerSettings {
    /// Where snapshot records live; relative paths hang off the project root
    #[serde(default = "default_snapshot_dir")]
    pub snapshot_dir: PathBuf,

    /// Interpreter used for parse-only source checks
    #[serde(default = "default_python")]
    pub python: String,
}

fn default_snapshot_dir() -> PathBuf {
    PathBuf::from("tests/snapshots")
}

fn default_python() -> String {
    "python3".to_string()
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            snapshot_dir: default_snapshot_dir(),
            python: default_python(),
        }
    }
}

impl CheckerSettings {
    /// Parse settings from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(text).map_err(|e| CheckError::Settings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from `path`
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CheckError::io(path, e))?;
        Self::from_toml(&text)
    }

    /// Load `oppnda-check.toml` from `root`, or defaults when it is absent
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(SETTINGS_FILE);
        if path.exists() {
            tracing::debug!(path = %path.display(), "loading checker settings");
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.python.trim().is_empty() {
            return Err(CheckError::Settings(
                "python must name an interpreter".to_string(),
            ));
        }

        if self.snapshot_dir.as_os_str().is_empty() {
            return Err(CheckError::Settings(
                "snapshot_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
