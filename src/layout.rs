//! Project tree layout
//!
//! Every check resolves its paths through a [`ProjectLayout`] built from an
//! explicit root directory, so the same checks can run against a fixture tree
//! in tests and against the real project from the CLI.

use std::path::{Path, PathBuf};

/// Directory holding the JSON configuration files
pub const CONFIG_DIR: &str = "config";

/// Flask application entry module
pub const APP_ENTRY: &str = "app/__init__.py";

/// Core source modules that must parse
pub const CORE_MODULES: [&str; 3] = ["core/analysis.py", "core/averager.py", "core/regression.py"];

/// Settings GUI assets
pub const GUI_FILES: [&str; 3] = ["GUI/settings.html", "GUI/settings.css", "GUI/config.js"];

/// Settings page checked for structural tokens
pub const SETTINGS_HTML: &str = "GUI/settings.html";

/// Files captured by a baseline snapshot, with their snapshot names
pub const SNAPSHOT_TARGETS: [(&str, &str); 10] = [
    ("app/__init__.py", "app_init"),
    ("core/analysis.py", "analysis"),
    ("core/averager.py", "averager"),
    ("core/regression.py", "regression"),
    ("config/analysis_config.json", "analysis_config"),
    ("config/averager_config.json", "averager_config"),
    ("config/regression_config.json", "regression_config"),
    ("GUI/settings.html", "settings_html"),
    ("GUI/settings.css", "settings_css"),
    ("GUI/config.js", "config_js"),
];

/// Resolved view of an OppNDA project tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    /// Create a layout rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a root-relative path such as `GUI/config.js`
    pub fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Path of a file inside `config/`
    pub fn config_file(&self, file_name: &str) -> PathBuf {
        self.root.join(CONFIG_DIR).join(file_name)
    }

    /// Resolve a snapshot directory; relative paths hang off the root
    pub fn snapshot_dir(&self, configured: &Path) -> PathBuf {
        if configured.is_absolute() {
            configured.to_path_buf()
        } else {
            self.root.join(configured)
        }
    }
}
