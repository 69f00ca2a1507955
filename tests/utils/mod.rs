// Shared fixtures: a minimal but complete OppNDA project tree

#![allow(dead_code)]

use std::path::Path;
use tempfile::TempDir;

pub const ANALYSIS_CONFIG: &str = r#"{
  "directories": {"report_dir": "reports", "plots_dir": "plots"},
  "metrics": {"include": ["delivery_prob", "latency_avg"], "ignore": ["buffertime_avg"]},
  "enabled_plots": ["box", "violin"],
  "plot_settings": {"dpi": 300, "figsize": [10.5, 6.0], "style": "whitegrid"}
}"#;

pub const AVERAGER_CONFIG: &str = r#"{
  "folder": "reports",
  "filename_pattern": {"delimiter": "_", "components": ["scenario", "router", "seed"]},
  "average_groups": [["router"], ["router", "ttl"]]
}"#;

pub const REGRESSION_CONFIG: &str = r#"{
  "input": {"csv_directory": "reports/averaged"},
  "features": {"target": "delivery_prob", "predictors": ["ttl", "buffer_size", "nodes"]},
  "model_settings": {"enabled_models": ["linear", "random_forest"], "test_size": 0.2, "seed": 42},
  "output": {"directory": "regression_out"}
}"#;

pub const SETTINGS_HTML: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <link rel=\"stylesheet\" href=\"settings.css\">\n</head>\n<body>\n  <script src=\"config.js\"></script>\n</body>\n</html>\n";

/// Write `content` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A temporary project tree where every check passes
pub fn valid_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write_file(root, "config/analysis_config.json", ANALYSIS_CONFIG);
    write_file(root, "config/averager_config.json", AVERAGER_CONFIG);
    write_file(root, "config/regression_config.json", REGRESSION_CONFIG);
    write_file(root, "app/__init__.py", "from flask import Flask\n\napp = Flask(__name__)\n");
    write_file(root, "core/analysis.py", "def analyse(frame):\n    return frame.describe()\n");
    write_file(root, "core/averager.py", "def average(rows):\n    return sum(rows) / len(rows)\n");
    write_file(root, "core/regression.py", "def fit(x, y):\n    return None\n");
    write_file(root, "GUI/settings.html", SETTINGS_HTML);
    write_file(root, "GUI/settings.css", "body { font-family: sans-serif; }\n");
    write_file(root, "GUI/config.js", "const saveConfig = () => fetch('/api/config');\n");
    dir
}

/// Point the parse-only check at `command` via the settings file
pub fn use_interpreter(root: &Path, command: &str) {
    write_file(root, "oppnda-check.toml", &format!("python = \"{command}\"\n"));
}
