//! Required-key schemas for the OppNDA configuration files
//!
//! A schema is a fixed list of top-level keys. Each key either only has to be
//! present, or has to be an object carrying a list of nested keys. Missing
//! entries are reported as key paths (`directories.plots_dir`), all of them,
//! in schema order.

use serde_json::Value;

/// What a schema demands of one top-level key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRequirement {
    /// The key must exist; its value is not inspected
    Present,
    /// The key must exist and its object value must contain these keys
    Nested(&'static [&'static str]),
}

/// Immutable schema descriptor for one configuration file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaDescriptor {
    /// Human-readable schema name
    pub name: &'static str,
    /// Required top-level keys, in reporting order
    pub keys: &'static [(&'static str, KeyRequirement)],
}

/// Schema for `analysis_config.json`
pub static ANALYSIS_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    name: "analysis",
    keys: &[
        ("directories", KeyRequirement::Nested(&["report_dir", "plots_dir"])),
        ("metrics", KeyRequirement::Nested(&["include", "ignore"])),
        ("enabled_plots", KeyRequirement::Present),
        ("plot_settings", KeyRequirement::Present),
    ],
};

/// Schema for `averager_config.json`
pub static AVERAGER_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    name: "averager",
    keys: &[
        ("folder", KeyRequirement::Present),
        (
            "filename_pattern",
            KeyRequirement::Nested(&["delimiter", "components"]),
        ),
        ("average_groups", KeyRequirement::Present),
    ],
};

/// Schema for `regression_config.json`
pub static REGRESSION_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    name: "regression",
    keys: &[
        ("input", KeyRequirement::Nested(&["csv_directory"])),
        ("features", KeyRequirement::Nested(&["target", "predictors"])),
        ("model_settings", KeyRequirement::Nested(&["enabled_models"])),
        ("output", KeyRequirement::Nested(&["directory"])),
    ],
};

impl SchemaDescriptor {
    /// Every key path this schema requires, in dotted notation
    pub fn required_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for (key, requirement) in self.keys {
            match requirement {
                KeyRequirement::Present => paths.push((*key).to_string()),
                KeyRequirement::Nested(subkeys) => {
                    paths.extend(subkeys.iter().map(|sub| format!("{key}.{sub}")));
                }
            }
        }
        paths
    }
}

/// Collect every key path `document` is missing relative to `schema`
///
/// An absent top-level key is reported once by its own name. A present key
/// whose value is not an object cannot hold nested keys, so each required
/// nested key is reported missing.
pub fn missing_keys(document: &Value, schema: &SchemaDescriptor) -> Vec<String> {
    let mut missing = Vec::new();

    for (key, requirement) in schema.keys {
        let Some(value) = document.get(key) else {
            missing.push((*key).to_string());
            continue;
        };

        if let KeyRequirement::Nested(subkeys) = requirement {
            let object = value.as_object();
            for subkey in *subkeys {
                if !object.is_some_and(|map| map.contains_key(*subkey)) {
                    missing.push(format!("{key}.{subkey}"));
                }
            }
        }
    }

    missing
}
