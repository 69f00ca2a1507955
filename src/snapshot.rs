//! Content-hash snapshots for detecting file drift
//!
//! A snapshot is a small JSON record (`file`, `hash`, `size`) stored as
//! `<snapshot_dir>/<name>.json`. Capturing replaces the record atomically
//! (written to a scratch file in the same directory, then renamed), comparing
//! only reads it. A name without a record yields
//! [`SnapshotComparison::NoBaseline`], which is never reported as a change.
//!
//! # Example
//!
//! ```no_run
//! use oppnda_check::snapshot::{SnapshotComparison, SnapshotStore};
//! use std::path::Path;
//!
//! let store = SnapshotStore::new("tests/snapshots");
//! store.capture(Path::new("core/analysis.py"), "analysis").unwrap();
//!
//! match store.compare(Path::new("core/analysis.py"), "analysis").unwrap() {
//!     SnapshotComparison::Unchanged { .. } => println!("File unchanged"),
//!     SnapshotComparison::Changed { .. } => println!("File has changed"),
//!     SnapshotComparison::NoBaseline => println!("No baseline snapshot exists"),
//! }
//! ```

use crate::error::{CheckError, Result};
use crate::layout::{ProjectLayout, SNAPSHOT_TARGETS};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Persisted digest of one file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    /// Absolute path of the file at capture time
    pub file: PathBuf,
    /// Lower-case hex SHA-256 of the raw bytes
    pub hash: String,
    /// Size in bytes
    pub size: u64,
}

/// Outcome of comparing a file with its stored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotComparison {
    /// Digest matches the baseline
    Unchanged { digest: String },
    /// Digest differs from the baseline
    Changed { baseline: String, current: String },
    /// No record was ever captured under this name
    NoBaseline,
}

impl SnapshotComparison {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, SnapshotComparison::Unchanged { .. })
    }

    /// Short human-readable verdict
    pub fn describe(&self) -> &'static str {
        match self {
            SnapshotComparison::Unchanged { .. } => "File unchanged",
            SnapshotComparison::Changed { .. } => "File has changed",
            SnapshotComparison::NoBaseline => "No baseline snapshot exists",
        }
    }
}

/// Hex SHA-256 digest and byte length of `bytes`
pub fn digest_bytes(bytes: &[u8]) -> (String, u64) {
    let digest = Sha256::digest(bytes);
    (hex::encode(digest), bytes.len() as u64)
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| CheckError::io(path, e))
}

/// Snapshot names become file names, so keep them to a safe alphabet
fn validate_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(CheckError::InvalidSnapshotName(name.to_string()))
    }
}

/// Directory of snapshot records
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `name`
    pub fn record_path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Hash `path` and store the record under `name`, replacing any previous one
    pub fn capture(&self, path: &Path, name: &str) -> Result<SnapshotRecord> {
        let record_path = self.record_path(name)?;
        fs::create_dir_all(&self.dir).map_err(|e| CheckError::io(&self.dir, e))?;

        let content = read_file(path)?;
        let (hash, size) = digest_bytes(&content);
        let file = fs::canonicalize(path).map_err(|e| CheckError::io(path, e))?;
        let record = SnapshotRecord { file, hash, size };

        let mut json = serde_json::to_string_pretty(&record).map_err(|source| CheckError::Json {
            path: record_path.clone(),
            source,
        })?;
        json.push('\n');
        let mut scratch =
            NamedTempFile::new_in(&self.dir).map_err(|e| CheckError::io(&self.dir, e))?;
        scratch
            .write_all(json.as_bytes())
            .and_then(|()| scratch.as_file().sync_all())
            .map_err(|e| CheckError::io(&record_path, e))?;
        scratch
            .persist(&record_path)
            .map_err(|e| CheckError::io(&record_path, e.error))?;

        tracing::info!(name, hash = %record.hash, size = record.size, "snapshot captured");
        Ok(record)
    }

    /// Stored record for `name`, if one exists
    pub fn load(&self, name: &str) -> Result<Option<SnapshotRecord>> {
        let record_path = self.record_path(name)?;
        let bytes = match fs::read(&record_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CheckError::io(&record_path, e)),
        };
        let record = serde_json::from_slice(&bytes).map_err(|source| CheckError::Json {
            path: record_path,
            source,
        })?;
        Ok(Some(record))
    }

    /// Re-hash `path` and compare with the record stored under `name`
    pub fn compare(&self, path: &Path, name: &str) -> Result<SnapshotComparison> {
        let Some(record) = self.load(name)? else {
            tracing::debug!(name, "no baseline snapshot");
            return Ok(SnapshotComparison::NoBaseline);
        };

        let (current, _) = digest_bytes(&read_file(path)?);
        let comparison = if current == record.hash {
            SnapshotComparison::Unchanged { digest: current }
        } else {
            SnapshotComparison::Changed {
                baseline: record.hash,
                current,
            }
        };
        tracing::debug!(name, verdict = comparison.describe(), "snapshot compared");
        Ok(comparison)
    }
}

/// Result of capturing one baseline target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaselineEntry {
    Created {
        name: &'static str,
        record: SnapshotRecord,
    },
    /// The file does not exist in this tree
    Skipped {
        relative: &'static str,
        name: &'static str,
    },
}

/// Capture every file of the baseline list that exists under `layout`
pub fn capture_baseline(
    layout: &ProjectLayout,
    store: &SnapshotStore,
) -> Result<Vec<BaselineEntry>> {
    let mut entries = Vec::with_capacity(SNAPSHOT_TARGETS.len());
    for (relative, name) in SNAPSHOT_TARGETS {
        let path = layout.resolve(relative);
        if path.exists() {
            let record = store.capture(&path, name)?;
            entries.push(BaselineEntry::Created { name, record });
        } else {
            tracing::warn!(relative, "baseline target not found, skipping");
            entries.push(BaselineEntry::Skipped { relative, name });
        }
    }
    Ok(entries)
}

/// Comparison result for one baseline target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaselineDrift {
    pub relative: &'static str,
    pub name: &'static str,
    /// `None` when the file no longer exists in the tree
    pub comparison: Option<SnapshotComparison>,
}

impl BaselineDrift {
    /// True only for an existing file whose digest matches its baseline
    pub fn is_clean(&self) -> bool {
        self.comparison
            .as_ref()
            .is_some_and(SnapshotComparison::is_unchanged)
    }
}

/// Compare every file of the baseline list with its stored record
pub fn compare_baseline(
    layout: &ProjectLayout,
    store: &SnapshotStore,
) -> Result<Vec<BaselineDrift>> {
    let mut drifts = Vec::with_capacity(SNAPSHOT_TARGETS.len());
    for (relative, name) in SNAPSHOT_TARGETS {
        let path = layout.resolve(relative);
        let comparison = if path.exists() {
            Some(store.compare(&path, name)?)
        } else {
            None
        };
        drifts.push(BaselineDrift {
            relative,
            name,
            comparison,
        });
    }
    Ok(drifts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn test_digest_bytes_known_vectors() {
        assert_eq!(digest_bytes(b""), (EMPTY_SHA256.to_string(), 0));
        assert_eq!(
            digest_bytes(b"abc").0,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_capture_then_compare_unchanged() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("analysis.py");
        fs::write(&file, "print('hi')\n").unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots"));

        let record = store.capture(&file, "analysis").unwrap();
        assert_eq!(record.size, 12);
        assert!(record.file.is_absolute());

        let comparison = store.compare(&file, "analysis").unwrap();
        assert_eq!(
            comparison,
            SnapshotComparison::Unchanged {
                digest: record.hash.clone()
            }
        );
    }

    #[test]
    fn test_compare_without_capture_is_no_baseline() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.js");
        fs::write(&file, "const x = 1;").unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots"));

        assert_eq!(
            store.compare(&file, "config_js").unwrap(),
            SnapshotComparison::NoBaseline
        );
        // comparing never creates the store
        assert!(!store.dir().exists());
    }

    #[test]
    fn test_single_byte_change_is_detected() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("settings.css");
        fs::write(&file, "body { margin: 0; }").unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots"));
        let record = store.capture(&file, "settings_css").unwrap();

        fs::write(&file, "body { margin: 1; }").unwrap();
        match store.compare(&file, "settings_css").unwrap() {
            SnapshotComparison::Changed { baseline, current } => {
                assert_eq!(baseline, record.hash);
                assert_ne!(baseline, current);
            }
            other => panic!("Expected Changed, got {other:?}"),
        }
    }

    #[test]
    fn test_capture_with_existing_store_dir() {
        let dir = TempDir::new().unwrap();
        let snapshots = dir.path().join("snapshots");
        fs::create_dir_all(&snapshots).unwrap();
        let file = dir.path().join("a.json");
        fs::write(&file, "{}").unwrap();

        let store = SnapshotStore::new(&snapshots);
        store.capture(&file, "a").unwrap();
        store.capture(&file, "a").unwrap();
        assert!(snapshots.join("a.json").exists());
    }

    #[test]
    fn test_record_file_format() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("empty.txt");
        fs::write(&file, "").unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots"));
        store.capture(&file, "empty").unwrap();

        let raw = fs::read_to_string(store.record_path("empty").unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["hash"], EMPTY_SHA256);
        assert_eq!(value["size"], 0);
        assert!(value["file"].as_str().unwrap().ends_with("empty.txt"));
        assert!(raw.contains("\n  \"hash\""));
    }

    #[test]
    fn test_recapture_replaces_record_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.js");
        let snapshots = dir.path().join("snapshots");
        let store = SnapshotStore::new(&snapshots);

        fs::write(&file, "const a = 1;\n").unwrap();
        store.capture(&file, "config_js").unwrap();
        fs::write(&file, "const a = 2;\n").unwrap();
        let second = store.capture(&file, "config_js").unwrap();

        let names: Vec<String> = fs::read_dir(&snapshots)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["config_js.json".to_string()]);
        assert_eq!(store.load("config_js").unwrap(), Some(second));
    }

    #[test]
    fn test_failed_capture_keeps_previous_record() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("regression.py");
        let store = SnapshotStore::new(dir.path().join("snapshots"));
        fs::write(&file, "def fit():\n    pass\n").unwrap();
        let first = store.capture(&file, "regression").unwrap();

        fs::remove_file(&file).unwrap();
        assert!(store.capture(&file, "regression").is_err());
        assert_eq!(store.load("regression").unwrap(), Some(first));
    }

    #[test]
    fn test_capture_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("snapshots"));
        let err = store.capture(&dir.path().join("gone.py"), "gone").unwrap_err();
        assert!(matches!(err, CheckError::NotFound(_)));
        assert!(store.load("gone").unwrap().is_none());
    }

    #[test]
    fn test_rejects_unsafe_names() {
        let store = SnapshotStore::new("snapshots");
        for name in ["", "../escape", "a/b", ".hidden", "sp ace"] {
            assert!(
                matches!(store.record_path(name), Err(CheckError::InvalidSnapshotName(_))),
                "name {name:?} should be rejected"
            );
        }
        assert!(store.record_path("settings_html").is_ok());
        assert!(store.record_path("v1.2-final").is_ok());
    }

    #[test]
    fn test_corrupt_record_is_an_error() {
        let dir = TempDir::new().unwrap();
        let snapshots = dir.path().join("snapshots");
        fs::create_dir_all(&snapshots).unwrap();
        fs::write(snapshots.join("broken.json"), "not json").unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();

        let err = SnapshotStore::new(&snapshots).compare(&file, "broken").unwrap_err();
        assert!(matches!(err, CheckError::Json { .. }));
    }

    #[test]
    fn test_baseline_capture_and_compare() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("GUI")).unwrap();
        fs::write(dir.path().join("GUI/settings.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("GUI/config.js"), "let a;").unwrap();
        let layout = ProjectLayout::new(dir.path());
        let store = SnapshotStore::new(dir.path().join("tests/snapshots"));

        let entries = capture_baseline(&layout, &store).unwrap();
        assert_eq!(entries.len(), SNAPSHOT_TARGETS.len());
        let created: Vec<&str> = entries
            .iter()
            .filter_map(|e| match e {
                BaselineEntry::Created { name, .. } => Some(*name),
                BaselineEntry::Skipped { .. } => None,
            })
            .collect();
        assert_eq!(created, vec!["settings_html", "config_js"]);

        fs::write(dir.path().join("GUI/config.js"), "let b;").unwrap();
        fs::write(dir.path().join("GUI/settings.css"), "p {}").unwrap();

        let drifts = compare_baseline(&layout, &store).unwrap();
        let by_name = |n: &str| drifts.iter().find(|d| d.name == n).unwrap();
        assert!(by_name("settings_html").is_clean());
        assert!(matches!(
            by_name("config_js").comparison,
            Some(SnapshotComparison::Changed { .. })
        ));
        assert_eq!(
            by_name("settings_css").comparison,
            Some(SnapshotComparison::NoBaseline)
        );
        assert_eq!(by_name("app_init").comparison, None);
        assert!(!by_name("app_init").is_clean());
    }
}
