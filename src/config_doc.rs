//! Loading and round-tripping configuration documents

use crate::error::{CheckError, Result};
use crate::schema::{SchemaDescriptor, ANALYSIS_SCHEMA, AVERAGER_SCHEMA, REGRESSION_SCHEMA};
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// The three configuration files of an OppNDA tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    Analysis,
    Averager,
    Regression,
}

impl ConfigKind {
    /// All kinds, in report order
    pub const ALL: [ConfigKind; 3] = [
        ConfigKind::Analysis,
        ConfigKind::Averager,
        ConfigKind::Regression,
    ];

    /// File name inside `config/`
    pub fn file_name(self) -> &'static str {
        match self {
            ConfigKind::Analysis => "analysis_config.json",
            ConfigKind::Averager => "averager_config.json",
            ConfigKind::Regression => "regression_config.json",
        }
    }

    /// Schema the file is validated against
    pub fn schema(self) -> &'static SchemaDescriptor {
        match self {
            ConfigKind::Analysis => &ANALYSIS_SCHEMA,
            ConfigKind::Averager => &AVERAGER_SCHEMA,
            ConfigKind::Regression => &REGRESSION_SCHEMA,
        }
    }

    /// Label prefix used in suite reports
    pub fn label(self) -> &'static str {
        match self {
            ConfigKind::Analysis => "Analysis",
            ConfigKind::Averager => "Averager",
            ConfigKind::Regression => "Regression",
        }
    }
}

/// Read and parse a JSON document
///
/// Only well-formedness is checked here; shape is the schema check's job.
pub fn load_document(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|e| CheckError::io(path, e))?;
    let document = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            CheckError::Io {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            CheckError::Json {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    tracing::debug!(path = %path.display(), "loaded config document");
    Ok(document)
}

/// Write `document` to a scratch file in `scratch_dir`, reload it, and
/// require the reloaded value to equal the original
///
/// The scratch file is deleted when this returns.
pub fn verify_round_trip(document: &Value, scratch_dir: &Path) -> Result<()> {
    let mut scratch = tempfile::Builder::new()
        .prefix("round_trip_")
        .suffix(".json")
        .tempfile_in(scratch_dir)
        .map_err(|e| CheckError::io(scratch_dir, e))?;
    let scratch_path: PathBuf = scratch.path().to_path_buf();

    {
        let mut writer = BufWriter::new(scratch.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, document).map_err(|source| {
            CheckError::Json {
                path: scratch_path.clone(),
                source,
            }
        })?;
        writer
            .flush()
            .map_err(|e| CheckError::io(&scratch_path, e))?;
    }

    let file = scratch.as_file_mut();
    file.seek(SeekFrom::Start(0))
        .map_err(|e| CheckError::io(&scratch_path, e))?;
    let reloaded: Value =
        serde_json::from_reader(BufReader::new(&*file)).map_err(|source| CheckError::Json {
            path: scratch_path.clone(),
            source,
        })?;

    if &reloaded == document {
        Ok(())
    } else {
        tracing::warn!(path = %scratch_path.display(), "round trip changed document");
        Err(CheckError::RoundTripMismatch(scratch_path))
    }
}
