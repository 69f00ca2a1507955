//! oppnda-check - smoke checks for an OppNDA project tree
//!
//! This library validates the JSON configuration files against their
//! required-key schemas, checks that source modules and GUI assets exist and
//! parse, and keeps content-hash snapshots for spotting drift between two
//! points in time. Checks are grouped into suites and run by a
//! fault-isolating batch runner.

pub mod cli;
pub mod config_doc;
pub mod error;
pub mod html;
pub mod layout;
pub mod report;
pub mod runner;
pub mod schema;
pub mod settings;
pub mod snapshot;
pub mod suites;
pub mod syntax;

pub use error::{CheckError, Result};
