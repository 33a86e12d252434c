use anyhow::{Context, Result};
use log::info;
use std::path::Path;

use crate::alignment::{self, AlignmentRecord};
use crate::file_utils::FileManager;

// @module: Translation placeholder output

/// Write `records` verbatim as a file for an external translation step to fill.
///
/// The parent directory is created when missing.
pub fn emit_placeholder<P: AsRef<Path>>(records: &[AlignmentRecord], path: P) -> Result<()> {
    let path = path.as_ref();

    let json = alignment::to_json(records).context("Failed to serialize alignment records")?;
    FileManager::write_to_file(path, &json)?;

    info!("Created placeholder translation file: {}", path.display());
    info!("Fill in the 'ja' field of each record, then render it with `docalign render`");

    Ok(())
}
