//! File writers for the bridge table and the run report.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use bridge_model::{RunReport, VariableRecord};
use polars::prelude::*;
use tracing::info;

use crate::error::{OutputError, Result};
use crate::frame::build_output_frame;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    Ok(())
}

/// Write the bridge table as CSV with a header row.
///
/// Records are written in the order given; the pipeline already sorts them
/// by `(year, variable_name)`.
pub fn write_bridge_csv(path: &Path, records: &[VariableRecord]) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut df = build_output_frame(records)?;
    let mut file = File::create(path).map_err(io_error(path))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)?;
    info!(path = %path.display(), rows = df.height(), "bridge table written");
    Ok(())
}

/// Write the run report as pretty-printed JSON.
pub fn write_report_json(path: &Path, report: &RunReport) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(io_error(path))?;
    info!(path = %path.display(), "run report written");
    Ok(())
}
