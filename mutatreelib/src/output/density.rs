//! Per-line mutant density reports.
//!
//! The report is a headerless two-column CSV, `line,count`, sorted by line
//! number.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, Trim, WriterBuilder};

use crate::error::MutatreeError;
use crate::Result;

/// Line number to number of mutants generated on that line.
pub type DensityMap = BTreeMap<u32, u32>;

fn write_rows<W: io::Write>(writer: &mut csv::Writer<W>, density: &DensityMap) -> csv::Result<()> {
    for row in density {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Render a density map in report form.
pub fn format_density(density: &DensityMap) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    write_rows(&mut writer, density)?;

    let bytes = writer
        .into_inner()
        .map_err(|e| MutatreeError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse a density report. Empty lines are ignored.
pub fn parse_density(text: &str) -> Result<DensityMap> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut density = DensityMap::new();
    for record in reader.records() {
        let record = record?;
        let invalid = || MutatreeError::InvalidDensity {
            line: record.position().map_or(0, |p| p.line() as usize),
            content: record.iter().collect::<Vec<_>>().join(","),
        };

        let (line, count): (u32, u32) = record.deserialize(None).map_err(|_| invalid())?;
        if line == 0 {
            return Err(invalid());
        }

        density.insert(line, count);
    }

    Ok(density)
}

/// Write a density report, replacing any previous one at `path`.
pub fn write_density(path: &Path, density: &DensityMap) -> Result<()> {
    let to_write_error = |e: csv::Error| MutatreeError::FileWrite {
        path: path.to_path_buf(),
        source: e.into(),
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(to_write_error)?;
    write_rows(&mut writer, density).map_err(to_write_error)
}

/// Read a density report from disk.
pub fn read_density(path: &Path) -> Result<DensityMap> {
    let text = std::fs::read_to_string(path).map_err(|source| MutatreeError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_density(&text)
}
