//! File system utilities.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const OUTPUT_MARKER: &str = "_translated";

/// Derives the output path by inserting `_translated` before the extension.
///
/// `data/cities.csv` becomes `data/cities_translated.csv`; a file without
/// an extension just gets the marker appended.
pub fn derive_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = match input.extension() {
        Some(ext) => format!("{stem}{OUTPUT_MARKER}.{}", ext.to_string_lossy()),
        None => format!("{stem}{OUTPUT_MARKER}"),
    };
    input.with_file_name(file_name)
}

/// Opens the input file for reading.
pub fn open_input(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("Failed to open input file: {}", path.display()))
}

/// Creates (or truncates) the output file.
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    Ok(BufWriter::new(file))
}
