//! CSV Data Loader Module
//! Reads delimited text from disk and hands it to the parser.

use crate::data::{parse, Dataset, Delimiter};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unknown delimiter: {0:?}")]
    UnknownDelimiter(String),
}

/// Loads delimited files from disk.
pub struct DataLoader;

impl DataLoader {
    /// Read a file as text. Invalid UTF-8 is replaced and a leading BOM is
    /// removed so it never ends up in the first header name.
    pub fn read_text(path: &Path) -> Result<String, DataError> {
        let bytes = fs::read(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(text.trim_start_matches('\u{feff}').to_string())
    }

    /// Read and parse a delimited file.
    pub fn load(path: &Path, delimiter: Delimiter) -> Result<Dataset, DataError> {
        let text = Self::read_text(path)?;
        let dataset = parse(&text, delimiter);
        info!(
            path = %path.display(),
            %delimiter,
            rows = dataset.len(),
            "loaded delimited file"
        );
        Ok(dataset)
    }

    /// File name used as the display name of a loaded source.
    pub fn source_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string())
    }
}

/// Read and parse a delimited file.
pub fn parse_file(path: &Path, delimiter: Delimiter) -> Result<Dataset, DataError> {
    DataLoader::load(path, delimiter)
}
