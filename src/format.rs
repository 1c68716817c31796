//! Serialization format resolved from a filename extension

use std::fmt;

use crate::error::{StoreError, StoreResult};

/// Recognized serialization formats.
///
/// Resolution happens once, from the substring after the final `.` in a
/// filename; the codec then dispatches on the variant exhaustively, so an
/// unrecognized format can never reach the encode/decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Comma-separated values (`.csv`)
    Csv,
    /// Tab-separated values (`.tsv`)
    Tsv,
    /// JSON text (`.json`)
    Json,
    /// Plain UTF-8 text (`.txt`)
    Text,
}

impl Format {
    /// Resolve the format from the extension after the final `.` in `filename`.
    ///
    /// Matching is case-insensitive. Fails with [`StoreError::NoExtension`]
    /// when the filename contains no `.` and [`StoreError::UnsupportedFormat`]
    /// when the extension is not recognized.
    pub fn from_filename(filename: &str) -> StoreResult<Self> {
        let (_, extension) = filename
            .rsplit_once('.')
            .ok_or_else(|| StoreError::NoExtension {
                filename: filename.to_string(),
            })?;

        match extension.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "txt" => Ok(Self::Text),
            other => Err(StoreError::UnsupportedFormat {
                extension: other.to_string(),
            }),
        }
    }

    /// Content-Type sent alongside uploaded objects
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Tsv => "text/tab-separated-values",
            Self::Json => "application/json",
            Self::Text => "text/plain",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}
