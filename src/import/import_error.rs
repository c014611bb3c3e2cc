use std::error::Error;
use std::fmt;

/// File-level bulk-import failures. Each aborts the whole import before
/// (or, for `Persistence`, after) row processing; per-row problems are
/// collected in the report instead.
#[derive(Debug)]
pub enum ImportError {
    /// Declared filename does not end in ".csv".
    NotCsv { filename: String },
    /// No attempted encoding could decode the byte stream.
    UnreadableFile,
    /// Header is missing required columns.
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },
    /// No data rows left after dropping blank ones.
    EmptyInput,
    /// Every row was rejected; carries the first few row errors.
    NothingImported { errors: Vec<String> },
    /// The accepted batch could not be committed; nothing was written.
    Persistence(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::NotCsv { filename } => {
                write!(f, "Please upload a CSV file (got '{filename}')")
            }
            ImportError::UnreadableFile => write!(f, "Could not decode file contents"),
            ImportError::MissingColumns { missing, found } => write!(
                f,
                "Missing required columns: {}. Found columns: {}",
                missing.join(", "),
                found.join(", ")
            ),
            ImportError::EmptyInput => {
                write!(f, "CSV file is empty or contains no valid data")
            }
            ImportError::NothingImported { errors } => write!(
                f,
                "No phones were imported successfully ({} row errors)",
                errors.len()
            ),
            ImportError::Persistence(msg) => write!(f, "Database error: {msg}"),
        }
    }
}

impl Error for ImportError {}
