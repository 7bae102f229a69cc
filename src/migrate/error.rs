/// Error types for the migration module
use thiserror::Error;

/// Errors that can occur while importing the CSV export
#[derive(Debug, Error)]
pub enum MigrateError {
    /// The configured data file does not exist
    #[error("Data file not found: {0}")]
    DataFileNotFound(String),

    /// CSV parsing or I/O failure while reading the export
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A critical column is empty in one of the rows
    #[error("Missing value for '{column}' in row {row}")]
    MissingValue { row: usize, column: &'static str },

    /// Two rows share the same Name + Age patient key
    #[error("Duplicate patient rows detected for '{name}' (age {age})")]
    DuplicatePatient { name: String, age: i32 },

    /// Post-insert count does not match the documents written
    #[error("Document count mismatch after insert: expected {expected}, found {found}")]
    CountMismatch { expected: u64, found: u64 },

    /// A migrated document is missing one of the required fields
    #[error("Migrated document is missing required field '{0}'")]
    MissingField(&'static str),

    /// Error returned by the MongoDB driver
    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    /// Invalid progress bar template
    #[error("Progress template error: {0}")]
    Progress(#[from] indicatif::style::TemplateError),
}
