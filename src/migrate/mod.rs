//! CSV-to-MongoDB migration
//!
//! Imports an admissions CSV export into the configured collection:
//! - rows are validated before anything touches the database
//! - rows are grouped into one document per patient
//! - the collection is wiped before insert unless `keep_existing` is set
//! - inserts are batched with progress reporting
//! - lookup indexes are created and the migrated documents verified
//!   (count matches, required fields present) after the data lands

mod error;
mod transform;
mod validate;

pub use error::MigrateError;
pub use transform::{patient_id, transform_rows, AdmissionRow};
pub use validate::validate_rows;

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use mongodb::bson::{doc, Document};
use mongodb::{Collection, IndexModel};

use crate::models::Patient;
use crate::output;

const INSERT_BATCH_SIZE: usize = 500;

/// Outcome summary returned by `run_migration`.
#[derive(Debug)]
pub struct MigrationReport {
    pub rows_read: usize,
    pub patients_written: usize,
}

/// Read and deserialize every row of the source CSV.
pub fn load_csv(path: &Path) -> Result<Vec<AdmissionRow>, MigrateError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Run the full migration against `collection`.
///
/// Steps run strictly in order and the first error aborts the rest; a
/// partially-loaded collection is left as-is for inspection.
pub async fn run_migration(
    collection: &Collection<Patient>,
    data_file: &Path,
    keep_existing: bool,
) -> Result<MigrationReport, MigrateError> {
    if !data_file.exists() {
        return Err(MigrateError::DataFileNotFound(
            data_file.display().to_string(),
        ));
    }

    tracing::info!(file = %data_file.display(), "Starting migration");

    output::status(format!(
        "Step 1/7: Loading CSV from {}...",
        data_file.display()
    ));
    let rows = load_csv(data_file)?;
    output::status(format!("  {} rows read", rows.len()));

    output::status("Step 2/7: Validating rows...".to_string());
    validate_rows(&rows)?;
    output::status("  CSV integrity checks passed".to_string());

    output::status("Step 3/7: Grouping rows into patient documents...".to_string());
    let patients = transform_rows(&rows);
    output::status(format!("  {} patients", patients.len()));

    if keep_existing {
        output::status("Step 4/7: Keeping existing documents (--keep-existing)".to_string());
    } else {
        output::status("Step 4/7: Clearing the target collection...".to_string());
        let deleted = collection.delete_many(doc! {}).await?;
        output::status(format!("  {} documents removed", deleted.deleted_count));
    }

    output::status(format!("Step 5/7: Inserting {} patients...", patients.len()));
    let pb = ProgressBar::new(patients.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{wide_bar:.cyan/blue}] {pos}/{len} patients ({eta}) {msg}")?
            .progress_chars("#>-"),
    );
    for chunk in patients.chunks(INSERT_BATCH_SIZE) {
        collection.insert_many(chunk).await?;
        pb.inc(chunk.len() as u64);
    }
    pb.finish_with_message("Insert complete");

    output::status("Step 6/7: Creating indexes...".to_string());
    create_lookup_indexes(collection).await?;

    output::status("Step 7/7: Verifying migrated documents...".to_string());
    // The count check only holds when the collection was wiped first
    let expected_count = if keep_existing {
        None
    } else {
        Some(patients.len() as u64)
    };
    verify_migrated_documents(collection, expected_count).await?;
    output::status("  MongoDB integrity checks passed".to_string());

    tracing::info!(
        rows = rows.len(),
        patients = patients.len(),
        "Migration finished"
    );

    Ok(MigrationReport {
        rows_read: rows.len(),
        patients_written: patients.len(),
    })
}

/// Indexes backing the two common lookups: by patient name and by the
/// condition recorded on an admission.
async fn create_lookup_indexes(collection: &Collection<Patient>) -> mongodb::error::Result<()> {
    for keys in [doc! { "name": 1 }, doc! { "admissions.medical_condition": 1 }] {
        collection
            .create_index(IndexModel::builder().keys(keys).build())
            .await?;
    }
    Ok(())
}

/// Post-insert integrity checks: the collection holds exactly the documents
/// written (when a count is expected) and a sampled document carries the
/// required fields. The sample is read as a raw document so a field dropped
/// on the wire is caught rather than papered over by deserialization.
async fn verify_migrated_documents(
    collection: &Collection<Patient>,
    expected_count: Option<u64>,
) -> Result<(), MigrateError> {
    if let Some(expected) = expected_count {
        let found = collection.count_documents(doc! {}).await?;
        if found != expected {
            return Err(MigrateError::CountMismatch { expected, found });
        }
    }

    let sample = collection
        .clone_with_type::<Document>()
        .find_one(doc! {})
        .await?;
    if let Some(sample) = sample {
        for field in ["_id", "name", "age", "gender", "admissions"] {
            if !sample.contains_key(field) {
                return Err(MigrateError::MissingField(field));
            }
        }
    }

    Ok(())
}
