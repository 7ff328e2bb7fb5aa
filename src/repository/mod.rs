//! Patient record stores
//!
//! [`PatientLookup`] is the read-only capability the evaluator depends on.
//! [`PatientRepository`] extends it with the mutations used by the CLI.

pub mod file;
pub mod memory;

pub use file::FileRepository;
pub use memory::InMemoryRepository;

use crate::patient::PatientRecord;

/// Read access to baseline patient records
pub trait PatientLookup: Send + Sync {
    /// Fetch a record by patient id
    fn get_by_id(&self, id: &str) -> Result<PatientRecord, RepositoryError>;
}

/// Writable patient store
pub trait PatientRepository: PatientLookup {
    /// Store a new record, returning its id
    fn add(&self, record: PatientRecord) -> Result<String, RepositoryError>;

    /// Replace an existing record, returning the previous version
    fn update(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError>;

    /// Delete a record, returning it
    fn remove(&self, id: &str) -> Result<PatientRecord, RepositoryError>;

    /// All records, ordered by id
    fn list(&self) -> Vec<PatientRecord>;
}

/// Repository errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Patient not found: {0}")]
    NotFound(String),

    #[error("Patient already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid patient record: {0}")]
    InvalidRecord(String),

    #[error("Failed to parse record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reject records that cannot be addressed by id
pub(crate) fn validate(record: &PatientRecord) -> Result<(), RepositoryError> {
    if record.id().trim().is_empty() {
        return Err(RepositoryError::InvalidRecord(
            "patient id must not be empty".to_string(),
        ));
    }
    Ok(())
}
