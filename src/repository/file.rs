//! JSON-lines patient store
//!
//! One serialized [`PatientRecord`] per line. The whole file is loaded on
//! open and rewritten (temp file + rename) after every mutation.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use super::{validate, PatientLookup, PatientRepository, RepositoryError};
use crate::patient::PatientRecord;

/// Patient store persisted to a JSON-lines file
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    records: RwLock<BTreeMap<String, PatientRecord>>,
}

impl FileRepository {
    /// Open a store, loading any records already in the file
    ///
    /// A missing file yields an empty store; it is created on first write.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();

        let records = match fs::read_to_string(&path) {
            Ok(contents) => parse_records(&contents)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            path = %path.display(),
            patients = records.len(),
            "Loaded patient records"
        );

        Ok(Self {
            path,
            records: RwLock::new(records),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, records: &BTreeMap<String, PatientRecord>) -> Result<(), RepositoryError> {
        let mut buf = Vec::new();
        for record in records.values() {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(&buf)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}

fn parse_records(contents: &str) -> Result<BTreeMap<String, PatientRecord>, RepositoryError> {
    let mut records = BTreeMap::new();

    for (idx, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: PatientRecord = serde_json::from_str(line)
            .map_err(|source| RepositoryError::Parse {
                line: idx + 1,
                source,
            })?;
        records.insert(record.id().to_string(), record);
    }

    Ok(records)
}

impl PatientLookup for FileRepository {
    fn get_by_id(&self, id: &str) -> Result<PatientRecord, RepositoryError> {
        let records = self.records.read();
        records
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

impl PatientRepository for FileRepository {
    fn add(&self, record: PatientRecord) -> Result<String, RepositoryError> {
        validate(&record)?;

        let mut records = self.records.write();
        if records.contains_key(record.id()) {
            return Err(RepositoryError::AlreadyExists(record.id().to_string()));
        }

        let id = record.id().to_string();
        records.insert(id.clone(), record);
        if let Err(e) = self.persist(&records) {
            records.remove(&id);
            return Err(e);
        }

        tracing::info!(patient_id = %id, "Patient added");
        Ok(id)
    }

    fn update(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        let mut records = self.records.write();
        let id = record.id().to_string();

        let previous = match records.insert(id.clone(), record) {
            Some(previous) => previous,
            None => {
                records.remove(&id);
                return Err(RepositoryError::NotFound(id));
            }
        };

        if let Err(e) = self.persist(&records) {
            records.insert(id, previous);
            return Err(e);
        }

        tracing::info!(patient_id = %id, "Patient updated");
        Ok(previous)
    }

    fn remove(&self, id: &str) -> Result<PatientRecord, RepositoryError> {
        let mut records = self.records.write();
        let removed = records
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))?;

        if let Err(e) = self.persist(&records) {
            records.insert(id.to_string(), removed);
            return Err(e);
        }

        tracing::info!(patient_id = %id, "Patient removed");
        Ok(removed)
    }

    fn list(&self) -> Vec<PatientRecord> {
        self.records.read().values().cloned().collect()
    }
}
