//! In-memory patient store

use std::collections::HashMap;

use parking_lot::RwLock;

use super::{validate, PatientLookup, PatientRepository, RepositoryError};
use crate::patient::PatientRecord;

/// Patient store backed by a locked hash map
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: RwLock<HashMap<String, PatientRecord>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing records, later duplicates win
    pub fn with_records(records: impl IntoIterator<Item = PatientRecord>) -> Self {
        let records = records
            .into_iter()
            .map(|r| (r.id().to_string(), r))
            .collect();
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl PatientLookup for InMemoryRepository {
    fn get_by_id(&self, id: &str) -> Result<PatientRecord, RepositoryError> {
        let records = self.records.read();
        records
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }
}

impl PatientRepository for InMemoryRepository {
    fn add(&self, record: PatientRecord) -> Result<String, RepositoryError> {
        validate(&record)?;

        let mut records = self.records.write();
        if records.contains_key(record.id()) {
            return Err(RepositoryError::AlreadyExists(record.id().to_string()));
        }

        let id = record.id().to_string();
        records.insert(id.clone(), record);
        Ok(id)
    }

    fn update(&self, record: PatientRecord) -> Result<PatientRecord, RepositoryError> {
        let mut records = self.records.write();
        match records.get_mut(record.id()) {
            Some(existing) => Ok(std::mem::replace(existing, record)),
            None => Err(RepositoryError::NotFound(record.id().to_string())),
        }
    }

    fn remove(&self, id: &str) -> Result<PatientRecord, RepositoryError> {
        let mut records = self.records.write();
        records
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    fn list(&self) -> Vec<PatientRecord> {
        let records = self.records.read();
        let mut all: Vec<PatientRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }
}
