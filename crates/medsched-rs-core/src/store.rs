//! Storage boundary for patient records.

use crate::error::StoreError;
use crate::model::PatientRecord;
use log::debug;
use std::collections::HashMap;

/// Record storage used by [`crate::PatientDirectory`].
///
/// Implementations must keep records in insertion order and must not replace
/// an existing key on `insert`; the directory checks `contains` first.
pub trait PatientStore {
    /// Whether a record exists for the email.
    fn contains(&self, email: &str) -> bool;

    /// Look up a record by exact email.
    fn get(&self, email: &str) -> Option<&PatientRecord>;

    /// Mutable lookup by exact email.
    fn get_mut(&mut self, email: &str) -> Option<&mut PatientRecord>;

    /// Insert a new record under its email.
    fn insert(&mut self, record: PatientRecord) -> Result<(), StoreError>;

    /// All records in insertion order.
    fn records(&self) -> Box<dyn Iterator<Item = &PatientRecord> + '_>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime store; nothing survives a restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPatientStore {
    records: Vec<PatientRecord>,
    index: HashMap<String, usize>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PatientStore for InMemoryPatientStore {
    fn contains(&self, email: &str) -> bool {
        self.index.contains_key(email)
    }

    fn get(&self, email: &str) -> Option<&PatientRecord> {
        self.index.get(email).map(|idx| &self.records[*idx])
    }

    fn get_mut(&mut self, email: &str) -> Option<&mut PatientRecord> {
        let idx = *self.index.get(email)?;
        self.records.get_mut(idx)
    }

    fn insert(&mut self, record: PatientRecord) -> Result<(), StoreError> {
        if self.index.contains_key(record.email()) {
            return Err(StoreError::Rejected(format!(
                "duplicate key: {}",
                record.email()
            )));
        }
        let idx = self.records.len();
        self.index.insert(record.email().to_string(), idx);
        self.records.push(record);
        debug!("stored patient record (count={})", self.records.len());
        Ok(())
    }

    fn records(&self) -> Box<dyn Iterator<Item = &PatientRecord> + '_> {
        Box::new(self.records.iter())
    }

    fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryPatientStore, PatientStore};
    use crate::PatientRecord;
    use crate::error::StoreError;
    use pretty_assertions::assert_eq;

    #[test]
    fn records_iterate_in_insertion_order() {
        let mut store = InMemoryPatientStore::new();
        for (name, email) in [("Zed", "z@x.com"), ("Amy", "a@x.com"), ("Max", "m@x.com")] {
            store.insert(PatientRecord::new(name, email)).expect("insert");
        }
        let emails: Vec<&str> = store.records().map(PatientRecord::email).collect();
        assert_eq!(emails, vec!["z@x.com", "a@x.com", "m@x.com"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn insert_refuses_existing_key() {
        let mut store = InMemoryPatientStore::new();
        store
            .insert(PatientRecord::new("Ana", "ana@x.com"))
            .expect("insert");
        let err = store
            .insert(PatientRecord::new("Other", "ana@x.com"))
            .unwrap_err();
        assert!(matches!(err, StoreError::Rejected(_)));
        assert_eq!(store.get("ana@x.com").map(PatientRecord::name), Some("Ana"));
    }

    #[test]
    fn lookup_is_exact_match() {
        let mut store = InMemoryPatientStore::new();
        store
            .insert(PatientRecord::new("Ana", "ana@x.com"))
            .expect("insert");
        assert!(store.contains("ana@x.com"));
        assert!(!store.contains("ANA@x.com"));
        assert!(!store.contains(" ana@x.com"));
        assert!(store.get_mut("ana@x.com").is_some());
    }
}
