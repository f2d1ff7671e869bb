use medsched_rs_core::{InMemoryPatientStore, PatientRecord, PatientStore, StoreError};

/// Store that reads like the in-memory store but rejects every insert.
#[derive(Default)]
pub struct FailingStore {
    inner: InMemoryPatientStore,
    reason: String,
}

impl FailingStore {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            inner: InMemoryPatientStore::new(),
            reason: reason.into(),
        }
    }
}

impl PatientStore for FailingStore {
    fn contains(&self, email: &str) -> bool {
        self.inner.contains(email)
    }

    fn get(&self, email: &str) -> Option<&PatientRecord> {
        self.inner.get(email)
    }

    fn get_mut(&mut self, email: &str) -> Option<&mut PatientRecord> {
        self.inner.get_mut(email)
    }

    fn insert(&mut self, _record: PatientRecord) -> Result<(), StoreError> {
        Err(StoreError::Rejected(self.reason.clone()))
    }

    fn records(&self) -> Box<dyn Iterator<Item = &PatientRecord> + '_> {
        self.inner.records()
    }

    fn len(&self) -> usize {
        self.inner.len()
    }
}
