//! Patient directory: validated create, schedule and remind operations.

use crate::error::{Field, SchedulerError};
use crate::model::{Appointment, PatientRecord, PatientRow};
use crate::parse::parse_appointment;
use crate::reminder::{Reminder, ReminderSink, reminders_for};
use crate::store::{InMemoryPatientStore, PatientStore};
use log::{debug, info};

/// Result of a successful `create_patient` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new record was inserted.
    Created,
    /// A record already existed for the email and was left untouched.
    AlreadyExists,
}

/// Collection of patient records keyed by email.
///
/// Owned by whoever drives the session (the UI app, or a test). Every
/// operation validates its raw text inputs and either mutates state or
/// returns an error with state unchanged.
#[derive(Debug, Clone, Default)]
pub struct PatientDirectory<S = InMemoryPatientStore> {
    store: S,
}

impl PatientDirectory {
    /// Create an empty in-memory directory.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: PatientStore> PatientDirectory<S> {
    /// Create a directory over an explicit store.
    pub fn with_store(store: S) -> Self {
        Self { store }
    }

    /// Register a patient unless the email is already known.
    ///
    /// An existing email is a no-op: the stored name and appointments are
    /// preserved and [`CreateOutcome::AlreadyExists`] is returned.
    pub fn create_patient(
        &mut self,
        name: &str,
        email: &str,
    ) -> Result<CreateOutcome, SchedulerError> {
        require(name, Field::Name)?;
        require(email, Field::Email)?;

        if self.store.contains(email) {
            debug!("create skipped, patient exists (email={email})");
            return Ok(CreateOutcome::AlreadyExists);
        }

        self.store.insert(PatientRecord::new(name, email))?;
        info!(
            "created patient (email={email}, total={})",
            self.store.len()
        );
        Ok(CreateOutcome::Created)
    }

    /// Look up a record by exact email.
    pub fn find(&self, email: &str) -> Result<&PatientRecord, SchedulerError> {
        self.store
            .get(email)
            .ok_or_else(|| SchedulerError::NotFound(email.to_string()))
    }

    /// Parse and append an appointment to an existing record.
    ///
    /// Checks run in order: blank email, blank date, blank time, format of
    /// both texts, then existence. An unknown email with bad date text
    /// therefore reports `InvalidFormat`.
    pub fn schedule_appointment(
        &mut self,
        email: &str,
        date_text: &str,
        time_text: &str,
    ) -> Result<Appointment, SchedulerError> {
        require(email, Field::Email)?;
        require(date_text, Field::Date)?;
        require(time_text, Field::Time)?;
        let appointment = parse_appointment(date_text, time_text)?;

        let record = self
            .store
            .get_mut(email)
            .ok_or_else(|| SchedulerError::NotFound(email.to_string()))?;
        record.schedule(appointment);
        info!(
            "scheduled appointment (email={email}, at={appointment}, count={})",
            record.appointments().len()
        );
        Ok(appointment)
    }

    /// Reminders for every appointment of a patient, in stored order.
    pub fn reminders(&self, email: &str) -> Result<Vec<Reminder>, SchedulerError> {
        require(email, Field::Email)?;
        let record = self.find(email)?;
        Ok(reminders_for(record))
    }

    /// Deliver each reminder to `sink`, returning how many were sent.
    ///
    /// Read-only: calling twice delivers the same reminders again.
    pub fn send_reminder(
        &self,
        email: &str,
        sink: &dyn ReminderSink,
    ) -> Result<usize, SchedulerError> {
        let reminders = self.reminders(email)?;
        for reminder in &reminders {
            sink.deliver(reminder);
        }
        info!(
            "sent reminders (email={email}, count={})",
            reminders.len()
        );
        Ok(reminders.len())
    }

    /// Newline-joined `"<date> at <HH:MM>"` lines for a patient.
    pub fn reminder_digest(&self, email: &str) -> Result<String, SchedulerError> {
        let lines: Vec<String> = self
            .reminders(email)?
            .iter()
            .map(Reminder::when)
            .collect();
        Ok(lines.join("\n"))
    }

    /// Full tabular view, one row per record in creation order.
    pub fn rows(&self) -> Vec<PatientRow> {
        self.store.records().map(PatientRow::from).collect()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

fn require(value: &str, field: Field) -> Result<(), SchedulerError> {
    if value.is_empty() {
        return Err(SchedulerError::EmptyField(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{CreateOutcome, PatientDirectory};
    use crate::{Field, SchedulerError};
    use pretty_assertions::assert_eq;

    #[test]
    fn create_checks_name_before_email() {
        let mut directory = PatientDirectory::new();
        assert_eq!(
            directory.create_patient("", ""),
            Err(SchedulerError::EmptyField(Field::Name))
        );
        assert_eq!(
            directory.create_patient("Ana", ""),
            Err(SchedulerError::EmptyField(Field::Email))
        );
        assert!(directory.is_empty());
    }

    #[test]
    fn whitespace_only_name_is_not_blank() {
        let mut directory = PatientDirectory::new();
        assert_eq!(
            directory.create_patient(" ", "ana@x.com"),
            Ok(CreateOutcome::Created)
        );
        assert_eq!(directory.find("ana@x.com").expect("find").name(), " ");
    }

    #[test]
    fn schedule_checks_blank_fields_in_order() {
        let mut directory = PatientDirectory::new();
        assert_eq!(
            directory.schedule_appointment("", "", ""),
            Err(SchedulerError::EmptyField(Field::Email))
        );
        assert_eq!(
            directory.schedule_appointment("a@b.com", "", ""),
            Err(SchedulerError::EmptyField(Field::Date))
        );
        assert_eq!(
            directory.schedule_appointment("a@b.com", "01-01-2025", ""),
            Err(SchedulerError::EmptyField(Field::Time))
        );
    }

    #[test]
    fn format_error_wins_over_missing_patient() {
        let mut directory = PatientDirectory::new();
        assert_eq!(
            directory.schedule_appointment("ghost@x.com", "2025-01-01", "09:00"),
            Err(SchedulerError::InvalidFormat)
        );
        assert_eq!(
            directory.schedule_appointment("ghost@x.com", "01-01-2025", "09:00"),
            Err(SchedulerError::NotFound("ghost@x.com".to_string()))
        );
    }

    #[test]
    fn reminder_requires_email() {
        let directory = PatientDirectory::new();
        assert_eq!(
            directory.reminders(""),
            Err(SchedulerError::EmptyField(Field::Email))
        );
        assert_eq!(
            directory.reminders("nobody@x.com"),
            Err(SchedulerError::NotFound("nobody@x.com".to_string()))
        );
    }

    #[test]
    fn digest_lists_each_appointment() {
        let mut directory = PatientDirectory::new();
        directory.create_patient("Ana", "ana@x.com").expect("create");
        assert_eq!(directory.reminder_digest("ana@x.com").expect("digest"), "");
        directory
            .schedule_appointment("ana@x.com", "15-03-2025", "14:30")
            .expect("schedule");
        directory
            .schedule_appointment("ana@x.com", "16-03-2025", "08:05")
            .expect("schedule");
        assert_eq!(
            directory.reminder_digest("ana@x.com").expect("digest"),
            "2025-03-15 at 14:30\n2025-03-16 at 08:05"
        );
    }
}
