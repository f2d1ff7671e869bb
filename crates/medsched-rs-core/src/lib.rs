//! Scheduling core for MedSched.
//!
//! Owns the patient directory, the appointment model, input validation, and
//! reminder delivery. Presentation layers call into [`PatientDirectory`] and
//! rebuild their views from [`PatientDirectory::rows`] after each mutation.

pub mod directory;
pub mod error;
pub mod model;
pub mod parse;
pub mod reminder;
pub mod store;

/// Directory facade and create outcome.
pub use directory::{CreateOutcome, PatientDirectory};
/// Error types.
pub use error::{Field, SchedulerError, StoreError};
/// Record and view models.
pub use model::{Appointment, PatientRecord, PatientRow};
/// Reminder notification and sink interface.
pub use reminder::{Reminder, ReminderSink};
/// Storage boundary and default in-memory store.
pub use store::{InMemoryPatientStore, PatientStore};
