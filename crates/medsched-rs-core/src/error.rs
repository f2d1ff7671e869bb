//! Error types for the scheduling core.

use std::fmt;
use thiserror::Error;

/// Operator input field that failed a presence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Patient display name.
    Name,
    /// Patient email (directory key).
    Email,
    /// Appointment date text.
    Date,
    /// Appointment time text.
    Time,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "patient name",
            Field::Email => "patient email",
            Field::Date => "appointment date",
            Field::Time => "appointment time",
        };
        f.write_str(label)
    }
}

/// Errors returned by directory operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// A required input was blank.
    #[error("{0} cannot be empty")]
    EmptyField(Field),
    /// Date or time text did not match its fixed format.
    #[error("invalid date or time format; use DD-MM-YYYY for date and HH:MM for time")]
    InvalidFormat,
    /// No record exists for the email.
    #[error("patient not found: {0}")]
    NotFound(String),
    /// The store rejected a new record.
    #[error("failed to create patient record: {0}")]
    ConstructionFailure(String),
}

/// Errors raised behind the storage boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Backend refused the write.
    #[error("store rejected write: {0}")]
    Rejected(String),
}

impl From<StoreError> for SchedulerError {
    fn from(err: StoreError) -> Self {
        SchedulerError::ConstructionFailure(err.to_string())
    }
}
