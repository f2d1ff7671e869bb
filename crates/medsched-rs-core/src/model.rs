//! Patient and appointment records held by the directory.

use crate::parse::TIME_FORMAT;
use chrono::{NaiveDate, NaiveTime};
use std::fmt;

/// A single booking: calendar date plus wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appointment {
    date: NaiveDate,
    time: NaiveTime,
}

impl Appointment {
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Time rendered as `HH:MM`.
    pub fn time_label(&self) -> String {
        self.time.format(TIME_FORMAT).to_string()
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.time_label())
    }
}

/// Stored profile for one patient, including appointment history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRecord {
    name: String,
    email: String,
    /// Insertion order; never sorted or pruned.
    appointments: Vec<Appointment>,
}

impl PatientRecord {
    /// Create an empty record for a patient.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            appointments: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Append an appointment to the end of the history.
    pub fn schedule(&mut self, appointment: Appointment) {
        self.appointments.push(appointment);
    }

    /// Comma-joined `"<date> <HH:MM>"` summary in stored order.
    pub fn appointment_summary(&self) -> String {
        self.appointments
            .iter()
            .map(Appointment::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One line of the tabular directory view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
    /// Patient display name.
    pub name: String,
    /// Patient email.
    pub email: String,
    /// Appointment summary, see [`PatientRecord::appointment_summary`].
    pub appointments: String,
}

impl From<&PatientRecord> for PatientRow {
    fn from(record: &PatientRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            appointments: record.appointment_summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Appointment, PatientRecord, PatientRow};
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn appointment(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> Appointment {
        Appointment::new(
            NaiveDate::from_ymd_opt(y, m, d).expect("date"),
            NaiveTime::from_hms_opt(hh, mm, 0).expect("time"),
        )
    }

    #[test]
    fn appointment_display_pads_time() {
        assert_eq!(appointment(2025, 3, 5, 9, 5).to_string(), "2025-03-05 09:05");
    }

    #[test]
    fn summary_keeps_insertion_order() {
        let mut record = PatientRecord::new("Ana", "ana@x.com");
        record.schedule(appointment(2025, 6, 1, 10, 0));
        record.schedule(appointment(2025, 1, 1, 8, 30));
        assert_eq!(
            record.appointment_summary(),
            "2025-06-01 10:00, 2025-01-01 08:30"
        );
    }

    #[test]
    fn row_of_empty_record_has_blank_summary() {
        let record = PatientRecord::new("Bo", "bo@x.com");
        let row = PatientRow::from(&record);
        assert_eq!(row.name, "Bo");
        assert_eq!(row.email, "bo@x.com");
        assert_eq!(row.appointments, "");
    }
}
