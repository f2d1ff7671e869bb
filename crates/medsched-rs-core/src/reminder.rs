//! Reminder notifications and the sink that receives them.

use crate::model::{Appointment, PatientRecord};
use std::fmt;

/// One notification restating a single appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    /// Name of the patient the appointment belongs to.
    pub patient_name: String,
    /// Appointment being restated.
    pub appointment: Appointment,
}

impl Reminder {
    /// `"<date> at <HH:MM>"`, used in digests.
    pub fn when(&self) -> String {
        format!(
            "{} at {}",
            self.appointment.date(),
            self.appointment.time_label()
        )
    }
}

impl fmt::Display for Reminder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reminder for {}: {}", self.patient_name, self.when())
    }
}

/// Receiver for reminders, called once per appointment in stored order.
pub trait ReminderSink {
    fn deliver(&self, reminder: &Reminder);
}

/// Build reminders for every appointment on a record.
pub(crate) fn reminders_for(record: &PatientRecord) -> Vec<Reminder> {
    record
        .appointments()
        .iter()
        .map(|appointment| Reminder {
            patient_name: record.name().to_string(),
            appointment: *appointment,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Reminder, reminders_for};
    use crate::parse::parse_appointment;
    use crate::PatientRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn reminder_text_matches_notification_format() {
        let reminder = Reminder {
            patient_name: "Ana".to_string(),
            appointment: parse_appointment("15-03-2025", "14:30").expect("parse"),
        };
        assert_eq!(reminder.to_string(), "Reminder for Ana: 2025-03-15 at 14:30");
        assert_eq!(reminder.when(), "2025-03-15 at 14:30");
    }

    #[test]
    fn reminders_follow_record_order() {
        let mut record = PatientRecord::new("Ana", "ana@x.com");
        record.schedule(parse_appointment("02-02-2026", "08:00").expect("parse"));
        record.schedule(parse_appointment("01-01-2026", "17:45").expect("parse"));
        let lines: Vec<String> = reminders_for(&record)
            .iter()
            .map(Reminder::to_string)
            .collect();
        assert_eq!(
            lines,
            vec![
                "Reminder for Ana: 2026-02-02 at 08:00".to_string(),
                "Reminder for Ana: 2026-01-01 at 17:45".to_string(),
            ]
        );
    }
}
