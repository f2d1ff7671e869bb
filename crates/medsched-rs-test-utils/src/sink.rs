use medsched_rs_core::{Reminder, ReminderSink};
use parking_lot::Mutex;

/// Sink that keeps every delivered reminder in order.
#[derive(Default)]
pub struct RecordingSink {
    delivered: Mutex<Vec<Reminder>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delivered(&self) -> Vec<Reminder> {
        self.delivered.lock().clone()
    }

    /// Delivered reminders rendered as notification text.
    pub fn messages(&self) -> Vec<String> {
        self.delivered
            .lock()
            .iter()
            .map(|reminder| reminder.to_string())
            .collect()
    }

    pub fn clear(&self) {
        self.delivered.lock().clear();
    }
}

impl ReminderSink for RecordingSink {
    fn deliver(&self, reminder: &Reminder) {
        self.delivered.lock().push(reminder.clone());
    }
}
