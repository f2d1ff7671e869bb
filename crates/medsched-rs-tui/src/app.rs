//! Application state for the MedSched TUI.

use log::{debug, info, warn};
use medsched_rs_core::{
    CreateOutcome, InMemoryPatientStore, PatientDirectory, PatientRow, PatientStore, Reminder,
    ReminderSink, SchedulerError,
};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Form inputs in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    /// Patient name.
    Name,
    /// Patient email, also the lookup key.
    Email,
    /// Appointment date (`DD-MM-YYYY`).
    Date,
    /// Appointment time (`HH:MM`).
    Time,
}

impl InputField {
    /// All inputs in the order they are drawn.
    pub const ALL: [InputField; 4] = [Self::Name, Self::Email, Self::Date, Self::Time];

    /// Label shown on the input border.
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Date => "Date (DD-MM-YYYY)",
            Self::Time => "Time (HH:MM)",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Name => Self::Email,
            Self::Email => Self::Date,
            Self::Date => Self::Time,
            Self::Time => Self::Name,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Name => Self::Time,
            Self::Email => Self::Name,
            Self::Date => Self::Email,
            Self::Time => Self::Date,
        }
    }
}

/// Reminder sink that queues notifications for the pop-up.
#[derive(Debug, Default)]
pub struct ReminderQueue {
    pending: Mutex<VecDeque<Reminder>>,
}

impl ReminderQueue {
    /// Reminder currently shown, if any.
    pub fn front(&self) -> Option<Reminder> {
        self.pending.lock().front().cloned()
    }

    /// Drop the reminder currently shown.
    pub fn dismiss(&self) -> Option<Reminder> {
        self.pending.lock().pop_front()
    }

    /// Number of reminders waiting, including the one shown.
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    /// True when no pop-up should be drawn.
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl ReminderSink for ReminderQueue {
    fn deliver(&self, reminder: &Reminder) {
        self.pending.lock().push_back(reminder.clone());
    }
}

/// Top-level application state for the TUI.
pub struct App<S = InMemoryPatientStore> {
    /// Header title.
    pub title: String,
    /// Reminder pop-up title.
    pub reminder_title: String,
    /// Name input buffer.
    pub name: String,
    /// Email input buffer.
    pub email: String,
    /// Date input buffer.
    pub date: String,
    /// Time input buffer.
    pub time: String,
    /// Input receiving keystrokes.
    pub focus: InputField,
    /// Table rows rebuilt after each mutation.
    pub rows: Vec<PatientRow>,
    /// Latest diagnostic.
    pub status: String,
    /// Pending reminder notifications.
    pub reminders: ReminderQueue,
    history: VecDeque<String>,
    history_limit: usize,
    directory: PatientDirectory<S>,
}

impl App {
    /// Create application state over an empty in-memory directory.
    pub fn new() -> Self {
        Self::with_directory(PatientDirectory::new())
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PatientStore> App<S> {
    /// Create application state over an existing directory.
    pub fn with_directory(directory: PatientDirectory<S>) -> Self {
        let rows = directory.rows();
        Self {
            title: "Medical Appointment Scheduler".to_string(),
            reminder_title: "Reminder".to_string(),
            name: String::new(),
            email: String::new(),
            date: String::new(),
            time: String::new(),
            focus: InputField::Name,
            rows,
            status: "ready".to_string(),
            reminders: ReminderQueue::default(),
            history: VecDeque::new(),
            history_limit: 50,
            directory,
        }
    }

    /// Limit how many diagnostics are retained.
    pub fn set_history_limit(&mut self, limit: usize) {
        self.history_limit = limit.max(1);
        self.trim_history();
    }

    /// Borrow the underlying directory.
    pub fn directory(&self) -> &PatientDirectory<S> {
        &self.directory
    }

    /// Diagnostics, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Set the status line and record it in the history.
    pub fn push_status(&mut self, status: impl Into<String>) {
        let status = status.into();
        self.history.push_back(status.clone());
        self.trim_history();
        self.status = status;
    }

    /// Buffer for the focused input.
    pub fn input(&self, field: InputField) -> &str {
        match field {
            InputField::Name => &self.name,
            InputField::Email => &self.email,
            InputField::Date => &self.date,
            InputField::Time => &self.time,
        }
    }

    fn input_mut(&mut self, field: InputField) -> &mut String {
        match field {
            InputField::Name => &mut self.name,
            InputField::Email => &mut self.email,
            InputField::Date => &mut self.date,
            InputField::Time => &mut self.time,
        }
    }

    /// Move focus to the next input.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus to the previous input.
    pub fn focus_previous(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Append a character to the focused input.
    pub fn insert_char(&mut self, ch: char) {
        let focus = self.focus;
        self.input_mut(focus).push(ch);
    }

    /// Delete the last character of the focused input.
    pub fn backspace(&mut self) {
        let focus = self.focus;
        self.input_mut(focus).pop();
    }

    /// Create a patient from the name and email inputs.
    pub fn create_patient(&mut self) {
        let result = self.directory.create_patient(&self.name, &self.email);
        match result {
            Ok(CreateOutcome::Created) => {
                self.refresh();
                self.push_status(format!("created patient {}", self.email));
            }
            Ok(CreateOutcome::AlreadyExists) => {
                debug!("create ignored for existing patient (email={})", self.email);
                self.push_status(format!("patient {} already exists", self.email));
            }
            Err(err) => self.report(err),
        }
    }

    /// Schedule an appointment from the email, date, and time inputs.
    pub fn schedule_appointment(&mut self) {
        let result = self
            .directory
            .schedule_appointment(&self.email, &self.date, &self.time);
        match result {
            Ok(appointment) => {
                self.refresh();
                self.push_status(format!("scheduled {appointment} for {}", self.email));
            }
            Err(err) => self.report(err),
        }
    }

    /// Queue reminders for every appointment of the patient in the email input.
    pub fn send_reminder(&mut self) {
        match self.directory.send_reminder(&self.email, &self.reminders) {
            Ok(0) => self.push_status(format!("no appointments for {}", self.email)),
            Ok(count) => {
                info!("queued reminders (email={}, count={count})", self.email);
                self.push_status(format!("sent {count} reminder(s) to {}", self.email));
            }
            Err(err) => self.report(err),
        }
    }

    /// Dismiss the reminder pop-up currently shown.
    pub fn dismiss_reminder(&mut self) {
        if let Some(reminder) = self.reminders.dismiss() {
            debug!("dismissed reminder (patient={})", reminder.patient_name);
        }
    }

    fn refresh(&mut self) {
        self.rows = self.directory.rows();
    }

    fn report(&mut self, err: SchedulerError) {
        warn!("operation rejected: {err}");
        self.push_status(err.to_string());
    }

    fn trim_history(&mut self) {
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
    }
}
