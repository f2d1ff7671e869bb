//! Library entry point for the MedSched TUI.
//!
//! Provides a reusable [`run`] function that drives the Ratatui terminal UI
//! against a [`PatientDirectory`].

mod app;
mod event;
mod ui;

pub use app::{App, InputField, ReminderQueue};

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use event::AppEvent;
use log::{debug, info};
use medsched_rs_config::MedschedConfig;
use medsched_rs_core::{PatientDirectory, PatientStore};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::{self, Stdout};
use std::time::Duration;

/// Configuration for a TUI session.
#[derive(Debug, Clone)]
pub struct TuiConfig {
    /// Header title.
    pub title: String,
    /// Reminder pop-up title.
    pub reminder_title: String,
    /// Diagnostics retained for the status history.
    pub status_history: usize,
    /// How long to wait for input before redrawing.
    pub poll_interval: Duration,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self::from(&MedschedConfig::default())
    }
}

impl From<&MedschedConfig> for TuiConfig {
    fn from(config: &MedschedConfig) -> Self {
        Self {
            title: config.ui.title.clone(),
            reminder_title: config.reminders.title.clone(),
            status_history: config.ui.status_history,
            poll_interval: Duration::from_millis(config.ui.poll_interval_ms),
        }
    }
}

/// Launch the TUI over the given directory until the operator quits.
///
/// The caller initializes logging before calling `run`.
///
/// # Errors
/// Returns an error if terminal setup, drawing, or input polling fails.
pub fn run<S: PatientStore>(
    directory: PatientDirectory<S>,
    config: TuiConfig,
) -> anyhow::Result<()> {
    let mut app = App::with_directory(directory);
    app.title = config.title;
    app.reminder_title = config.reminder_title;
    app.set_history_limit(config.status_history);
    info!(
        "starting TUI (patients={}, poll_ms={})",
        app.rows.len(),
        config.poll_interval.as_millis()
    );

    let mut terminal = setup_terminal().context("failed to set up terminal")?;
    let result = event_loop(&mut terminal, &mut app, config.poll_interval);
    restore_terminal(&mut terminal).context("failed to restore terminal")?;
    result
}

fn event_loop<S: PatientStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
    poll_interval: Duration,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;
        match event::next_event(poll_interval)? {
            Some(AppEvent::Input(key)) => {
                if handle_input(key, app) {
                    info!("quit requested");
                    return Ok(());
                }
            }
            Some(AppEvent::Resize) => debug!("terminal resized"),
            None => {}
        }
    }
}

/// Handle a key press and return true when the app should exit.
fn handle_input<S: PatientStore>(key: KeyEvent, app: &mut App<S>) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return true;
    }

    if !app.reminders.is_empty() {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
            app.dismiss_reminder();
        }
        return false;
    }

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Tab | KeyCode::Down => app.focus_next(),
        KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
        KeyCode::F(2) => app.create_patient(),
        KeyCode::F(3) => app.schedule_appointment(),
        KeyCode::F(4) => app.send_reminder(),
        KeyCode::Char('p') if ctrl => app.create_patient(),
        KeyCode::Char('a') if ctrl => app.schedule_appointment(),
        KeyCode::Char('r') if ctrl => app.send_reminder(),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Char(ch) if !ctrl => app.insert_char(ch),
        _ => {}
    }
    false
}

/// Initialize terminal in raw mode + alternate screen.
fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    debug!("setting up terminal");
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal state on exit.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    debug!("restoring terminal");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_input(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    fn ctrl(app: &mut App, ch: char) -> bool {
        handle_input(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL), app)
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn keyboard_flow_creates_schedules_and_reminds() {
        let mut app = App::new();
        type_text(&mut app, "Ana");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ana@x.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "15-03-2025");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "14:30");

        assert!(!press(&mut app, KeyCode::F(2)));
        assert!(!ctrl(&mut app, 'a'));
        assert_eq!(app.rows[0].appointments, "2025-03-15 14:30");

        assert!(!press(&mut app, KeyCode::F(4)));
        assert_eq!(app.reminders.len(), 1);
    }

    #[test]
    fn popup_swallows_keys_until_dismissed() {
        let mut app = App::new();
        app.name = "Ana".to_string();
        app.email = "ana@x.com".to_string();
        app.date = "15-03-2025".to_string();
        app.time = "14:30".to_string();
        app.create_patient();
        app.schedule_appointment();
        app.send_reminder();

        assert!(!press(&mut app, KeyCode::Char('x')));
        assert!(!press(&mut app, KeyCode::F(3)));
        assert_eq!(app.name, "Ana");
        let record = app.directory().find("ana@x.com").expect("find");
        assert_eq!(record.appointments().len(), 1);

        assert!(!press(&mut app, KeyCode::Esc));
        assert!(app.reminders.is_empty());
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn ctrl_c_always_quits() {
        let mut app = App::new();
        assert!(ctrl(&mut app, 'c'));
    }

    #[test]
    fn control_chords_do_not_type() {
        let mut app = App::new();
        ctrl(&mut app, 'p');
        assert_eq!(app.name, "");
        assert_eq!(app.status, "patient name cannot be empty");
    }

    #[test]
    fn config_maps_to_session_settings() {
        let config = TuiConfig::default();
        assert_eq!(config.title, "Medical Appointment Scheduler");
        assert_eq!(config.reminder_title, "Reminder");
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }
}
