//! Rendering routines for the MedSched TUI.

use crate::app::{App, InputField};
use medsched_rs_core::PatientStore;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Row, Table, Wrap};

const PRIMARY: Color = Color::Rgb(236, 91, 43); // #EC5B2B
const SECONDARY: Color = Color::Rgb(238, 121, 72); // #EE7948
const TEXT: Color = Color::Rgb(238, 238, 238); // #eeeeee
const TEXT_MUTED: Color = Color::Rgb(128, 128, 128); // #808080
const BORDER: Color = Color::Rgb(60, 60, 60); // #3c3c3c
const BORDER_ACTIVE: Color = Color::Rgb(238, 121, 72); // #EE7948
const YELLOW: Color = Color::Rgb(229, 192, 123); // #e5c07b

const HEADER_HEIGHT: u16 = 3;
const INPUT_HEIGHT: u16 = 3;
const FORM_WIDTH: u16 = 40;
const POPUP_WIDTH: u16 = 50;
const POPUP_HEIGHT: u16 = 7;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Draw the entire TUI frame.
pub fn draw<S: PatientStore>(frame: &mut Frame<'_>, app: &App<S>) {
    let area = frame.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // header bar
            Constraint::Min(0),                // form + table
            Constraint::Length(1),             // status bar
        ])
        .split(area);

    draw_header(frame, app, root[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(FORM_WIDTH), Constraint::Min(0)])
        .split(root[1]);
    draw_form(frame, app, body[0]);
    draw_table(frame, app, body[1]);
    draw_status_bar(frame, app, root[2]);

    if !app.reminders.is_empty() {
        draw_reminder_popup(frame, app, area);
    }
}

fn draw_header<S: PatientStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER));
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.title),
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("v{VERSION}"), Style::default().fg(TEXT_MUTED)),
        Span::styled(
            format!("  patients: {}", app.rows.len()),
            Style::default().fg(SECONDARY),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Draw the four inputs followed by the key help.
fn draw_form<S: PatientStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let mut constraints: Vec<Constraint> = InputField::ALL
        .iter()
        .map(|_| Constraint::Length(INPUT_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (index, field) in InputField::ALL.into_iter().enumerate() {
        draw_input(frame, app, field, rows[index]);
    }
    draw_help(frame, rows[InputField::ALL.len()]);
}

fn draw_input<S: PatientStore>(
    frame: &mut Frame<'_>,
    app: &App<S>,
    field: InputField,
    area: Rect,
) {
    let focused = app.focus == field && app.reminders.is_empty();
    let border_color = if focused { BORDER_ACTIVE } else { BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", field.label()),
            Style::default().fg(if focused { SECONDARY } else { TEXT_MUTED }),
        ));
    let inner = block.inner(area);
    let value = app.input(field);

    frame.render_widget(block, area);
    frame.render_widget(
        Paragraph::new(Span::styled(value, Style::default().fg(TEXT))),
        inner,
    );

    if focused {
        let offset = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
        let x = inner.x.saturating_add(offset).min(inner.right().saturating_sub(1));
        frame.set_cursor_position((x, inner.y));
    }
}

fn draw_help(frame: &mut Frame<'_>, area: Rect) {
    let key = Style::default().fg(TEXT_MUTED);
    let desc = Style::default().fg(BORDER);
    let lines = vec![
        Line::from(vec![
            Span::styled(" F2/Ctrl+P", key),
            Span::styled(" create patient", desc),
        ]),
        Line::from(vec![
            Span::styled(" F3/Ctrl+A", key),
            Span::styled(" schedule", desc),
        ]),
        Line::from(vec![
            Span::styled(" F4/Ctrl+R", key),
            Span::styled(" send reminder", desc),
        ]),
        Line::from(vec![
            Span::styled(" Tab/Shift+Tab", key),
            Span::styled(" move focus", desc),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Draw the patient table from the cached rows.
fn draw_table<S: PatientStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let header = Row::new(vec!["Name", "Email", "Appointments"])
        .style(Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD));
    let rows = app.rows.iter().map(|row| {
        Row::new(vec![
            row.name.clone(),
            row.email.clone(),
            row.appointments.clone(),
        ])
        .style(Style::default().fg(TEXT))
    });
    let widths = [
        Constraint::Percentage(25),
        Constraint::Percentage(30),
        Constraint::Percentage(45),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER))
            .title(Span::styled(" Patients ", Style::default().fg(SECONDARY))),
    );
    frame.render_widget(table, area);
}

/// Draw the status bar at the bottom.
fn draw_status_bar<S: PatientStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let shortcuts = vec![
        Span::styled(" Ctrl+C", Style::default().fg(TEXT_MUTED)),
        Span::styled(" quit", Style::default().fg(BORDER)),
        Span::styled("  Esc", Style::default().fg(TEXT_MUTED)),
        Span::styled(" close/quit", Style::default().fg(BORDER)),
    ];
    let right_text = format!(" {} ", app.status);
    let right_len = u16::try_from(right_text.chars().count())
        .unwrap_or(u16::MAX)
        .min(area.width);
    let left_area = Rect {
        width: area.width.saturating_sub(right_len),
        ..area
    };
    let right_area = Rect {
        x: area.x + area.width.saturating_sub(right_len),
        width: right_len,
        ..area
    };

    frame.render_widget(Paragraph::new(Line::from(shortcuts)), left_area);
    frame.render_widget(
        Paragraph::new(Span::styled(right_text, Style::default().fg(YELLOW))),
        right_area,
    );
}

fn draw_reminder_popup<S: PatientStore>(frame: &mut Frame<'_>, app: &App<S>, area: Rect) {
    let Some(reminder) = app.reminders.front() else {
        return;
    };
    let popup = centered(area, POPUP_WIDTH, POPUP_HEIGHT);
    let remaining = app.reminders.len();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(BORDER_ACTIVE))
        .title(Span::styled(
            format!(" {} ", app.reminder_title),
            Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD),
        ));
    let lines = vec![
        Line::from(Span::styled(reminder.to_string(), Style::default().fg(TEXT))),
        Line::from(""),
        Line::from(Span::styled(
            format!("Enter/Esc to dismiss ({remaining} pending)"),
            Style::default()
                .fg(TEXT_MUTED)
                .add_modifier(Modifier::ITALIC),
        )),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        popup,
    );
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn table_shows_scheduled_patient() {
        let mut app = App::new();
        app.name = "Ana".to_string();
        app.email = "ana@x.com".to_string();
        app.date = "15-03-2025".to_string();
        app.time = "14:30".to_string();
        app.create_patient();
        app.schedule_appointment();

        let screen = render(&app);
        assert!(screen.contains("Appointments"));
        assert!(screen.contains("ana@x.com"));
        assert!(screen.contains("2025-03-15 14:30"));
    }

    #[test]
    fn popup_shows_front_reminder() {
        let mut app = App::new();
        app.name = "Bo".to_string();
        app.email = "bo@x.com".to_string();
        app.date = "02-04-2025".to_string();
        app.time = "08:00".to_string();
        app.create_patient();
        app.schedule_appointment();
        app.send_reminder();

        let screen = render(&app);
        assert!(screen.contains("Reminder for Bo: 2025-04-02 at 08:00"));
        assert!(screen.contains("1 pending"));

        app.dismiss_reminder();
        assert!(!render(&app).contains("Reminder for Bo"));
    }
}
