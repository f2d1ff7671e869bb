//! Fixed-format parsing for operator-entered dates and times.

use crate::error::SchedulerError;
use crate::model::Appointment;
use chrono::{NaiveDate, NaiveTime};
use log::debug;

/// Accepted date input, e.g. `15-03-2025`. The year must be four digits.
pub const DATE_INPUT_FORMAT: &str = "%d-%m-%Y";
/// 24-hour clock, e.g. `14:30`; used for input and for rendering.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse both texts into an appointment.
///
/// Either failure maps to the same [`SchedulerError::InvalidFormat`]; the
/// caller is not told which field was wrong.
pub fn parse_appointment(date_text: &str, time_text: &str) -> Result<Appointment, SchedulerError> {
    let date = parse_date(date_text);
    let time = NaiveTime::parse_from_str(time_text, TIME_FORMAT).ok();
    match (date, time) {
        (Some(date), Some(time)) => Ok(Appointment::new(date, time)),
        (date, time) => {
            debug!(
                "rejected appointment input (date_ok={}, time_ok={})",
                date.is_some(),
                time.is_some()
            );
            Err(SchedulerError::InvalidFormat)
        }
    }
}

/// `%Y` alone would take signed or short years such as `25` or `+2025`.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('-');
    let year = parts.nth(2)?;
    if parts.next().is_some() || year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_INPUT_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::parse_appointment;
    use crate::SchedulerError;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_day_month_year_and_hour_minute() {
        let appointment = parse_appointment("15-03-2025", "14:30").expect("parse");
        assert_eq!(
            appointment.date(),
            NaiveDate::from_ymd_opt(2025, 3, 15).expect("date")
        );
        assert_eq!(
            appointment.time(),
            NaiveTime::from_hms_opt(14, 30, 0).expect("time")
        );
    }

    #[test]
    fn rejects_iso_date() {
        assert_eq!(
            parse_appointment("2025-01-01", "09:00"),
            Err(SchedulerError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_impossible_calendar_date() {
        assert_eq!(
            parse_appointment("31-02-2025", "09:00"),
            Err(SchedulerError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_out_of_range_time() {
        assert_eq!(
            parse_appointment("01-01-2025", "24:00"),
            Err(SchedulerError::InvalidFormat)
        );
        assert_eq!(
            parse_appointment("01-01-2025", "9am"),
            Err(SchedulerError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_trailing_input() {
        assert_eq!(
            parse_appointment("01-01-2025 ", "09:00"),
            Err(SchedulerError::InvalidFormat)
        );
        assert_eq!(
            parse_appointment("01-01-2025", "09:00:00"),
            Err(SchedulerError::InvalidFormat)
        );
    }

    #[test]
    fn rejects_years_that_are_not_four_digits() {
        for date in ["15-03-25", "15-03-+2025", "15-03-12025", "15-03--2025"] {
            assert_eq!(
                parse_appointment(date, "14:30"),
                Err(SchedulerError::InvalidFormat),
                "{date}"
            );
        }
    }

    #[test]
    fn accepts_single_digit_day_month_and_clock_fields() {
        let appointment = parse_appointment("1-3-2025", "9:5").expect("parse");
        assert_eq!(
            appointment.date(),
            NaiveDate::from_ymd_opt(2025, 3, 1).expect("date")
        );
        assert_eq!(
            appointment.time(),
            NaiveTime::from_hms_opt(9, 5, 0).expect("time")
        );
    }
}
