use time::{
    format_description::FormatItem,
    macros::{format_description, time},
    util::days_in_year_month,
    Date, Month, OffsetDateTime, Time,
};

use crate::error::ReportError;

/// Sanity window for report years. Matches the timestamp bounds the rest of
/// the platform accepts for meter data.
pub const YEAR_MIN: i32 = 2000;
pub const YEAR_MAX: i32 = 2100;

/// Wire format for calendar dates.
pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Last representable instant of a calendar day.
const END_OF_DAY: Time = time!(23:59:59.999999999);

/// An inclusive `[start, end]` timestamp window.
///
/// All window arithmetic is done in UTC. A zero-length window
/// (`start == end`) is a valid single-instant period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl Period {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::validation(
                "period",
                format!("start ({start}) must not be after end ({end})"),
            ));
        }
        Ok(Self { start, end })
    }

    /// Inclusive window spanning whole calendar days, midnight UTC through
    /// the last instant of the end day.
    pub fn from_dates(start: Date, end: Date) -> Result<Self, ReportError> {
        Self::new(
            start.with_time(Time::MIDNIGHT).assume_utc(),
            end.with_time(END_OF_DAY).assume_utc(),
        )
    }

    /// The calendar-month window for `(year, month)` in UTC: first day
    /// 00:00:00 through last day 23:59:59.999999999.
    pub fn month_window(year: i32, month: u8) -> Result<Self, ReportError> {
        check_year(year)?;
        let month = Month::try_from(month).map_err(|_| {
            ReportError::validation("month", format!("must be in 1..=12, got {month}"))
        })?;

        let first = Date::from_calendar_date(year, month, 1)
            .map_err(|e| ReportError::validation("month", e.to_string()))?;
        let last = Date::from_calendar_date(year, month, days_in_year_month(year, month))
            .map_err(|e| ReportError::validation("month", e.to_string()))?;

        Self::from_dates(first, last)
    }

    /// The calendar-year window for `year` in UTC.
    pub fn year_window(year: i32) -> Result<Self, ReportError> {
        check_year(year)?;

        let first = Date::from_calendar_date(year, Month::January, 1)
            .map_err(|e| ReportError::validation("year", e.to_string()))?;
        let last = Date::from_calendar_date(year, Month::December, 31)
            .map_err(|e| ReportError::validation("year", e.to_string()))?;

        Self::from_dates(first, last)
    }

    pub fn contains(&self, ts: OffsetDateTime) -> bool {
        ts >= self.start && ts <= self.end
    }
}

fn check_year(year: i32) -> Result<(), ReportError> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(ReportError::validation(
            "year",
            format!("must be in {YEAR_MIN}..={YEAR_MAX}, got {year}"),
        ));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` wire date, attributing failures to `field`.
pub fn parse_date(field: &'static str, raw: &str) -> Result<Date, ReportError> {
    Date::parse(raw, DATE_FORMAT)
        .map_err(|e| ReportError::validation(field, format!("expected YYYY-MM-DD date: {e}")))
}

/// Format a date in the wire format. Infallible for the formats we emit.
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Today's calendar date in UTC. Single-day reports default to this.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn month_window_covers_whole_month() {
        let p = Period::month_window(2024, 1).unwrap();
        assert_eq!(p.start, datetime!(2024-01-01 00:00:00 UTC));
        assert!(p.contains(datetime!(2024-01-31 23:59:59.5 UTC)));
        assert!(!p.contains(datetime!(2024-02-01 00:00:00 UTC)));
    }

    #[test]
    fn month_window_handles_leap_february() {
        let p = Period::month_window(2024, 2).unwrap();
        assert!(p.contains(datetime!(2024-02-29 12:00:00 UTC)));
        assert!(!p.contains(datetime!(2024-03-01 00:00:00 UTC)));
    }

    #[test]
    fn month_window_rejects_month_13() {
        let err = Period::month_window(2024, 13).unwrap_err();
        assert!(matches!(err, ReportError::Validation { field: "month", .. }));
    }

    #[test]
    fn year_window_rejects_out_of_bounds_year() {
        assert!(Period::year_window(1999).is_err());
        assert!(Period::year_window(2101).is_err());
        assert!(Period::year_window(2000).is_ok());
    }

    #[test]
    fn zero_length_period_is_valid() {
        let ts = datetime!(2024-06-01 12:00:00 UTC);
        let p = Period::new(ts, ts).unwrap();
        assert!(p.contains(ts));
    }

    #[test]
    fn inverted_period_is_rejected() {
        let err = Period::new(
            datetime!(2024-06-02 00:00:00 UTC),
            datetime!(2024-06-01 00:00:00 UTC),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::Validation { field: "period", .. }));
    }

    #[test]
    fn parse_date_accepts_wire_format() {
        assert_eq!(parse_date("start", "2025-10-01").unwrap(), date!(2025-10-01));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        let err = parse_date("start", "10/01/2025").unwrap_err();
        assert!(matches!(err, ReportError::Validation { field: "start", .. }));
    }
}
