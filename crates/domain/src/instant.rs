use std::fmt::{Display, Formatter};

use accord_core::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Calendar date format accepted from the date picker and echoed in messages.
pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Point in time sent to the backend as a day-bucket boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInstant(DateTime<Utc>);

impl TimeInstant {
    /// Returns the instant at 00:00:00.000 UTC of the given calendar day.
    #[must_use]
    pub fn start_of_day(date: NaiveDate) -> Self {
        Self(date.and_time(NaiveTime::MIN).and_utc())
    }

    /// Wraps an existing UTC timestamp.
    #[must_use]
    pub fn from_datetime(value: DateTime<Utc>) -> Self {
        Self(value)
    }

    /// Returns the underlying UTC timestamp.
    #[must_use]
    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// Serializes as `YYYY-MM-DDTHH:MM:SS.sssZ`, the shape the backend parses.
    #[must_use]
    pub fn to_iso_string(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl Display for TimeInstant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.to_iso_string().as_str())
    }
}

/// Range of calendar days a user may pick; the upper bound is never in the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectableDateRange {
    max: NaiveDate,
}

impl SelectableDateRange {
    /// Creates a range whose maximum is the current UTC calendar day.
    #[must_use]
    pub fn ending_today() -> Self {
        Self {
            max: Utc::now().date_naive(),
        }
    }

    /// Creates a range with an explicit maximum day.
    #[must_use]
    pub fn ending_on(max: NaiveDate) -> Self {
        Self { max }
    }

    /// Returns the latest selectable day.
    #[must_use]
    pub fn max(&self) -> NaiveDate {
        self.max
    }

    /// Pulls a picked day back to the maximum when it lies beyond it.
    #[must_use]
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.min(self.max)
    }

    /// Selects a day, clamping it into range.
    #[must_use]
    pub fn select(&self, date: NaiveDate) -> DateSelection {
        let date = self.clamp(date);
        DateSelection {
            date,
            instant: TimeInstant::start_of_day(date),
        }
    }

    /// Parses a `YYYY-MM-DD` value from the picker and selects it.
    pub fn parse_and_select(&self, raw: &str) -> AppResult<DateSelection> {
        let date = NaiveDate::parse_from_str(raw.trim(), CALENDAR_DATE_FORMAT).map_err(|error| {
            AppError::Validation(format!("invalid date '{raw}', expected YYYY-MM-DD: {error}"))
        })?;

        Ok(self.select(date))
    }
}

/// A picked calendar day together with the instant derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSelection {
    date: NaiveDate,
    instant: TimeInstant,
}

impl DateSelection {
    /// Returns the selected calendar day.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Returns the request instant for this day.
    #[must_use]
    pub fn instant(&self) -> TimeInstant {
        self.instant
    }

    /// Returns the day as shown back to the user.
    #[must_use]
    pub fn label(&self) -> String {
        self.date.format(CALENDAR_DATE_FORMAT).to_string()
    }
}
