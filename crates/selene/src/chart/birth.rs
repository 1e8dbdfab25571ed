//! Birth data and its conversion to an instant.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that reject a natal chart request outright
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Birth date is required")]
    MissingDate,
    #[error("Invalid birth date {date:?}: {reason}")]
    InvalidDate { date: String, reason: String },
    #[error("Invalid birth time {time:?}: expected HH:MM ({reason})")]
    InvalidTime { time: String, reason: String },
}

/// Birth data as supplied by callers.
///
/// `lat` and `lng` are carried through to the output but no calculation uses
/// them: the birth time is read as UTC and houses are not anchored to the
/// horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BirthData {
    /// Calendar date, "YYYY-MM-DD"
    pub date: String,
    /// Clock time, "HH:MM"; noon when absent or blank
    #[serde(default)]
    pub time: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

impl BirthData {
    pub fn new(date: impl Into<String>, time: Option<&str>, lat: f64, lng: f64) -> Self {
        Self {
            date: date.into(),
            time: time.map(str::to_string),
            lat,
            lng,
        }
    }

    /// The time that will be used, falling back to `default_time`
    pub fn effective_time<'a>(&'a self, default_time: &'a str) -> &'a str {
        match self.time.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => default_time,
        }
    }

    /// Whether the coordinates name a place on Earth. Never a reason to
    /// reject a chart, since nothing downstream reads them.
    pub fn location_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Combine date and time into a UTC instant
    pub fn instant(&self, default_time: &str) -> Result<DateTime<Utc>, ChartError> {
        let date = parse_birth_date(&self.date)?;
        let time = parse_birth_time(self.effective_time(default_time))?;
        Ok(Utc.from_utc_datetime(&date.and_time(time)))
    }
}

pub fn parse_birth_date(date: &str) -> Result<NaiveDate, ChartError> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ChartError::MissingDate);
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| ChartError::InvalidDate {
        date: date.to_string(),
        reason: e.to_string(),
    })
}

/// Accepts "HH:MM" and "HH:MM:SS"
pub fn parse_birth_time(time: &str) -> Result<NaiveTime, ChartError> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|e| ChartError::InvalidTime {
            time: time.to_string(),
            reason: e.to_string(),
        })
}
