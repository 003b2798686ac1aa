//! Archive navigator: date pickers and report URLs for archived text reports.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use crate::error::ValidationError;

/// Years offered before the current one when the archive start is unknown.
pub const DEFAULT_YEAR_SPAN: i32 = 10;

/// Years that format as four digits in report file names.
pub const REPORT_YEARS: std::ops::RangeInclusive<i32> = 1000..=9999;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Kind of archived report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Daily browser archive file.
    Day,
    /// NOAA monthly summary.
    Month,
    /// NOAA yearly summary.
    Year,
}

impl ReportKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            other => Err(ValidationError::UnknownReportKind(other.to_string())),
        }
    }
}

/// Build the calendar date a report request points at.
///
/// Components the report kind ignores default to 1.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] for impossible dates such as
/// February 30th, and for years outside [`REPORT_YEARS`].
pub fn report_date(
    kind: ReportKind,
    year: i32,
    month: Option<u32>,
    day: Option<u32>,
) -> Result<NaiveDate, ValidationError> {
    let (month, day) = match kind {
        ReportKind::Day => (month.unwrap_or(1), day.unwrap_or(1)),
        ReportKind::Month => (month.unwrap_or(1), 1),
        ReportKind::Year => (1, 1),
    };
    let invalid = ValidationError::InvalidDate { year, month, day };
    if !REPORT_YEARS.contains(&year) {
        return Err(invalid);
    }
    NaiveDate::from_ymd_opt(year, month, day).ok_or(invalid)
}

/// Path of a report relative to the generated-site root.
#[must_use]
pub fn report_path(kind: ReportKind, date: NaiveDate) -> String {
    match kind {
        ReportKind::Day => format!("Archive/ARC-{}.txt", date.format("%Y-%m-%d")),
        ReportKind::Month => format!("NOAA/NOAA-{}.txt", date.format("%Y-%m")),
        ReportKind::Year => format!("NOAA/NOAA-{}.txt", date.format("%Y")),
    }
}

/// Absolute or site-relative URL of a report under `base`.
#[must_use]
pub fn report_url(base: &str, kind: ReportKind, date: NaiveDate) -> String {
    format!("{}/{}", base.trim_end_matches('/'), report_path(kind, date))
}

/// One `<option>` of a date `<select>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

/// Year, month and day `<select>` options with today preselected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    pub years: Vec<SelectOption>,
    pub months: Vec<SelectOption>,
    pub days: Vec<SelectOption>,
}

impl DatePicker {
    /// Build the pickers for `today`. Years run from `first_year` (or
    /// [`DEFAULT_YEAR_SPAN`] years back) up to the current year.
    #[must_use]
    pub fn new(today: NaiveDate, first_year: Option<i32>) -> Self {
        let current = today.year();
        let first = first_year
            .unwrap_or(current - DEFAULT_YEAR_SPAN)
            .min(current);

        let years = (first..=current)
            .map(|year| SelectOption {
                value: year.to_string(),
                label: year.to_string(),
                selected: year == current,
            })
            .collect();

        let months = MONTH_NAMES
            .iter()
            .zip(1u32..)
            .map(|(name, month)| SelectOption {
                value: format!("{month:02}"),
                label: (*name).to_string(),
                selected: month == today.month(),
            })
            .collect();

        let days = (1..=31u32)
            .map(|day| SelectOption {
                value: format!("{day:02}"),
                label: format!("{day:02}"),
                selected: day == today.day(),
            })
            .collect();

        Self {
            years,
            months,
            days,
        }
    }
}
