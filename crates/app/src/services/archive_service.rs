//! Archive service: date pickers and report links for archived reports.

use chrono::{Datelike, NaiveDate};
use wvadmin_domain::archive::{DatePicker, ReportKind, report_date, report_url};
use wvadmin_domain::error::AdminError;

use crate::ports::ArchiveStatistics;

/// Application service for the archive navigator.
pub struct ArchiveService<A> {
    archive: A,
    base_url: String,
}

impl<A: ArchiveStatistics + Sync> ArchiveService<A> {
    /// Create a new service linking reports under `base_url`.
    pub fn new(archive: A, base_url: impl Into<String>) -> Self {
        Self {
            archive,
            base_url: base_url.into(),
        }
    }

    /// Pickers for `today`, starting at the first archived year when known.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the archive statistics.
    #[tracing::instrument(skip(self))]
    pub async fn picker(&self, today: NaiveDate) -> Result<DatePicker, AdminError> {
        let summary = self.archive.summary().await?;
        let first_year = summary.first.map(|first| first.year());
        Ok(DatePicker::new(today, first_year))
    }

    /// URL of the report a picker submission points at.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] for an impossible date.
    pub fn report_url(
        &self,
        kind: ReportKind,
        year: i32,
        month: Option<u32>,
        day: Option<u32>,
    ) -> Result<String, AdminError> {
        let date = report_date(kind, year, month, day)?;
        Ok(report_url(&self.base_url, kind, date))
    }
}
