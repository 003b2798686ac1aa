//! Archive statistics port: read-only view of the weather archive databases.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::Serialize;
use wvadmin_domain::error::AdminError;

/// Size and span of the stored weather history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArchiveSummary {
    /// Archive records stored.
    pub records: u64,
    pub first: Option<DateTime<Utc>>,
    pub last: Option<DateTime<Utc>>,
    /// Days summarised for the NOAA reports.
    pub noaa_days: u64,
}

/// Source of [`ArchiveSummary`] values.
pub trait ArchiveStatistics {
    /// Summarise the archive. Missing databases or tables report no data.
    fn summary(&self) -> impl Future<Output = Result<ArchiveSummary, AdminError>> + Send;
}
