//! `SQLite` implementation of [`ArchiveStatistics`].
//!
//! Reads the databases maintained by the station daemon: the archive database
//! (`archive` table, `dateTime` in Unix seconds) and the NOAA database
//! (`noaaHistory` table, one row per day).

use std::future::Future;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use wvadmin_app::ports::{ArchiveStatistics, ArchiveSummary};
use wvadmin_domain::error::AdminError;

use crate::error::StorageError;

const ARCHIVE_SPAN: &str = "SELECT COUNT(*), MIN(dateTime), MAX(dateTime) FROM archive";
const NOAA_DAYS: &str = "SELECT COUNT(*) FROM noaaHistory";

/// `SQLITE_CANTOPEN`: the database file does not exist or is unreadable.
const CANT_OPEN: &str = "14";

/// Treat a missing database file or table as an empty archive.
fn absent_as_none<T>(result: Result<T, sqlx::Error>) -> Result<Option<T>, StorageError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(sqlx::Error::Database(err))
            if err.message().starts_with("no such table")
                || err.message().starts_with("unable to open")
                || err.code().as_deref() == Some(CANT_OPEN) =>
        {
            tracing::debug!(error = %err, "archive data unavailable");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn timestamp(seconds: Option<i64>) -> Option<DateTime<Utc>> {
    seconds.and_then(|seconds| DateTime::from_timestamp(seconds, 0))
}

/// `SQLite`-backed archive statistics.
#[derive(Clone)]
pub struct SqliteArchiveStatistics {
    archive: SqlitePool,
    noaa: SqlitePool,
}

impl SqliteArchiveStatistics {
    /// Create statistics over the archive and NOAA pools.
    #[must_use]
    pub fn new(archive: SqlitePool, noaa: SqlitePool) -> Self {
        Self { archive, noaa }
    }
}

impl ArchiveStatistics for SqliteArchiveStatistics {
    fn summary(&self) -> impl Future<Output = Result<ArchiveSummary, AdminError>> + Send {
        let archive = self.archive.clone();
        let noaa = self.noaa.clone();
        async move {
            let span: Option<(i64, Option<i64>, Option<i64>)> =
                absent_as_none(sqlx::query_as(ARCHIVE_SPAN).fetch_one(&archive).await)?;
            let days: Option<(i64,)> =
                absent_as_none(sqlx::query_as(NOAA_DAYS).fetch_one(&noaa).await)?;

            let (records, first, last) = span.unwrap_or_default();
            Ok(ArchiveSummary {
                records: u64::try_from(records).unwrap_or_default(),
                first: timestamp(first),
                last: timestamp(last),
                noaa_days: days.map_or(0, |(days,)| u64::try_from(days).unwrap_or_default()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn should_report_empty_summary_when_tables_missing() {
        let stats = SqliteArchiveStatistics::new(memory_pool().await, memory_pool().await);

        let summary = stats.summary().await.unwrap();

        assert_eq!(summary, ArchiveSummary::default());
    }

    #[tokio::test]
    async fn should_count_records_and_span() {
        let archive = memory_pool().await;
        sqlx::query("CREATE TABLE archive (dateTime INTEGER PRIMARY KEY, usUnits INTEGER)")
            .execute(&archive)
            .await
            .unwrap();
        for ts in [1_609_459_200_i64, 1_609_459_500, 1_612_137_600] {
            sqlx::query("INSERT INTO archive (dateTime, usUnits) VALUES (?, 1)")
                .bind(ts)
                .execute(&archive)
                .await
                .unwrap();
        }
        let noaa = memory_pool().await;
        sqlx::query("CREATE TABLE noaaHistory (dateTime INTEGER PRIMARY KEY)")
            .execute(&noaa)
            .await
            .unwrap();
        sqlx::query("INSERT INTO noaaHistory (dateTime) VALUES (1609459200), (1609545600)")
            .execute(&noaa)
            .await
            .unwrap();

        let summary = SqliteArchiveStatistics::new(archive, noaa)
            .summary()
            .await
            .unwrap();

        assert_eq!(summary.records, 3);
        assert_eq!(
            summary.first,
            Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).single()
        );
        assert_eq!(
            summary.last,
            Utc.with_ymd_and_hms(2021, 2, 1, 0, 0, 0).single()
        );
        assert_eq!(summary.noaa_days, 2);
    }

    #[tokio::test]
    async fn should_report_missing_database_file_as_empty() {
        let missing = crate::pool::Database::open_read_only("sqlite:/nonexistent/wview-archive.sdb")
            .unwrap();
        let stats = SqliteArchiveStatistics::new(missing.pool().clone(), memory_pool().await);

        let summary = stats.summary().await.unwrap();

        assert_eq!(summary.records, 0);
    }
}
