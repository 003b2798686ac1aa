//! `SQLite` implementation of [`ConfigStore`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use wvadmin_app::ports::ConfigStore;
use wvadmin_domain::config::{ConfigItem, ConfigKey, ConfigWrite};
use wvadmin_domain::error::AdminError;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`ConfigItem`].
struct Wrapper(ConfigItem);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let name: String = row.try_get("name")?;
        let value: Option<String> = row.try_get("value")?;
        let description: Option<String> = row.try_get("description")?;
        let depends_on: Option<String> = row.try_get("dependsOn")?;

        let key = ConfigKey::new(name).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(ConfigItem {
            key,
            value: value.unwrap_or_default(),
            description,
            depends_on,
        }))
    }
}

const SELECT_BY_NAME: &str =
    "SELECT name, value, description, dependsOn FROM config WHERE name = ?";
const SELECT_ALL: &str = "SELECT name, value, description, dependsOn FROM config ORDER BY name";
const UPSERT: &str = "INSERT INTO config (name, value) VALUES (?, ?) \
                      ON CONFLICT(name) DO UPDATE SET value = excluded.value";
const INSERT_IF_ABSENT: &str =
    "INSERT OR IGNORE INTO config (name, value, description, dependsOn) VALUES (?, ?, ?, ?)";

/// `SQLite`-backed configuration store.
#[derive(Clone)]
pub struct SqliteConfigStore {
    pool: SqlitePool,
}

impl SqliteConfigStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ConfigStore for SqliteConfigStore {
    fn get(
        &self,
        key: &ConfigKey,
    ) -> impl Future<Output = Result<Option<ConfigItem>, AdminError>> + Send {
        let pool = self.pool.clone();
        let name = key.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NAME)
                .bind(name)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(row.map(|w| w.0))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ConfigItem>, AdminError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn set(
        &self,
        key: &ConfigKey,
        value: &str,
    ) -> impl Future<Output = Result<(), AdminError>> + Send {
        let pool = self.pool.clone();
        let name = key.to_string();
        let value = value.to_string();
        async move {
            sqlx::query(UPSERT)
                .bind(name)
                .bind(value)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn create(&self, item: ConfigItem) -> impl Future<Output = Result<(), AdminError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_IF_ABSENT)
                .bind(item.key.to_string())
                .bind(item.value)
                .bind(item.description)
                .bind(item.depends_on)
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    /// Applies every write in one transaction so a page is saved as a whole.
    fn set_many(
        &self,
        writes: &[ConfigWrite],
    ) -> impl Future<Output = Result<(), AdminError>> + Send {
        let pool = self.pool.clone();
        let writes = writes.to_vec();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;
            for write in writes {
                sqlx::query(UPSERT)
                    .bind(write.key.to_string())
                    .bind(write.value)
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }
            tx.commit().await.map_err(StorageError::from)?;

            Ok(())
        }
    }
}
