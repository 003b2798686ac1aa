//! Configuration store port: the key-value table shared with the daemons.

use std::future::Future;

use wvadmin_domain::config::{ConfigItem, ConfigKey, ConfigWrite};
use wvadmin_domain::error::AdminError;

/// Read and write access to the configuration table.
///
/// Writes are upserts: the last write wins and unknown keys are created.
pub trait ConfigStore: Sync {
    /// Get one item by key.
    fn get(
        &self,
        key: &ConfigKey,
    ) -> impl Future<Output = Result<Option<ConfigItem>, AdminError>> + Send;

    /// Get every item, ordered by key.
    fn get_all(&self) -> impl Future<Output = Result<Vec<ConfigItem>, AdminError>> + Send;

    /// Store `value` under `key`, creating the row if needed.
    fn set(
        &self,
        key: &ConfigKey,
        value: &str,
    ) -> impl Future<Output = Result<(), AdminError>> + Send;

    /// Insert an item with its metadata. An existing row is left untouched.
    fn create(&self, item: ConfigItem) -> impl Future<Output = Result<(), AdminError>> + Send;

    /// Apply several writes in order.
    fn set_many(
        &self,
        writes: &[ConfigWrite],
    ) -> impl Future<Output = Result<(), AdminError>> + Send {
        async move {
            for write in writes {
                self.set(&write.key, &write.value).await?;
            }
            Ok(())
        }
    }
}
