//! Config service: raw key access for the JSON API.

use wvadmin_domain::config::{ConfigItem, ConfigKey};
use wvadmin_domain::error::{AdminError, NotFoundError};

use crate::ports::ConfigStore;

/// Application service exposing the configuration table key by key.
pub struct ConfigService<S> {
    store: S,
}

impl<S: ConfigStore> ConfigService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// List every configuration item.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list(&self) -> Result<Vec<ConfigItem>, AdminError> {
        self.store.get_all().await
    }

    /// Look up one item, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] for a malformed key,
    /// [`AdminError::NotFound`] when the key is not stored, or a storage error.
    pub async fn get(&self, key: &str) -> Result<ConfigItem, AdminError> {
        let key = ConfigKey::new(key)?;
        self.store.get(&key).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Config key",
                id: key.to_string(),
            }
            .into()
        })
    }

    /// Store a value and return the updated item.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] for a malformed key, or a storage error.
    #[tracing::instrument(skip(self, value))]
    pub async fn set(&self, key: &str, value: &str) -> Result<ConfigItem, AdminError> {
        let key = ConfigKey::new(key)?;
        self.store.set(&key, value).await?;
        tracing::info!(key = %key, "config value updated");
        self.get(key.as_str()).await
    }
}
