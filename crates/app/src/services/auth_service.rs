//! Auth service: admin password checks and changes.

use wvadmin_domain::auth::{
    PASSWORD_DEPENDS_ON, PASSWORD_DESCRIPTION, PasswordDigest, SessionPolicy, new_password,
};
use wvadmin_domain::config::{ConfigItem, ConfigKey, keys};
use wvadmin_domain::error::AdminError;

use crate::ports::ConfigStore;

/// Application service guarding the console with the admin password.
pub struct AuthService<S> {
    store: S,
    policy: SessionPolicy,
}

impl<S: ConfigStore> AuthService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S, policy: SessionPolicy) -> Self {
        Self { store, policy }
    }

    #[must_use]
    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Stored password digest. A missing row is seeded with the default
    /// password; an empty one reads as the default.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the configuration store.
    pub async fn password_digest(&self) -> Result<PasswordDigest, AdminError> {
        let key = ConfigKey::new(keys::ADMIN_PASSWORD)?;
        match self.store.get(&key).await? {
            Some(item) if !item.value.is_empty() => Ok(PasswordDigest::from_stored(item.value)),
            _ => {
                let digest = PasswordDigest::default_password();
                self.store
                    .create(
                        ConfigItem::new(key, digest.as_str())
                            .with_description(PASSWORD_DESCRIPTION)
                            .with_depends_on(PASSWORD_DEPENDS_ON),
                    )
                    .await?;
                tracing::warn!("admin password not set, using the default");
                Ok(digest)
            }
        }
    }

    /// Check a login attempt. Returns the digest to put in the cookie on success.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the configuration store.
    #[tracing::instrument(skip_all)]
    pub async fn verify(&self, password: &str) -> Result<Option<PasswordDigest>, AdminError> {
        let digest = self.password_digest().await?;
        if digest.verifies(password) {
            tracing::info!("login accepted");
            Ok(Some(digest))
        } else {
            tracing::warn!("login rejected");
            Ok(None)
        }
    }

    /// Check a session cookie. Returns the digest when the cookie is valid.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the configuration store.
    pub async fn authorise(&self, cookie: &str) -> Result<Option<PasswordDigest>, AdminError> {
        let digest = self.password_digest().await?;
        Ok(digest.authorises(cookie).then_some(digest))
    }

    /// Replace the admin password. Returns the new digest for the cookie.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] when the entries are empty or differ,
    /// or a storage error from the configuration store.
    #[tracing::instrument(skip_all)]
    pub async fn change_password(
        &self,
        first: &str,
        second: &str,
    ) -> Result<PasswordDigest, AdminError> {
        let digest = new_password(first, second)?;
        let key = ConfigKey::new(keys::ADMIN_PASSWORD)?;
        self.store.set(&key, digest.as_str()).await?;
        tracing::info!("admin password changed");
        Ok(digest)
    }
}
