//! Configuration store model: validated keys and stored items.
//!
//! The store is an external key-value table shared with the station daemons.
//! Values are opaque strings; boolean settings use the literals `yes`/`no`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AdminError, ValidationError};

/// Literal stored for an enabled boolean setting.
pub const YES: &str = "yes";
/// Literal stored for a disabled boolean setting.
pub const NO: &str = "no";

/// Render a boolean as the stored `yes`/`no` literal.
#[must_use]
pub fn yes_no(value: bool) -> &'static str {
    if value { YES } else { NO }
}

/// Keys this console reads or writes outside of the page catalogue.
pub mod keys {
    pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
    pub const STATION_TYPE: &str = "STATION_TYPE";
    pub const STATION_INTERFACE: &str = "STATION_INTERFACE";
    pub const STATION_DEV: &str = "STATION_DEV";
    pub const STATION_VERBOSE_MSGS: &str = "STATION_VERBOSE_MSGS";
    pub const ENABLE_FTP: &str = "ENABLE_FTP";
    pub const ENABLE_SSH: &str = "ENABLE_SSH";
}

/// A configuration key such as `STATION_TYPE` or `PROCMON_wviewd`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Validate and wrap a key name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyKey`] for an empty name and
    /// [`ValidationError::InvalidKey`] when it holds anything other than
    /// ASCII letters, digits or `_`.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyKey);
        }
        if !name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            return Err(ValidationError::InvalidKey(name));
        }
        Ok(Self(name))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ConfigKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ConfigKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

/// One row of the configuration store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub key: ConfigKey,
    pub value: String,
    pub description: Option<String>,
    pub depends_on: Option<String>,
}

impl ConfigItem {
    /// Build an item without metadata.
    #[must_use]
    pub fn new(key: ConfigKey, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
            description: None,
            depends_on: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_depends_on(mut self, depends_on: impl Into<String>) -> Self {
        self.depends_on = Some(depends_on.into());
        self
    }
}

/// A single pending write produced by a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWrite {
    pub key: ConfigKey,
    pub value: String,
}

impl ConfigWrite {
    /// Build a write for a key name known at compile time or from the catalogue.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] if `key` is not a valid key name.
    pub fn new(key: &str, value: impl Into<String>) -> Result<Self, AdminError> {
        Ok(Self {
            key: ConfigKey::new(key)?,
            value: value.into(),
        })
    }
}
