//! Admin password and session cookie policy.
//!
//! The password is stored as the lowercase hex MD5 digest under
//! `ADMIN_PASSWORD`, and the `verify` cookie carries that same digest.

use std::fmt;
use std::time::Duration;

use md5::{Digest, Md5};

use crate::error::ValidationError;

/// Password installed when none is stored yet.
pub const DEFAULT_PASSWORD: &str = "wview";
/// Name of the session cookie.
pub const COOKIE_NAME: &str = "verify";
/// Metadata written with a freshly created password row.
pub const PASSWORD_DESCRIPTION: &str = "Admin Password (md5):";
pub const PASSWORD_DEPENDS_ON: &str = "NULL";
/// Message shown on a failed login.
pub const INCORRECT_PASSWORD: &str = "Incorrect password.";

/// Lowercase hex MD5 digest of a password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash a plain-text password.
    #[must_use]
    pub fn from_plain(password: &str) -> Self {
        Self(format!("{:x}", Md5::digest(password.as_bytes())))
    }

    /// Wrap a digest read back from the store.
    #[must_use]
    pub fn from_stored(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    #[must_use]
    pub fn default_password() -> Self {
        Self::from_plain(DEFAULT_PASSWORD)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `password` hashes to this digest.
    #[must_use]
    pub fn verifies(&self, password: &str) -> bool {
        Self::from_plain(password) == *self
    }

    /// Whether a cookie value carries this digest.
    #[must_use]
    pub fn authorises(&self, cookie: &str) -> bool {
        !self.0.is_empty() && self.0 == cookie
    }
}

impl fmt::Display for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check a password change request and hash the new password.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyPassword`] when the first entry is empty and
/// [`ValidationError::PasswordMismatch`] when the entries differ.
pub fn new_password(first: &str, second: &str) -> Result<PasswordDigest, ValidationError> {
    if first.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    if first != second {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(PasswordDigest::from_plain(first))
}

/// Cookie lifetime rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Inactivity timeout in minutes; 0 issues a browser-session cookie.
    pub timeout_minutes: u32,
    /// Re-issue the cookie on every authorised request.
    pub check_activity: bool,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            timeout_minutes: 30,
            check_activity: true,
        }
    }
}

impl SessionPolicy {
    /// Cookie `Max-Age`, or `None` for a session cookie.
    #[must_use]
    pub fn max_age(self) -> Option<Duration> {
        (self.timeout_minutes > 0).then(|| Duration::from_secs(u64::from(self.timeout_minutes) * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_hash_default_password_as_lowercase_md5_hex() {
        assert_eq!(
            PasswordDigest::default_password().as_str(),
            "9798e81db4d6cc93577169c395b90f66"
        );
    }

    #[test]
    fn should_verify_matching_password_only() {
        let digest = PasswordDigest::from_plain("secret");
        assert!(digest.verifies("secret"));
        assert!(!digest.verifies("Secret"));
    }

    #[test]
    fn should_authorise_cookie_carrying_the_digest() {
        let digest = PasswordDigest::from_plain("secret");
        assert!(digest.authorises(digest.as_str()));
        assert!(!digest.authorises("secret"));
        assert!(!PasswordDigest::from_stored("").authorises(""));
    }

    #[test]
    fn should_reject_mismatched_or_empty_new_password() {
        assert_eq!(
            new_password("one", "two"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(new_password("", ""), Err(ValidationError::EmptyPassword));
        assert_eq!(
            new_password("same", "same"),
            Ok(PasswordDigest::from_plain("same"))
        );
    }

    #[test]
    fn should_default_to_thirty_minute_renewing_session() {
        let policy = SessionPolicy::default();
        assert_eq!(policy.max_age(), Some(Duration::from_secs(1800)));
        assert!(policy.check_activity);
    }

    #[test]
    fn should_issue_session_cookie_when_timeout_is_zero() {
        let policy = SessionPolicy {
            timeout_minutes: 0,
            check_activity: false,
        };
        assert_eq!(policy.max_age(), None);
    }
}
