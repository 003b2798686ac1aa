//! Decoded HTML form submissions.

use std::collections::HashMap;

/// Multi-valued form body keyed by field name.
///
/// Checkbox groups posted as `name[]` are stored under `name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    fields: HashMap<String, Vec<String>>,
}

impl FormSubmission {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one posted pair.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let mut name = name.into();
        if let Some(stripped) = name.strip_suffix("[]") {
            name = stripped.to_string();
        }
        self.fields.entry(name).or_default().push(value.into());
    }

    /// First value posted for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First value for `name`, or the empty string when the field was not posted.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        self.first(name).unwrap_or_default()
    }

    /// Whether a checkbox named `name` was ticked (first value is `yes`).
    #[must_use]
    pub fn is_checked(&self, name: &str) -> bool {
        self.first(name) == Some(crate::config::YES)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormSubmission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (name, value) in iter {
            form.push(name, value);
        }
        form
    }
}
