//! Settings pages: declarative field catalogues bound to configuration keys.
//!
//! Every page is a list of [`FieldSpec`]s. Loading a page turns stored values
//! into display values ([`render_values`]) and saving turns a posted form into
//! an ordered list of [`ConfigWrite`](crate::config::ConfigWrite)s
//! ([`plan_writes`]).

mod catalog;
mod plan;

use std::fmt;
use std::str::FromStr;

pub use plan::{FieldValue, SavePlan, ValueLookup, plan_writes, render_values};

use crate::error::NotFoundError;
use crate::station::StationRow;
use crate::verbosity::Verbosity;

/// One of the configuration pages of the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageId {
    Station,
    Services,
    FileGeneration,
    Alarms,
    Calibration,
    Cwop,
    Ftp,
    Ssh,
    HttpServices,
    SqlExport,
}

impl PageId {
    /// Every page, in navigation order.
    pub const ALL: [Self; 10] = [
        Self::Station,
        Self::Services,
        Self::FileGeneration,
        Self::Alarms,
        Self::Calibration,
        Self::Cwop,
        Self::Ftp,
        Self::Ssh,
        Self::HttpServices,
        Self::SqlExport,
    ];

    /// URL path segment.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Station => "station",
            Self::Services => "services",
            Self::FileGeneration => "file_generation",
            Self::Alarms => "alarms",
            Self::Calibration => "calibration",
            Self::Cwop => "cwop",
            Self::Ftp => "ftp",
            Self::Ssh => "ssh",
            Self::HttpServices => "http_services",
            Self::SqlExport => "sql_export",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Station => "Station",
            Self::Services => "Services",
            Self::FileGeneration => "File Generation",
            Self::Alarms => "Alarms",
            Self::Calibration => "Calibration",
            Self::Cwop => "CWOP",
            Self::Ftp => "FTP",
            Self::Ssh => "SSH",
            Self::HttpServices => "HTTP Services",
            Self::SqlExport => "SQL Export",
        }
    }

    /// Resolve a URL path segment.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError`] for an unknown slug.
    pub fn from_slug(slug: &str) -> Result<Self, NotFoundError> {
        Self::ALL
            .into_iter()
            .find(|page| page.slug() == slug)
            .ok_or_else(|| NotFoundError {
                entity: "Settings page",
                id: slug.to_string(),
            })
    }

    /// Field catalogue of this page, in form order.
    #[must_use]
    pub fn fields(self) -> Vec<FieldSpec> {
        match self {
            Self::Station => catalog::station(),
            Self::Services => catalog::services(),
            Self::FileGeneration => catalog::file_generation(),
            Self::Alarms => catalog::alarms(),
            Self::Calibration => catalog::calibration(),
            Self::Cwop => catalog::cwop(),
            Self::Ftp => catalog::ftp(),
            Self::Ssh => catalog::ssh(),
            Self::HttpServices => catalog::http_services(),
            Self::SqlExport => catalog::sql_export(),
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for PageId {
    type Err = NotFoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s)
    }
}

/// An option of a radio group or select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// HTML widget used for a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Password,
    Checkbox,
    Radio(Vec<Choice>),
    Select(Vec<Choice>),
}

/// Which half of a calibration pair a field edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationTerm {
    Multiplier,
    Constant,
}

/// How a field maps onto the configuration store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Read and write one key verbatim. Checkboxes store `yes`/`no`.
    Key(String),
    /// Station selector: form label on screen, stored value in the store.
    StationType,
    /// `FTP`/`SSH`/`None` radio backed by `ENABLE_FTP` and `ENABLE_SSH`.
    RemoteExport,
    /// One bit of `STATION_VERBOSE_MSGS`.
    VerbosityBit(Verbosity),
    /// Pressure calibration, keyed by the configured station type.
    CalibrationPressure(CalibrationTerm),
}

/// One form field of a settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Posted form name.
    pub name: String,
    pub label: String,
    pub help: Option<String>,
    pub kind: FieldKind,
    pub binding: Binding,
    /// Heading of the group the field belongs to.
    pub section: String,
    /// Station-form row controlling visibility, if any.
    pub row: Option<StationRow>,
}

impl FieldSpec {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
        binding: Binding,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            help: None,
            kind,
            binding,
            section: String::new(),
            row: None,
        }
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    #[must_use]
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    #[must_use]
    pub fn on_row(mut self, row: StationRow) -> Self {
        self.row = Some(row);
        self
    }

    #[must_use]
    pub fn is_checkbox(&self) -> bool {
        self.kind == FieldKind::Checkbox
    }
}
