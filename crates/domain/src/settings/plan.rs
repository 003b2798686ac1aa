//! Translation between stored values, display values and posted forms.

use std::collections::HashMap;

use super::{Binding, CalibrationTerm, FieldSpec, PageId};
use crate::config::{ConfigWrite, NO, YES, keys, yes_no};
use crate::error::AdminError;
use crate::form::FormSubmission;
use crate::station::{StationInterface, StationLayout, StationType};
use crate::verbosity::Verbosity;

const REMOTE_FTP: &str = "FTP";
const REMOTE_SSH: &str = "SSH";
const REMOTE_NONE: &str = "None";

/// Read access to stored configuration values.
pub trait ValueLookup {
    fn value(&self, key: &str) -> Option<&str>;
}

impl ValueLookup for HashMap<String, String> {
    fn value(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

/// Writes produced by saving a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub writes: Vec<ConfigWrite>,
    /// Station chosen on the form, when the page carries the station selector.
    pub station: Option<StationType>,
}

/// A field together with the value to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValue {
    pub spec: FieldSpec,
    pub value: String,
    pub visible: bool,
}

impl FieldValue {
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.value == YES
    }

    #[must_use]
    pub fn is_selected(&self, choice: &str) -> bool {
        self.value == choice
    }
}

fn configured_station(lookup: &impl ValueLookup) -> Option<StationType> {
    lookup
        .value(keys::STATION_TYPE)
        .and_then(StationType::from_stored)
}

fn pressure_key(station: StationType, term: CalibrationTerm) -> &'static str {
    let (multiplier, constant) = station.pressure_calibration_keys();
    match term {
        CalibrationTerm::Multiplier => multiplier,
        CalibrationTerm::Constant => constant,
    }
}

/// Build the display values of `page` from stored configuration.
///
/// Station-dependent rows and the pressure calibration keys follow the
/// station type currently stored; an unknown type lays out like the simulator.
#[must_use]
pub fn render_values(page: PageId, lookup: &impl ValueLookup) -> Vec<FieldValue> {
    let station = configured_station(lookup);
    let effective = station.unwrap_or(StationType::Simulator);
    let interface = StationInterface::from_stored(
        lookup.value(keys::STATION_INTERFACE).unwrap_or_default(),
    );
    let layout = StationLayout::for_selection(effective, interface);
    let verbosity = Verbosity::from_bits_string(
        lookup.value(keys::STATION_VERBOSE_MSGS).unwrap_or_default(),
    );
    let stored = |key: &str| lookup.value(key).unwrap_or_default().to_string();

    page.fields()
        .into_iter()
        .map(|mut spec| {
            let value = match &spec.binding {
                Binding::Key(key) => stored(key),
                Binding::StationType => station
                    .map(|station| station.label().to_string())
                    .unwrap_or_default(),
                Binding::RemoteExport => {
                    if lookup.value(keys::ENABLE_FTP) == Some(YES) {
                        REMOTE_FTP.to_string()
                    } else if lookup.value(keys::ENABLE_SSH) == Some(YES) {
                        REMOTE_SSH.to_string()
                    } else {
                        REMOTE_NONE.to_string()
                    }
                }
                Binding::VerbosityBit(bit) => yes_no(verbosity.contains(*bit)).to_string(),
                Binding::CalibrationPressure(term) => {
                    let kind = effective.pressure_kind();
                    spec.label = match term {
                        CalibrationTerm::Multiplier => format!("Pressure ({kind}) Multiplier:"),
                        CalibrationTerm::Constant => format!("Pressure ({kind}) Constant:"),
                    };
                    stored(pressure_key(effective, *term))
                }
            };
            let visible = spec.row.is_none_or(|row| layout.is_visible(row));
            FieldValue {
                spec,
                value,
                visible,
            }
        })
        .collect()
}

/// Turn a posted form into the ordered writes for `page`.
///
/// `current_station` selects the pressure calibration keys. Unchecked or
/// missing checkboxes store `no`; missing text fields store the empty string.
///
/// # Errors
///
/// Returns [`AdminError::Validation`] if a catalogue key is malformed.
pub fn plan_writes(
    page: PageId,
    form: &FormSubmission,
    current_station: StationType,
) -> Result<SavePlan, AdminError> {
    let mut writes = Vec::new();
    let mut station = None;
    let mut verbosity: Option<(usize, Verbosity)> = None;

    for spec in page.fields() {
        match &spec.binding {
            Binding::Key(key) => {
                let value = if spec.is_checkbox() {
                    yes_no(form.is_checked(&spec.name))
                } else {
                    form.text(&spec.name)
                };
                writes.push(ConfigWrite::new(key, value)?);
            }
            Binding::StationType => {
                let selected = StationType::from_label(form.text(&spec.name));
                writes.push(ConfigWrite::new(
                    keys::STATION_TYPE,
                    selected.stored_value(),
                )?);
                station = Some(selected);
            }
            Binding::RemoteExport => {
                let (ftp, ssh) = match form.text(&spec.name) {
                    REMOTE_FTP => (YES, NO),
                    REMOTE_SSH => (NO, YES),
                    _ => (NO, NO),
                };
                writes.push(ConfigWrite::new(keys::ENABLE_FTP, ftp)?);
                writes.push(ConfigWrite::new(keys::ENABLE_SSH, ssh)?);
            }
            Binding::VerbosityBit(bit) => {
                let (_, mask) = verbosity.get_or_insert((writes.len(), Verbosity::NONE));
                if form.is_checked(&spec.name) {
                    *mask |= *bit;
                }
            }
            Binding::CalibrationPressure(term) => {
                writes.push(ConfigWrite::new(
                    pressure_key(current_station, *term),
                    form.text(&spec.name),
                )?);
            }
        }
    }

    if let Some((slot, mask)) = verbosity {
        writes.insert(
            slot,
            ConfigWrite::new(keys::STATION_VERBOSE_MSGS, mask.to_bits_string())?,
        );
    }

    Ok(SavePlan { writes, station })
}
