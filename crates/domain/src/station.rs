//! Station model: supported station families and the station form layout.

use serde::{Deserialize, Serialize};

/// Weather station families the daemon suite can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationType {
    VantagePro,
    Ws2300,
    Wmr918,
    WmrUsb,
    Wxt510,
    Twi,
    Wh1080,
    Te923,
    Virtual,
    Simulator,
}

impl StationType {
    /// Every station family, in the order the selector lists them.
    pub const ALL: [Self; 10] = [
        Self::VantagePro,
        Self::Ws2300,
        Self::Wmr918,
        Self::WmrUsb,
        Self::Wxt510,
        Self::Twi,
        Self::Wh1080,
        Self::Te923,
        Self::Virtual,
        Self::Simulator,
    ];

    /// Value persisted under `STATION_TYPE`.
    #[must_use]
    pub fn stored_value(self) -> &'static str {
        match self {
            Self::VantagePro => "VantagePro",
            Self::Ws2300 => "WS-2300",
            Self::Wmr918 => "WMR918",
            Self::WmrUsb => "WMRUSB",
            Self::Wxt510 => "WXT510",
            Self::Twi => "TWI",
            Self::Wh1080 => "WH1080",
            Self::Te923 => "TE923",
            Self::Virtual => "Virtual",
            Self::Simulator => "Simulator",
        }
    }

    /// Human-readable label shown (and posted) by the station selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::VantagePro => "Davis Vantage Pro",
            Self::Ws2300 => "La Crosse WS-23XX",
            Self::Wmr918 => "Oregon Scientific WMR9XX",
            Self::WmrUsb => "Oregon Scientific WMRUSB",
            Self::Wxt510 => "Viasala WXT510",
            Self::Twi => "Texas Weather Instruments",
            Self::Wh1080 => "Fine Offset WH1080",
            Self::Te923 => "Honeywell TE923",
            Self::Virtual => "Virtual",
            Self::Simulator => "Simulator",
        }
    }

    /// Name of the station daemon binary the service script launches.
    #[must_use]
    pub fn daemon_binary(self) -> &'static str {
        match self {
            Self::VantagePro => "wviewd_vpro",
            Self::Ws2300 => "wviewd_ws2300",
            Self::Wmr918 => "wviewd_wmr918",
            Self::WmrUsb => "wviewd_wmrusb",
            Self::Wxt510 => "wviewd_wxt510",
            Self::Twi => "wviewd_twi",
            Self::Wh1080 => "wviewd_wh1080",
            Self::Te923 => "wviewd_te923",
            Self::Virtual => "wviewd_virtual",
            Self::Simulator => "wviewd_sim",
        }
    }

    /// Resolve a selector label. Unknown labels select the simulator.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|station| station.label() == label)
            .unwrap_or(Self::Simulator)
    }

    /// Resolve a stored `STATION_TYPE` value.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|station| station.stored_value() == value)
    }

    /// Stations that only talk native USB (or nothing at all) and need no
    /// interface configuration.
    #[must_use]
    pub fn has_fixed_interface(self) -> bool {
        matches!(
            self,
            Self::WmrUsb | Self::Wh1080 | Self::Te923 | Self::Simulator
        )
    }

    /// Whether the station reports barometric (`BP`) rather than station (`SP`)
    /// pressure on the calibration page.
    #[must_use]
    pub fn pressure_kind(self) -> &'static str {
        if self == Self::VantagePro { "BP" } else { "SP" }
    }

    /// Calibration keys used for the pressure multiplier and constant.
    #[must_use]
    pub fn pressure_calibration_keys(self) -> (&'static str, &'static str) {
        match self {
            Self::VantagePro | Self::Te923 | Self::Twi => {
                ("CAL_MULT_BAROMETER", "CAL_CONST_BAROMETER")
            }
            _ => ("CAL_MULT_PRESSURE", "CAL_CONST_PRESSURE"),
        }
    }
}

/// Physical link between the server and the station console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationInterface {
    #[default]
    Serial,
    Ethernet,
}

impl StationInterface {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Ethernet => "ethernet",
        }
    }

    /// Parse a stored `STATION_INTERFACE` value; anything but `ethernet` is serial.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        if value == "ethernet" {
            Self::Ethernet
        } else {
            Self::Serial
        }
    }
}

/// Rows of the station form whose visibility depends on the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationRow {
    WeatherLinkIp,
    RetrieveArchive,
    Interface,
    Device,
    Host,
    Port,
    Location,
    SerialDtr,
    RxCheck,
    OutsideChannel,
}

impl StationRow {
    /// DOM id of the table row.
    #[must_use]
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::WeatherLinkIp => "wlinkip",
            Self::RetrieveArchive => "wlinkarchive",
            Self::Interface => "interface",
            Self::Device => "devicename",
            Self::Host => "hostname",
            Self::Port => "portnumber",
            Self::Location => "location",
            Self::SerialDtr => "serialdtr",
            Self::RxCheck => "rxcheck",
            Self::OutsideChannel => "wmrchan",
        }
    }
}

/// Visible rows of the station form for one station/interface selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StationLayout {
    station: StationType,
    interface: StationInterface,
}

impl StationLayout {
    #[must_use]
    pub fn for_selection(station: StationType, interface: StationInterface) -> Self {
        Self { station, interface }
    }

    /// Whether `row` is shown for this selection.
    #[must_use]
    pub fn is_visible(self, row: StationRow) -> bool {
        let configurable = !self.station.has_fixed_interface();
        match row {
            StationRow::WeatherLinkIp | StationRow::RetrieveArchive | StationRow::RxCheck => {
                self.station == StationType::VantagePro
            }
            StationRow::Interface => configurable,
            StationRow::Device => configurable && self.interface == StationInterface::Serial,
            StationRow::Host | StationRow::Port => {
                configurable && self.interface == StationInterface::Ethernet
            }
            StationRow::Location => self.station != StationType::VantagePro,
            StationRow::SerialDtr => {
                matches!(self.station, StationType::Wxt510 | StationType::Twi)
            }
            StationRow::OutsideChannel => self.station == StationType::Wmr918,
        }
    }

    /// Help text shown beside the communication section.
    #[must_use]
    pub fn communication_note(self) -> &'static str {
        if self.station.has_fixed_interface() {
            "The simulator has no station interface. The WMRUSB/WH1080/TE923 weather \
             stations only support a native USB interface. No interface configuration \
             is required."
        } else {
            "The weather station can be connected using a serial or ethernet interface."
        }
    }
}
