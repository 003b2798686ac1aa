//! Network settings of the host's `eth0` interface.
//!
//! Rendered into a Debian `interfaces` file and, for static addressing, a
//! `resolv.conf` with two name servers.

use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::form::FormSubmission;

/// How `eth0` obtains its address.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum NetworkSettings {
    #[default]
    Dhcp,
    Static {
        address: String,
        netmask: String,
        gateway: String,
        dns1: String,
        dns2: String,
    },
}

impl NetworkSettings {
    /// Decode the network form of the system page.
    ///
    /// Every filled field must be a dotted IPv4 address; the values are
    /// written verbatim into root-owned files.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingNetworkField`] when static addressing
    /// is chosen without an address or netmask, and
    /// [`ValidationError::InvalidNetworkField`] for any value that is not an
    /// IPv4 address.
    pub fn from_form(form: &FormSubmission) -> Result<Self, ValidationError> {
        if form.is_checked("field_network_dhcp") {
            return Ok(Self::Dhcp);
        }
        let optional = |name: &str, field: &'static str| {
            let value = form.text(name).trim();
            if value.is_empty() {
                return Ok(String::new());
            }
            value
                .parse::<Ipv4Addr>()
                .map(|addr| addr.to_string())
                .map_err(|_| ValidationError::InvalidNetworkField { field })
        };
        let required = |name: &str, field: &'static str| {
            let value = optional(name, field)?;
            if value.is_empty() {
                Err(ValidationError::MissingNetworkField { field })
            } else {
                Ok(value)
            }
        };
        Ok(Self::Static {
            address: required("field_network_ip_adrs", "address")?,
            netmask: required("field_network_mask", "netmask")?,
            gateway: optional("field_network_gw", "gateway")?,
            dns1: optional("field_network_dns1", "dns1")?,
            dns2: optional("field_network_dns2", "dns2")?,
        })
    }

    #[must_use]
    pub fn is_dhcp(&self) -> bool {
        matches!(self, Self::Dhcp)
    }

    /// Contents of the `interfaces` file.
    #[must_use]
    pub fn render_interfaces(&self) -> String {
        let mut out = String::from("auto lo\niface lo inet loopback\n\nauto eth0\n");
        match self {
            Self::Dhcp => out.push_str("iface eth0 inet dhcp\n"),
            Self::Static {
                address,
                netmask,
                gateway,
                ..
            } => {
                out.push_str("iface eth0 inet static\n");
                out.push_str(&format!("address {address}\nnetmask {netmask}\ngateway {gateway}\n"));
            }
        }
        out
    }

    /// Contents of `resolv.conf`; `None` for DHCP, which leaves it untouched.
    #[must_use]
    pub fn render_resolv_conf(&self) -> Option<String> {
        match self {
            Self::Dhcp => None,
            Self::Static { dns1, dns2, .. } => {
                Some(format!("nameserver {dns1}\nnameserver {dns2}\n"))
            }
        }
    }

    /// Read back the `eth0` stanza of an `interfaces` file and the name
    /// servers of a `resolv.conf`.
    ///
    /// A missing `interfaces` file or a non-static stanza reads as DHCP.
    #[must_use]
    pub fn parse(interfaces: Option<&str>, resolv: Option<&str>) -> Self {
        let Some(interfaces) = interfaces else {
            return Self::Dhcp;
        };

        let mut in_eth0 = false;
        let mut is_static = false;
        let mut address = String::new();
        let mut netmask = String::new();
        let mut gateway = String::new();

        for line in interfaces.lines() {
            let mut words = line.split_whitespace();
            match (words.next(), words.next()) {
                (Some("iface"), Some(name)) => {
                    in_eth0 = name == "eth0";
                    if in_eth0 {
                        is_static = line.split_whitespace().nth(3) == Some("static");
                    }
                }
                (Some("address"), Some(value)) if in_eth0 => address = value.to_string(),
                (Some("netmask"), Some(value)) if in_eth0 => netmask = value.to_string(),
                (Some("gateway"), Some(value)) if in_eth0 => gateway = value.to_string(),
                _ => {}
            }
        }

        if !is_static {
            return Self::Dhcp;
        }

        let mut servers = resolv
            .unwrap_or_default()
            .lines()
            .filter_map(|line| {
                let mut words = line.split_whitespace();
                match (words.next(), words.next()) {
                    (Some("nameserver"), Some(server)) => Some(server.to_string()),
                    _ => None,
                }
            });

        Self::Static {
            address,
            netmask,
            gateway,
            dns1: servers.next().unwrap_or_default(),
            dns2: servers.next().unwrap_or_default(),
        }
    }
}
