//! Settings service: use-cases for the configuration pages.

use std::collections::HashMap;

use wvadmin_domain::config::{ConfigKey, keys};
use wvadmin_domain::error::AdminError;
use wvadmin_domain::form::FormSubmission;
use wvadmin_domain::settings::{FieldValue, PageId, SavePlan, plan_writes, render_values};
use wvadmin_domain::station::{StationInterface, StationLayout, StationRow, StationType};

use crate::ports::{ConfigStore, HostSystem};

/// A settings page ready to render.
#[derive(Debug, Clone)]
pub struct SettingsPage {
    pub page: PageId,
    pub fields: Vec<FieldValue>,
    /// Configured station, shown in the page header.
    pub station: Option<StationType>,
    /// Communication help for the station page.
    pub note: Option<&'static str>,
    /// The configured serial device does not exist on the host.
    pub device_missing: bool,
}

/// Application service for loading and saving settings pages.
pub struct SettingsService<S, H> {
    store: S,
    host: H,
}

impl<S: ConfigStore, H: HostSystem + Sync> SettingsService<S, H> {
    /// Create a new service backed by the given store and host.
    pub fn new(store: S, host: H) -> Self {
        Self { store, host }
    }

    async fn stored_values(&self) -> Result<HashMap<String, String>, AdminError> {
        Ok(self
            .store
            .get_all()
            .await?
            .into_iter()
            .map(|item| (item.key.to_string(), item.value))
            .collect())
    }

    async fn configured_station(&self) -> Result<Option<StationType>, AdminError> {
        let key = ConfigKey::new(keys::STATION_TYPE)?;
        Ok(self
            .store
            .get(&key)
            .await?
            .and_then(|item| StationType::from_stored(&item.value)))
    }

    /// Load the current values of `page`.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the configuration store, or a host error
    /// when the device check fails.
    #[tracing::instrument(skip(self))]
    pub async fn load_page(&self, page: PageId) -> Result<SettingsPage, AdminError> {
        let values = self.stored_values().await?;
        let station = values
            .get(keys::STATION_TYPE)
            .map(String::as_str)
            .and_then(StationType::from_stored);
        let fields = render_values(page, &values);

        let mut note = None;
        let mut device_missing = false;
        if page == PageId::Station {
            let interface = StationInterface::from_stored(
                values
                    .get(keys::STATION_INTERFACE)
                    .map_or("", String::as_str),
            );
            let layout = StationLayout::for_selection(
                station.unwrap_or(StationType::Simulator),
                interface,
            );
            note = Some(layout.communication_note());

            let device = values.get(keys::STATION_DEV).map_or("", String::as_str);
            if layout.is_visible(StationRow::Device) && !device.is_empty() {
                device_missing = !self.host.path_exists(device).await?;
            }
        }

        Ok(SettingsPage {
            page,
            fields,
            station,
            note,
            device_missing,
        })
    }

    /// Persist a posted form for `page`.
    ///
    /// Saving the station page also selects the matching daemon binary,
    /// before any setting is stored.
    ///
    /// # Errors
    ///
    /// Returns a storage error from the configuration store or a host error
    /// when the daemon binary cannot be recorded.
    #[tracing::instrument(skip(self, form))]
    pub async fn save_page(
        &self,
        page: PageId,
        form: &FormSubmission,
    ) -> Result<SavePlan, AdminError> {
        let current = self
            .configured_station()
            .await?
            .unwrap_or(StationType::Simulator);
        let plan = plan_writes(page, form, current)?;

        // The binary file goes first so a failed write leaves the stored
        // station unchanged.
        if let Some(station) = plan.station {
            self.host.write_daemon_binary(station.daemon_binary()).await?;
        }

        if let Err(err) = self.store.set_many(&plan.writes).await {
            if let Some(station) = plan.station {
                tracing::error!(
                    error = %err,
                    binary = station.daemon_binary(),
                    "daemon binary written but station settings not saved"
                );
            }
            return Err(err);
        }

        if let Some(station) = plan.station {
            tracing::info!(
                station = station.stored_value(),
                binary = station.daemon_binary(),
                "station daemon selected"
            );
        }

        tracing::info!(writes = plan.writes.len(), "settings saved");
        Ok(plan)
    }
}
