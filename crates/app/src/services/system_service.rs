//! System service: status page, daemon control and network settings.

use wvadmin_domain::config::{ConfigKey, keys};
use wvadmin_domain::daemon::{ControlAction, DaemonStatus};
use wvadmin_domain::error::AdminError;
use wvadmin_domain::form::FormSubmission;
use wvadmin_domain::network::NetworkSettings;
use wvadmin_domain::station::StationType;

use crate::ports::{ArchiveStatistics, ArchiveSummary, ConfigStore, HostSystem};

/// Everything the system status page shows.
#[derive(Debug, Clone)]
pub struct SystemStatus {
    pub station: Option<StationType>,
    pub version: Option<String>,
    pub daemon: DaemonStatus,
    pub network: NetworkSettings,
    pub archive: ArchiveSummary,
}

/// Application service for the system status page.
pub struct SystemService<S, H, A> {
    store: S,
    host: H,
    archive: A,
}

impl<S, H, A> SystemService<S, H, A>
where
    S: ConfigStore,
    H: HostSystem + Sync,
    A: ArchiveStatistics + Sync,
{
    /// Create a new service backed by the given ports.
    pub fn new(store: S, host: H, archive: A) -> Self {
        Self {
            store,
            host,
            archive,
        }
    }

    /// Gather the status page.
    ///
    /// # Errors
    ///
    /// Returns a storage or host error propagated from the ports.
    #[tracing::instrument(skip(self))]
    pub async fn status(&self) -> Result<SystemStatus, AdminError> {
        let key = ConfigKey::new(keys::STATION_TYPE)?;
        let station = self
            .store
            .get(&key)
            .await?
            .and_then(|item| StationType::from_stored(&item.value));

        Ok(SystemStatus {
            station,
            version: self.host.daemon_version().await?,
            daemon: self.host.daemon_state().await?.status(),
            network: self.host.read_network().await?,
            archive: self.archive.summary().await?,
        })
    }

    /// Start a stopped daemon or stop a running one. A daemon that is still
    /// starting is left alone.
    ///
    /// # Errors
    ///
    /// Returns a host error when the control command fails.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_daemon(&self) -> Result<Option<ControlAction>, AdminError> {
        let state = self.host.daemon_state().await?;
        let action = state.control_action();
        match action {
            Some(ControlAction::Start) => self.host.start_daemon().await?,
            Some(ControlAction::Stop) => self.host.stop_daemon().await?,
            None => tracing::info!("daemon is starting, nothing to do"),
        }
        Ok(action)
    }

    /// Write the network files from a posted form, then restart networking.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Validation`] for an incomplete static address,
    /// or a host error when a file cannot be written or the restart fails.
    /// Networking is not restarted when the write fails.
    #[tracing::instrument(skip_all)]
    pub async fn update_network(
        &self,
        form: &FormSubmission,
    ) -> Result<NetworkSettings, AdminError> {
        let settings = NetworkSettings::from_form(form)?;
        self.host.write_network(&settings).await?;
        self.host.restart_networking().await?;
        tracing::info!(dhcp = settings.is_dhcp(), "network settings applied");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fakes::{FakeArchive, FakeHost, HostCall, InMemoryConfigStore};
    use wvadmin_domain::error::ValidationError;

    fn make_service(
        store: InMemoryConfigStore,
        host: &FakeHost,
    ) -> SystemService<InMemoryConfigStore, FakeHost, FakeArchive> {
        SystemService::new(store, host.clone(), FakeArchive::default())
    }

    #[tokio::test]
    async fn should_report_station_version_and_daemon_status() {
        let host = FakeHost {
            version: Some("5.21.7".to_string()),
            ..FakeHost::with_state(true, false)
        };
        let svc = make_service(InMemoryConfigStore::with(&[("STATION_TYPE", "TWI")]), &host);

        let status = svc.status().await.unwrap();

        assert_eq!(status.station, Some(StationType::Twi));
        assert_eq!(status.version.as_deref(), Some("5.21.7"));
        assert_eq!(status.daemon, DaemonStatus::Starting);
        assert_eq!(status.network, NetworkSettings::Dhcp);
    }

    #[tokio::test]
    async fn should_start_stopped_daemon() {
        let host = FakeHost::with_state(false, false);
        let svc = make_service(InMemoryConfigStore::default(), &host);

        let action = svc.toggle_daemon().await.unwrap();

        assert_eq!(action, Some(ControlAction::Start));
        assert_eq!(host.calls(), vec![HostCall::Start]);
    }

    #[tokio::test]
    async fn should_stop_running_daemon() {
        let host = FakeHost::with_state(true, true);
        let svc = make_service(InMemoryConfigStore::default(), &host);

        let action = svc.toggle_daemon().await.unwrap();

        assert_eq!(action, Some(ControlAction::Stop));
        assert_eq!(host.calls(), vec![HostCall::Stop]);
    }

    #[tokio::test]
    async fn should_leave_starting_daemon_alone() {
        let host = FakeHost::with_state(true, false);
        let svc = make_service(InMemoryConfigStore::default(), &host);

        assert_eq!(svc.toggle_daemon().await.unwrap(), None);
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn should_write_network_then_restart() {
        let host = FakeHost::default();
        let svc = make_service(InMemoryConfigStore::default(), &host);
        let form: FormSubmission = [("field_network_dhcp[]", "yes")].into_iter().collect();

        svc.update_network(&form).await.unwrap();

        assert_eq!(
            host.calls(),
            vec![
                HostCall::WriteNetwork(NetworkSettings::Dhcp),
                HostCall::RestartNetworking
            ]
        );
    }

    #[tokio::test]
    async fn should_not_restart_networking_when_write_fails() {
        let host = FakeHost {
            fail_network_write: true,
            ..FakeHost::default()
        };
        let svc = make_service(InMemoryConfigStore::default(), &host);
        let form: FormSubmission = [("field_network_dhcp[]", "yes")].into_iter().collect();

        let result = svc.update_network(&form).await;

        assert!(matches!(result, Err(AdminError::Host(_))));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn should_reject_static_network_without_address() {
        let host = FakeHost::default();
        let svc = make_service(InMemoryConfigStore::default(), &host);

        let result = svc.update_network(&FormSubmission::new()).await;

        assert!(matches!(
            result,
            Err(AdminError::Validation(
                ValidationError::MissingNetworkField { field: "address" }
            ))
        ));
        assert!(host.calls().is_empty());
    }

    #[tokio::test]
    async fn should_not_touch_host_when_network_field_is_not_an_address() {
        let host = FakeHost::default();
        let svc = make_service(InMemoryConfigStore::default(), &host);
        let form: FormSubmission = [
            ("field_network_ip_adrs", "10.0.0.5"),
            ("field_network_mask", "255.255.255.0"),
            ("field_network_gw", "10.0.0.1\npre-up reboot"),
        ]
        .into_iter()
        .collect();

        let result = svc.update_network(&form).await;

        assert!(matches!(
            result,
            Err(AdminError::Validation(
                ValidationError::InvalidNetworkField { field: "gateway" }
            ))
        ));
        assert!(host.calls().is_empty());
    }
}
