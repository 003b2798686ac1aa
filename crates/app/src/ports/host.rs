//! Host system port: files and commands on the machine running the daemons.

use std::future::Future;

use wvadmin_domain::daemon::DaemonState;
use wvadmin_domain::error::AdminError;
use wvadmin_domain::network::NetworkSettings;

/// Side effects on the station host.
pub trait HostSystem {
    /// Record which station daemon binary the service script launches.
    fn write_daemon_binary(
        &self,
        binary: &str,
    ) -> impl Future<Output = Result<(), AdminError>> + Send;

    /// Installed daemon suite version, if known.
    fn daemon_version(&self) -> impl Future<Output = Result<Option<String>, AdminError>> + Send;

    /// Whether the daemon runs and whether it marked itself as up.
    fn daemon_state(&self) -> impl Future<Output = Result<DaemonState, AdminError>> + Send;

    fn start_daemon(&self) -> impl Future<Output = Result<(), AdminError>> + Send;

    fn stop_daemon(&self) -> impl Future<Output = Result<(), AdminError>> + Send;

    /// Current `eth0` settings.
    fn read_network(&self) -> impl Future<Output = Result<NetworkSettings, AdminError>> + Send;

    /// Write the `interfaces` file and, for static addressing, `resolv.conf`.
    fn write_network(
        &self,
        settings: &NetworkSettings,
    ) -> impl Future<Output = Result<(), AdminError>> + Send;

    fn restart_networking(&self) -> impl Future<Output = Result<(), AdminError>> + Send;

    /// Whether a filesystem path exists, such as a serial device node.
    fn path_exists(&self, path: &str) -> impl Future<Output = Result<bool, AdminError>> + Send;
}
