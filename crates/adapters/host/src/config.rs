//! Host paths and service commands.

use std::path::PathBuf;
use std::time::Duration;

/// File name selecting the station daemon started by the service script.
pub(crate) const BINARY_FILE: &str = "wview-binary";
/// File holding the installed suite version.
pub(crate) const VERSION_FILE: &str = "wview-version";
/// Pid file written by the station daemon.
pub(crate) const PID_FILE: &str = "wviewd.pid";
/// Marker written once the daemon suite is up.
pub(crate) const RUNNING_FILE: &str = "wview-running";

/// Where the daemon suite lives on the host and how to drive it.
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Daemon configuration directory (`<prefix>/wview`).
    pub config_dir: PathBuf,
    /// Directory holding the pid file and the running marker.
    pub run_dir: PathBuf,
    /// Process table used to check that the recorded pid is alive.
    pub proc_dir: PathBuf,
    pub interfaces_path: PathBuf,
    pub resolv_conf_path: PathBuf,
    pub start_command: Vec<String>,
    pub stop_command: Vec<String>,
    pub network_restart_command: Vec<String>,
    /// Pause after starting the daemons so the status page sees them.
    pub start_settle: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            config_dir: PathBuf::from("/etc/wview"),
            run_dir: PathBuf::from("/var/lib/wview"),
            proc_dir: PathBuf::from("/proc"),
            interfaces_path: PathBuf::from("/etc/network/interfaces"),
            resolv_conf_path: PathBuf::from("/etc/resolv.conf"),
            start_command: command(&["sudo", "/etc/init.d/wview", "start"]),
            stop_command: command(&["sudo", "/etc/init.d/wview", "stop"]),
            network_restart_command: command(&["sudo", "/etc/init.d/networking", "restart"]),
            start_settle: Duration::from_secs(1),
        }
    }
}

impl HostConfig {
    pub(crate) fn binary_path(&self) -> PathBuf {
        self.config_dir.join(BINARY_FILE)
    }

    pub(crate) fn version_path(&self) -> PathBuf {
        self.config_dir.join(VERSION_FILE)
    }

    pub(crate) fn pid_path(&self) -> PathBuf {
        self.run_dir.join(PID_FILE)
    }

    pub(crate) fn running_path(&self) -> PathBuf {
        self.run_dir.join(RUNNING_FILE)
    }
}

fn command(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_have_debian_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.binary_path(), PathBuf::from("/etc/wview/wview-binary"));
        assert_eq!(config.pid_path(), PathBuf::from("/var/lib/wview/wviewd.pid"));
        assert_eq!(config.start_command, ["sudo", "/etc/init.d/wview", "start"]);
        assert_eq!(config.start_settle, Duration::from_secs(1));
    }
}
