//! In-memory port implementations shared by the service tests.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use wvadmin_domain::config::{ConfigItem, ConfigKey};
use wvadmin_domain::daemon::DaemonState;
use wvadmin_domain::error::AdminError;
use wvadmin_domain::network::NetworkSettings;

use crate::ports::{ArchiveStatistics, ArchiveSummary, ConfigStore, HostSystem};

#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    items: Arc<Mutex<BTreeMap<String, ConfigItem>>>,
}

impl InMemoryConfigStore {
    pub fn with(pairs: &[(&str, &str)]) -> Self {
        let store = Self::default();
        {
            let mut items = store.items.lock().unwrap();
            for (key, value) in pairs {
                let key = ConfigKey::new(*key).unwrap();
                items.insert(key.to_string(), ConfigItem::new(key, *value));
            }
        }
        store
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.items
            .lock()
            .unwrap()
            .get(key)
            .map(|item| item.value.clone())
    }

    pub fn item(&self, key: &str) -> Option<ConfigItem> {
        self.items.lock().unwrap().get(key).cloned()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn get(
        &self,
        key: &ConfigKey,
    ) -> impl Future<Output = Result<Option<ConfigItem>, AdminError>> + Send {
        let result = self.items.lock().unwrap().get(key.as_str()).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<ConfigItem>, AdminError>> + Send {
        let result: Vec<ConfigItem> = self.items.lock().unwrap().values().cloned().collect();
        async { Ok(result) }
    }

    fn set(
        &self,
        key: &ConfigKey,
        value: &str,
    ) -> impl Future<Output = Result<(), AdminError>> + Send {
        let mut items = self.items.lock().unwrap();
        items
            .entry(key.to_string())
            .and_modify(|item| item.value = value.to_string())
            .or_insert_with(|| ConfigItem::new(key.clone(), value));
        async { Ok(()) }
    }

    fn create(&self, item: ConfigItem) -> impl Future<Output = Result<(), AdminError>> + Send {
        let mut items = self.items.lock().unwrap();
        items.entry(item.key.to_string()).or_insert(item);
        async { Ok(()) }
    }
}

/// Calls recorded by [`FakeHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    WriteBinary(String),
    Start,
    Stop,
    WriteNetwork(NetworkSettings),
    RestartNetworking,
}

#[derive(Clone, Default)]
pub struct FakeHost {
    pub state: Arc<Mutex<DaemonState>>,
    pub version: Option<String>,
    pub network: NetworkSettings,
    pub existing_paths: Vec<String>,
    pub fail_network_write: bool,
    pub fail_binary_write: bool,
    pub calls: Arc<Mutex<Vec<HostCall>>>,
}

impl FakeHost {
    pub fn with_state(running: bool, indicated: bool) -> Self {
        let host = Self::default();
        *host.state.lock().unwrap() = DaemonState { running, indicated };
        host
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[derive(Debug)]
struct NoSpace;

impl std::fmt::Display for NoSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("no space left on device")
    }
}

impl std::error::Error for NoSpace {}

impl HostSystem for FakeHost {
    fn write_daemon_binary(
        &self,
        binary: &str,
    ) -> impl Future<Output = Result<(), AdminError>> + Send {
        let result = if self.fail_binary_write {
            Err(AdminError::Host(Box::new(NoSpace)))
        } else {
            self.record(HostCall::WriteBinary(binary.to_string()));
            Ok(())
        };
        async { result }
    }

    fn daemon_version(&self) -> impl Future<Output = Result<Option<String>, AdminError>> + Send {
        let version = self.version.clone();
        async { Ok(version) }
    }

    fn daemon_state(&self) -> impl Future<Output = Result<DaemonState, AdminError>> + Send {
        let state = *self.state.lock().unwrap();
        async move { Ok(state) }
    }

    fn start_daemon(&self) -> impl Future<Output = Result<(), AdminError>> + Send {
        self.record(HostCall::Start);
        *self.state.lock().unwrap() = DaemonState {
            running: true,
            indicated: true,
        };
        async { Ok(()) }
    }

    fn stop_daemon(&self) -> impl Future<Output = Result<(), AdminError>> + Send {
        self.record(HostCall::Stop);
        *self.state.lock().unwrap() = DaemonState::default();
        async { Ok(()) }
    }

    fn read_network(&self) -> impl Future<Output = Result<NetworkSettings, AdminError>> + Send {
        let network = self.network.clone();
        async { Ok(network) }
    }

    fn write_network(
        &self,
        settings: &NetworkSettings,
    ) -> impl Future<Output = Result<(), AdminError>> + Send {
        let result = if self.fail_network_write {
            Err(AdminError::Host(Box::new(NoSpace)))
        } else {
            self.record(HostCall::WriteNetwork(settings.clone()));
            Ok(())
        };
        async { result }
    }

    fn restart_networking(&self) -> impl Future<Output = Result<(), AdminError>> + Send {
        self.record(HostCall::RestartNetworking);
        async { Ok(()) }
    }

    fn path_exists(&self, path: &str) -> impl Future<Output = Result<bool, AdminError>> + Send {
        let exists = self.existing_paths.iter().any(|existing| existing == path);
        async move { Ok(exists) }
    }
}

#[derive(Clone, Default)]
pub struct FakeArchive {
    pub summary: ArchiveSummary,
}

impl ArchiveStatistics for FakeArchive {
    fn summary(&self) -> impl Future<Output = Result<ArchiveSummary, AdminError>> + Send {
        let summary = self.summary.clone();
        async { Ok(summary) }
    }
}
