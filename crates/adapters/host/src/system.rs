//! Local implementation of [`HostSystem`].

use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::process::Command;

use wvadmin_app::ports::HostSystem;
use wvadmin_domain::daemon::DaemonState;
use wvadmin_domain::error::AdminError;
use wvadmin_domain::network::NetworkSettings;

use crate::config::HostConfig;
use crate::error::HostError;

/// Host system backed by the local filesystem and service scripts.
#[derive(Clone)]
pub struct LocalHostSystem {
    config: Arc<HostConfig>,
}

impl LocalHostSystem {
    #[must_use]
    pub fn new(config: HostConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

fn io_error(path: &Path, source: std::io::Error) -> HostError {
    HostError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read a file, mapping "not found" to `None`.
async fn read_optional(path: &Path) -> Result<Option<String>, HostError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_error(path, err)),
    }
}

async fn write_file(path: &Path, content: &str) -> Result<(), HostError> {
    tokio::fs::write(path, content)
        .await
        .map_err(|err| io_error(path, err))?;
    tracing::debug!(path = %path.display(), "file written");
    Ok(())
}

async fn exists(path: &Path) -> Result<bool, HostError> {
    tokio::fs::try_exists(path)
        .await
        .map_err(|err| io_error(path, err))
}

/// Run a configured command and wait for it to exit successfully.
async fn run(command: &[String], purpose: &'static str) -> Result<(), HostError> {
    let Some((program, args)) = command.split_first() else {
        return Err(HostError::NoCommand { purpose });
    };

    tracing::info!(purpose, command = %command.join(" "), "running host command");
    let status = Command::new(program)
        .args(args)
        .status()
        .await
        .map_err(|source| HostError::Spawn {
            program: program.clone(),
            source,
        })?;

    if status.success() {
        Ok(())
    } else {
        tracing::error!(purpose, %status, "host command failed");
        Err(HostError::CommandFailed {
            program: program.clone(),
            status: status.to_string(),
        })
    }
}

/// Whether the pid file names a live process.
async fn pid_is_alive(pid_path: &Path, proc_dir: &Path) -> Result<bool, HostError> {
    let Some(content) = read_optional(pid_path).await? else {
        return Ok(false);
    };
    match content.trim().parse::<u32>() {
        Ok(pid) => exists(&proc_dir.join(pid.to_string())).await,
        Err(_) => {
            tracing::warn!(path = %pid_path.display(), "unreadable pid file");
            Ok(false)
        }
    }
}

impl HostSystem for LocalHostSystem {
    fn write_daemon_binary(
        &self,
        binary: &str,
    ) -> impl Future<Output = Result<(), AdminError>> + Send {
        let path = self.config.binary_path();
        let binary = binary.to_string();
        async move {
            write_file(&path, &binary).await?;
            Ok(())
        }
    }

    fn daemon_version(&self) -> impl Future<Output = Result<Option<String>, AdminError>> + Send {
        let path = self.config.version_path();
        async move {
            let version = read_optional(&path)
                .await?
                .map(|content| content.trim().to_string())
                .filter(|version| !version.is_empty());
            Ok(version)
        }
    }

    fn daemon_state(&self) -> impl Future<Output = Result<DaemonState, AdminError>> + Send {
        let config = Arc::clone(&self.config);
        async move {
            let running = pid_is_alive(&config.pid_path(), &config.proc_dir).await?;
            let indicated = exists(&config.running_path()).await?;
            Ok(DaemonState { running, indicated })
        }
    }

    fn start_daemon(&self) -> impl Future<Output = Result<(), AdminError>> + Send {
        let config = Arc::clone(&self.config);
        async move {
            run(&config.start_command, "start daemons").await?;
            tokio::time::sleep(config.start_settle).await;
            Ok(())
        }
    }

    fn stop_daemon(&self) -> impl Future<Output = Result<(), AdminError>> + Send {
        let config = Arc::clone(&self.config);
        async move {
            run(&config.stop_command, "stop daemons").await?;
            Ok(())
        }
    }

    fn read_network(&self) -> impl Future<Output = Result<NetworkSettings, AdminError>> + Send {
        let config = Arc::clone(&self.config);
        async move {
            let interfaces = read_optional(&config.interfaces_path).await?;
            let resolv = read_optional(&config.resolv_conf_path).await?;
            Ok(NetworkSettings::parse(
                interfaces.as_deref(),
                resolv.as_deref(),
            ))
        }
    }

    fn write_network(
        &self,
        settings: &NetworkSettings,
    ) -> impl Future<Output = Result<(), AdminError>> + Send {
        let config = Arc::clone(&self.config);
        let interfaces = settings.render_interfaces();
        let resolv = settings.render_resolv_conf();
        async move {
            write_file(&config.interfaces_path, &interfaces).await?;
            if let Some(resolv) = resolv {
                write_file(&config.resolv_conf_path, &resolv).await?;
            }
            Ok(())
        }
    }

    fn restart_networking(&self) -> impl Future<Output = Result<(), AdminError>> + Send {
        let config = Arc::clone(&self.config);
        async move {
            run(&config.network_restart_command, "restart networking").await?;
            Ok(())
        }
    }

    fn path_exists(&self, path: &str) -> impl Future<Output = Result<bool, AdminError>> + Send {
        let path = PathBuf::from(path);
        async move { Ok(exists(&path).await?) }
    }
}
