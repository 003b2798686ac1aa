//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `wvadmin.toml` in the working directory (or the file named by
//! `WVADMIN_CONFIG`). Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use wvadmin_adapter_host::HostConfig;
use wvadmin_adapter_http_axum::state::HttpOptions;
use wvadmin_domain::auth::SessionPolicy;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub paths: PathsConfig,
    pub commands: CommandsConfig,
    pub auth: AuthConfig,
    pub archive: ArchiveConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` databases shared with the station daemons.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Configuration database, created when missing.
    pub url: String,
    /// Archive records, read only.
    pub archive_url: String,
    /// NOAA day summaries, read only.
    pub noaa_url: String,
}

/// Host file locations.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// `<prefix>/wview`, holding `wview-binary` and `wview-version`.
    pub config_dir: PathBuf,
    /// Holds `wviewd.pid` and the `wview-running` marker.
    pub run_dir: PathBuf,
    pub interfaces: PathBuf,
    pub resolv_conf: PathBuf,
}

/// Service commands, as argv lists.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    pub start: Vec<String>,
    pub stop: Vec<String>,
    pub network_restart: Vec<String>,
    /// Pause after starting the daemons, in seconds.
    pub start_settle_secs: u64,
}

/// Password gate settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Inactivity timeout; 0 keeps the cookie for the browser session.
    pub timeout_minutes: u32,
    /// Renew the cookie on every authorised request.
    pub check_activity: bool,
    /// Where `/logout` sends the browser.
    pub logout_url: String,
}

/// Archive navigator settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Base URL of the generated report files.
    pub report_base_url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from the config file (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("WVADMIN_CONFIG").unwrap_or_else(|_| "wvadmin.toml".to_string());
        let mut config = Self::from_file(&path)?;
        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("WVADMIN_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("WVADMIN_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("WVADMIN_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("WVADMIN_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("WVADMIN_ARCHIVE_DATABASE_URL") {
            self.database.archive_url = val;
        }
        if let Some(val) = var("WVADMIN_NOAA_DATABASE_URL") {
            self.database.noaa_url = val;
        }
        if let Some(val) = var("WVADMIN_CONFIG_DIR") {
            self.paths.config_dir = PathBuf::from(val);
        }
        if let Some(val) = var("WVADMIN_RUN_DIR") {
            self.paths.run_dir = PathBuf::from(val);
        }
        if let Some(minutes) = var("WVADMIN_SESSION_TIMEOUT").and_then(|val| val.parse().ok()) {
            self.auth.timeout_minutes = minutes;
        }
        if let Some(val) = var("WVADMIN_REPORT_BASE_URL") {
            self.archive.report_base_url = val;
        }
        if let Some(val) = var("WVADMIN_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        for (name, command) in [
            ("commands.start", &self.commands.start),
            ("commands.stop", &self.commands.stop),
            ("commands.network_restart", &self.commands.network_restart),
        ] {
            if command.is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Host adapter settings.
    #[must_use]
    pub fn host_config(&self) -> HostConfig {
        HostConfig {
            config_dir: self.paths.config_dir.clone(),
            run_dir: self.paths.run_dir.clone(),
            interfaces_path: self.paths.interfaces.clone(),
            resolv_conf_path: self.paths.resolv_conf.clone(),
            start_command: self.commands.start.clone(),
            stop_command: self.commands.stop.clone(),
            network_restart_command: self.commands.network_restart.clone(),
            start_settle: Duration::from_secs(self.commands.start_settle_secs),
            ..HostConfig::default()
        }
    }

    /// HTTP adapter settings.
    #[must_use]
    pub fn http_options(&self) -> HttpOptions {
        HttpOptions {
            session: SessionPolicy {
                timeout_minutes: self.auth.timeout_minutes,
                check_activity: self.auth.check_activity,
            },
            report_base_url: self.archive.report_base_url.clone(),
            logout_url: self.auth.logout_url.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:/etc/wview/wview-conf.sdb".to_string(),
            archive_url: "sqlite:/var/lib/wview/archive/wview-archive.sdb".to_string(),
            noaa_url: "sqlite:/var/lib/wview/archive/wview-noaa.sdb".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let host = HostConfig::default();
        Self {
            config_dir: host.config_dir,
            run_dir: host.run_dir,
            interfaces: host.interfaces_path,
            resolv_conf: host.resolv_conf_path,
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        let host = HostConfig::default();
        Self {
            start: host.start_command,
            stop: host.stop_command,
            network_restart: host.network_restart_command,
            start_settle_secs: host.start_settle.as_secs(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        let session = SessionPolicy::default();
        Self {
            timeout_minutes: session.timeout_minutes,
            check_activity: session.check_activity,
            logout_url: HttpOptions::default().logout_url,
        }
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            report_base_url: HttpOptions::default().report_base_url,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wvadmind=info,wvadmin=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.url, "sqlite:/etc/wview/wview-conf.sdb");
        assert_eq!(config.paths.config_dir, PathBuf::from("/etc/wview"));
        assert_eq!(config.commands.start, ["sudo", "/etc/init.d/wview", "start"]);
        assert_eq!(config.auth.timeout_minutes, 30);
        assert!(config.auth.check_activity);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:conf.sdb'
            archive_url = 'sqlite:archive.sdb'

            [paths]
            config_dir = '/usr/local/etc/wview'

            [commands]
            start = ['/usr/local/etc/rc.d/wview', 'start']
            start_settle_secs = 2

            [auth]
            timeout_minutes = 0
            logout_url = 'http://station.local/'

            [archive]
            report_base_url = 'http://station.local/weather'

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.database.url, "sqlite:conf.sdb");
        assert_eq!(config.database.archive_url, "sqlite:archive.sdb");
        assert_eq!(
            config.database.noaa_url,
            "sqlite:/var/lib/wview/archive/wview-noaa.sdb"
        );
        assert_eq!(config.auth.timeout_minutes, 0);
        assert_eq!(config.logging.filter, "debug");

        let host = config.host_config();
        assert_eq!(host.config_dir, PathBuf::from("/usr/local/etc/wview"));
        assert_eq!(host.start_command, ["/usr/local/etc/rc.d/wview", "start"]);
        assert_eq!(host.stop_command, ["sudo", "/etc/init.d/wview", "stop"]);
        assert_eq!(host.start_settle, Duration::from_secs(2));

        let http = config.http_options();
        assert_eq!(http.session.max_age(), None);
        assert_eq!(http.logout_url, "http://station.local/");
        assert_eq!(http.report_base_url, "http://station.local/weather");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();

        config.apply_env_overrides(env(&[
            ("WVADMIN_BIND", "127.0.0.1:8181"),
            ("WVADMIN_DATABASE_URL", "sqlite::memory:"),
            ("WVADMIN_SESSION_TIMEOUT", "5"),
            ("WVADMIN_LOG", "warn"),
        ]));

        assert_eq!(config.bind_addr(), "127.0.0.1:8181");
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.auth.timeout_minutes, 5);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_rust_log_over_wvadmin_log() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("WVADMIN_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_ignore_unparsable_port() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("WVADMIN_PORT", "http")]));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_command() {
        let mut config = Config::default();
        config.commands.network_restart.clear();

        let err = config.validate().unwrap_err();

        assert_eq!(
            err.to_string(),
            "invalid configuration: commands.network_restart must not be empty"
        );
    }
}
