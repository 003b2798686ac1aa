//! Shared application state for axum handlers.

use std::sync::Arc;

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};
use wvadmin_app::services::archive_service::ArchiveService;
use wvadmin_app::services::auth_service::AuthService;
use wvadmin_app::services::config_service::ConfigService;
use wvadmin_app::services::settings_service::SettingsService;
use wvadmin_app::services::system_service::SystemService;
use wvadmin_domain::auth::SessionPolicy;

/// Application state shared across all axum handlers.
///
/// Generic over the configuration store, host system and archive statistics
/// to avoid dynamic dispatch. `Clone` is implemented manually so only the
/// `Arc` wrappers are cloned.
pub struct AppState<S, H, A> {
    pub settings_service: Arc<SettingsService<S, H>>,
    pub auth_service: Arc<AuthService<S>>,
    pub system_service: Arc<SystemService<S, H, A>>,
    pub archive_service: Arc<ArchiveService<A>>,
    pub config_service: Arc<ConfigService<S>>,
    /// Where `/logout` sends the browser.
    pub logout_url: Arc<str>,
}

impl<S, H, A> Clone for AppState<S, H, A> {
    fn clone(&self) -> Self {
        Self {
            settings_service: Arc::clone(&self.settings_service),
            auth_service: Arc::clone(&self.auth_service),
            system_service: Arc::clone(&self.system_service),
            archive_service: Arc::clone(&self.archive_service),
            config_service: Arc::clone(&self.config_service),
            logout_url: Arc::clone(&self.logout_url),
        }
    }
}

/// Options of the HTTP layer that are not owned by a service.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub session: SessionPolicy,
    /// Base URL of the generated reports, used by the archive navigator.
    pub report_base_url: String,
    pub logout_url: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            session: SessionPolicy::default(),
            report_base_url: "/weather".to_string(),
            logout_url: "/login".to_string(),
        }
    }
}

impl<S, H, A> AppState<S, H, A>
where
    S: ConfigStore + Clone + Send + Sync + 'static,
    H: HostSystem + Clone + Send + Sync + 'static,
    A: ArchiveStatistics + Clone + Send + Sync + 'static,
{
    /// Build every service over the same ports.
    pub fn new(store: S, host: H, archive: A, options: HttpOptions) -> Self {
        Self {
            settings_service: Arc::new(SettingsService::new(store.clone(), host.clone())),
            auth_service: Arc::new(AuthService::new(store.clone(), options.session)),
            system_service: Arc::new(SystemService::new(
                store.clone(),
                host,
                archive.clone(),
            )),
            archive_service: Arc::new(ArchiveService::new(archive, options.report_base_url)),
            config_service: Arc::new(ConfigService::new(store)),
            logout_url: Arc::from(options.logout_url),
        }
    }
}
