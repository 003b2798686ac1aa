//! System status page: daemon control, network settings and the admin
//! password.

use askama::Template;
use axum::extract::{Form, Query, State};
use axum::http::header::SET_COOKIE;
use axum::response::{Html, IntoResponse, Redirect, Response};
use serde::Deserialize;

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};
use wvadmin_app::services::system_service::SystemStatus;
use wvadmin_domain::daemon::DaemonStatus;
use wvadmin_domain::error::{AdminError, ValidationError};
use wvadmin_domain::network::NetworkSettings;

use crate::error::DashboardError;
use crate::session::session_cookie;
use crate::state::AppState;

/// Refresh interval while the daemons come up.
const STARTING_REFRESH_SECONDS: u32 = 3;
const IDLE_REFRESH_SECONDS: u32 = 60;
/// How long a failed network update stays on screen.
const NETWORK_FAILURE_DELAY_SECONDS: u32 = 2;

/// Network form values; empty fields under DHCP.
#[derive(Default)]
pub struct NetworkView {
    dhcp: bool,
    address: String,
    netmask: String,
    gateway: String,
    dns1: String,
    dns2: String,
}

impl From<NetworkSettings> for NetworkView {
    fn from(settings: NetworkSettings) -> Self {
        match settings {
            NetworkSettings::Dhcp => Self {
                dhcp: true,
                ..Self::default()
            },
            NetworkSettings::Static {
                address,
                netmask,
                gateway,
                dns1,
                dns2,
            } => Self {
                dhcp: false,
                address,
                netmask,
                gateway,
                dns1,
                dns2,
            },
        }
    }
}

/// System status page template.
#[derive(Template)]
#[template(path = "system.html")]
pub struct SystemTemplate {
    refresh_seconds: u32,
    station: String,
    version: String,
    daemon_status: &'static str,
    running: bool,
    control_label: &'static str,
    network: NetworkView,
    archive_records: u64,
    archive_first: String,
    archive_last: String,
    noaa_days: u64,
    password_mismatch: bool,
}

impl SystemTemplate {
    fn new(status: SystemStatus, password_mismatch: bool) -> Self {
        let timestamp = |value: Option<chrono::DateTime<chrono::Utc>>| {
            value.map_or_else(
                || "-".to_string(),
                |value| value.format("%Y-%m-%d %H:%M").to_string(),
            )
        };

        Self {
            refresh_seconds: if status.daemon == DaemonStatus::Starting {
                STARTING_REFRESH_SECONDS
            } else {
                IDLE_REFRESH_SECONDS
            },
            station: status
                .station
                .map_or("Not configured", |station| station.label())
                .to_string(),
            version: status.version.unwrap_or_else(|| "unknown".to_string()),
            daemon_status: status.daemon.label(),
            running: status.daemon == DaemonStatus::Running,
            control_label: status.daemon.control_label(),
            network: NetworkView::from(status.network),
            archive_records: status.archive.records,
            archive_first: timestamp(status.archive.first),
            archive_last: timestamp(status.archive.last),
            noaa_days: status.archive.noaa_days,
            password_mismatch,
        }
    }
}

impl IntoResponse for SystemTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Shown when the network files cannot be written.
#[derive(Template)]
#[template(path = "network_failed.html")]
pub struct NetworkFailedTemplate {
    delay_seconds: u32,
    message: String,
}

impl IntoResponse for NetworkFailedTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Query flags of the system page.
#[derive(Deserialize)]
pub struct SystemQuery {
    /// Set after a rejected password change.
    pub mismatch: Option<String>,
}

/// `GET /system`
pub async fn index<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Query(query): Query<SystemQuery>,
) -> Result<SystemTemplate, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let status = state.system_service.status().await?;
    Ok(SystemTemplate::new(status, query.mismatch.is_some()))
}

/// `POST /system/control`: start or stop the daemons (PRG).
pub async fn control<S, H, A>(
    State(state): State<AppState<S, H, A>>,
) -> Result<Redirect, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    state.system_service.toggle_daemon().await?;
    Ok(Redirect::to("/system"))
}

/// `POST /system/network`: write the network files and restart networking.
///
/// A host failure is shown for a moment before returning to the system page.
pub async fn network<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let form = super::submission(pairs);
    match state.system_service.update_network(&form).await {
        Ok(_) => Ok(Redirect::to("/system").into_response()),
        Err(AdminError::Host(err)) => {
            tracing::error!(error = %err, cause = ?err.source(), "network update failed");
            let message = err
                .source()
                .map_or_else(|| err.to_string(), |cause| format!("{err}: {cause}"));
            Ok(NetworkFailedTemplate {
                delay_seconds: NETWORK_FAILURE_DELAY_SECONDS,
                message,
            }
            .into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// Form posted to change the admin password.
#[derive(Deserialize)]
pub struct PasswordForm {
    #[serde(default, rename = "field_Admin_Password1")]
    pub first: String,
    #[serde(default, rename = "field_Admin_Password2")]
    pub second: String,
}

/// `POST /system/password`: store the new password and re-issue the cookie.
pub async fn password<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Form(form): Form<PasswordForm>,
) -> Result<Response, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    match state
        .auth_service
        .change_password(&form.first, &form.second)
        .await
    {
        Ok(digest) => {
            let cookie = session_cookie(&digest, state.auth_service.policy());
            Ok(([(SET_COOKIE, cookie)], Redirect::to("/system")).into_response())
        }
        Err(AdminError::Validation(
            ValidationError::PasswordMismatch | ValidationError::EmptyPassword,
        )) => Ok(Redirect::to("/system?mismatch=1").into_response()),
        Err(err) => Err(err.into()),
    }
}
