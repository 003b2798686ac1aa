//! Archive navigator: pick a date, jump to the generated report.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Local;
use serde::Deserialize;

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};
use wvadmin_domain::archive::{ReportKind, SelectOption};

use crate::error::DashboardError;
use crate::state::AppState;

/// Archive navigator template.
#[derive(Template)]
#[template(path = "archive.html")]
pub struct ArchiveTemplate {
    years: Vec<SelectOption>,
    months: Vec<SelectOption>,
    days: Vec<SelectOption>,
}

impl IntoResponse for ArchiveTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// `GET /archive`
pub async fn index<S, H, A>(
    State(state): State<AppState<S, H, A>>,
) -> Result<ArchiveTemplate, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let picker = state
        .archive_service
        .picker(Local::now().date_naive())
        .await?;
    Ok(ArchiveTemplate {
        years: picker.years,
        months: picker.months,
        days: picker.days,
    })
}

/// Date picked in one of the navigator forms.
#[derive(Deserialize)]
pub struct GoQuery {
    pub kind: ReportKind,
    pub year: i32,
    pub month: Option<u32>,
    pub day: Option<u32>,
}

/// `GET /archive/go`: redirect to the report for the picked date.
pub async fn go<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Query(query): Query<GoQuery>,
) -> Result<Redirect, DashboardError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let url = state
        .archive_service
        .report_url(query.kind, query.year, query.month, query.day)?;
    tracing::debug!(%url, "archive report selected");
    Ok(Redirect::to(&url))
}
