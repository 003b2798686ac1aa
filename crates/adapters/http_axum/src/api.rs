//! JSON API over the raw configuration table.

#[allow(clippy::missing_errors_doc)]
pub mod config;

use axum::Router;
use axum::routing::get;

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<S, H, A>() -> Router<AppState<S, H, A>>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    Router::new()
        .route("/config", get(config::list::<S, H, A>))
        .route(
            "/config/{key}",
            get(config::get::<S, H, A>).put(config::set::<S, H, A>),
        )
}
