//! Server-side rendered HTML console (no JavaScript).

#[allow(clippy::missing_errors_doc)]
pub mod archive;
#[allow(clippy::missing_errors_doc)]
pub mod settings;
#[allow(clippy::missing_errors_doc)]
pub mod system;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};
use wvadmin_domain::form::FormSubmission;

use crate::state::AppState;

/// Build the console sub-router for SSR HTML pages.
pub fn routes<S, H, A>() -> Router<AppState<S, H, A>>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(|| async { Redirect::to("/system") }))
        .route("/system", get(system::index::<S, H, A>))
        .route("/system/control", post(system::control::<S, H, A>))
        .route("/system/network", post(system::network::<S, H, A>))
        .route("/system/password", post(system::password::<S, H, A>))
        .route(
            "/settings/{page}",
            get(settings::show::<S, H, A>).post(settings::save::<S, H, A>),
        )
        .route("/archive", get(archive::index::<S, H, A>))
        .route("/archive/go", get(archive::go::<S, H, A>))
}

/// Collect posted `(name, value)` pairs, keeping repeated checkbox values.
pub(crate) fn submission(pairs: Vec<(String, String)>) -> FormSubmission {
    pairs.into_iter().collect()
}
