//! JSON handlers for configuration items.

use axum::Json;
use axum::extract::{Path, State};

use serde::Deserialize;

use wvadmin_app::ports::{ArchiveStatistics, ConfigStore, HostSystem};
use wvadmin_domain::config::ConfigItem;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for setting a value.
#[derive(Deserialize)]
pub struct SetValueRequest {
    pub value: String,
}

/// `GET /api/config`
pub async fn list<S, H, A>(
    State(state): State<AppState<S, H, A>>,
) -> Result<Json<Vec<ConfigItem>>, ApiError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let items = state.config_service.list().await?;
    Ok(Json(items))
}

/// `GET /api/config/{key}`
pub async fn get<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Path(key): Path<String>,
) -> Result<Json<ConfigItem>, ApiError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let item = state.config_service.get(&key).await?;
    Ok(Json(item))
}

/// `PUT /api/config/{key}`
pub async fn set<S, H, A>(
    State(state): State<AppState<S, H, A>>,
    Path(key): Path<String>,
    Json(req): Json<SetValueRequest>,
) -> Result<Json<ConfigItem>, ApiError>
where
    S: ConfigStore + Send + Sync + 'static,
    H: HostSystem + Send + Sync + 'static,
    A: ArchiveStatistics + Send + Sync + 'static,
{
    let item = state.config_service.set(&key, &req.value).await?;
    Ok(Json(item))
}
