//! ZGY cube endpoints: header bundle and bin-grid description.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::Deserialize;

use super::ApiError;
use crate::bingrid::{BinGrid, BinGridAttributes};
use crate::dispatch::RequestAuth;
use crate::headers::HeaderBundle;
use crate::state::AppState;

/// Query parameters naming a dataset
#[derive(Debug, Deserialize)]
pub struct SdPathQuery {
    /// Dataset URL (`sd://tenant/subproject/path`)
    pub sdpath: String,
}

/// GET {api_path}openzgy/headers
pub async fn headers_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: Result<Query<SdPathQuery>, QueryRejection>,
) -> Result<Json<HeaderBundle>, ApiError> {
    let Query(query) = query?;
    let bundle = state
        .dispatcher
        .with_cube_reader(&auth, &query.sdpath, |reader| {
            HeaderBundle::from_reader(reader)
        })
        .await?;
    Ok(Json(bundle))
}

/// GET {api_path}openzgy/bingrid
pub async fn bingrid_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: Result<Query<SdPathQuery>, QueryRejection>,
) -> Result<Json<BinGridAttributes>, ApiError> {
    let Query(query) = query?;
    let attributes = state
        .dispatcher
        .with_cube_reader(&auth, &query.sdpath, |reader| {
            BinGrid::from_reader(reader)?.compute()
        })
        .await?;
    Ok(Json(attributes))
}
