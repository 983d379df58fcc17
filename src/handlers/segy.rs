//! SEG-Y endpoints. Each opens one session and reads one field.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::Deserialize;

use super::openzgy::SdPathQuery;
use super::ApiError;
use crate::dispatch::RequestAuth;
use crate::headers::{self, HeaderText};
use crate::state::AppState;

/// Query parameters for the trace header dumps
#[derive(Debug, Deserialize)]
pub struct TraceRangeQuery {
    pub sdpath: String,
    pub start_trace: i64,
    pub traces_to_dump: i64,
}

type SdPathParams = Result<Query<SdPathQuery>, QueryRejection>;
type TraceRangeParams = Result<Query<TraceRangeQuery>, QueryRejection>;

/// GET {api_path}segy/revision
pub async fn revision_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: SdPathParams,
) -> Result<Json<i64>, ApiError> {
    let Query(query) = query?;
    let revision = state
        .dispatcher
        .with_segy_session(&auth, &query.sdpath, |session| session.revision())
        .await?;
    Ok(Json(revision))
}

/// GET {api_path}segy/is3D
pub async fn is_3d_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: SdPathParams,
) -> Result<Json<bool>, ApiError> {
    let Query(query) = query?;
    let is_3d = state
        .dispatcher
        .with_segy_session(&auth, &query.sdpath, |session| session.is_3d())
        .await?;
    Ok(Json(is_3d))
}

/// GET {api_path}segy/traceHeaderFieldCount
pub async fn trace_header_field_count_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: SdPathParams,
) -> Result<Json<i64>, ApiError> {
    let Query(query) = query?;
    let count = state
        .dispatcher
        .with_segy_session(&auth, &query.sdpath, |session| {
            session.trace_header_field_count()
        })
        .await?;
    Ok(Json(count))
}

/// GET {api_path}segy/textualHeader
pub async fn textual_header_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: SdPathParams,
) -> Result<Json<HeaderText>, ApiError> {
    let Query(query) = query?;
    let header = state
        .dispatcher
        .with_segy_session(&auth, &query.sdpath, |session| {
            headers::textual_header(session)
        })
        .await?;
    Ok(Json(header))
}

/// GET {api_path}segy/extendedTextualHeaders
pub async fn extended_textual_headers_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: SdPathParams,
) -> Result<Json<HeaderText>, ApiError> {
    let Query(query) = query?;
    let header = state
        .dispatcher
        .with_segy_session(&auth, &query.sdpath, |session| {
            headers::extended_textual_headers(session)
        })
        .await?;
    Ok(Json(header))
}

/// GET {api_path}segy/binaryHeader
pub async fn binary_header_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: SdPathParams,
) -> Result<Json<HeaderText>, ApiError> {
    let Query(query) = query?;
    let header = state
        .dispatcher
        .with_segy_session(&auth, &query.sdpath, |session| {
            headers::binary_header(session)
        })
        .await?;
    Ok(Json(header))
}

/// GET {api_path}segy/rawTraceHeaders
pub async fn raw_trace_headers_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: TraceRangeParams,
) -> Result<Json<HeaderText>, ApiError> {
    let Query(TraceRangeQuery {
        sdpath,
        start_trace,
        traces_to_dump,
    }) = query?;
    let header = state
        .dispatcher
        .with_segy_session(&auth, &sdpath, move |session| {
            headers::raw_trace_headers(session, start_trace, traces_to_dump)
        })
        .await?;
    Ok(Json(header))
}

/// GET {api_path}segy/scaledTraceHeaders
pub async fn scaled_trace_headers_handler(
    Extension(state): Extension<Arc<AppState>>,
    auth: RequestAuth,
    query: TraceRangeParams,
) -> Result<Json<HeaderText>, ApiError> {
    let Query(TraceRangeQuery {
        sdpath,
        start_trace,
        traces_to_dump,
    }) = query?;
    let header = state
        .dispatcher
        .with_segy_session(&auth, &sdpath, move |session| {
            headers::scaled_trace_headers(session, start_trace, traces_to_dump)
        })
        .await?;
    Ok(Json(header))
}
