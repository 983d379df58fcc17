//! Router assembly for the metadata service.

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Extension, Router,
};
use tower_http::{cors::CorsLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::handlers::{self, openzgy, segy, status};
use crate::state::AppState;

/// Content-Security-Policy attached to every response
pub const CONTENT_SECURITY_POLICY: &str =
    "script-src 'sha256-QuAs+CqphLwAzmCp9+wglAmhBrnrCtBV2EsorI3eY2U=' 'self'";

/// Build the service router with every endpoint below the configured prefix.
pub fn build_router(state: Arc<AppState>) -> Router {
    let config = Arc::clone(&state.config);

    Router::new()
        .route(
            &config.route("service-status"),
            get(status::service_status_handler),
        )
        // ZGY
        .route(&config.route("openzgy/headers"), get(openzgy::headers_handler))
        .route(&config.route("openzgy/bingrid"), get(openzgy::bingrid_handler))
        // SEG-Y
        .route(&config.route("segy/revision"), get(segy::revision_handler))
        .route(&config.route("segy/is3D"), get(segy::is_3d_handler))
        .route(
            &config.route("segy/traceHeaderFieldCount"),
            get(segy::trace_header_field_count_handler),
        )
        .route(
            &config.route("segy/textualHeader"),
            get(segy::textual_header_handler),
        )
        .route(
            &config.route("segy/extendedTextualHeaders"),
            get(segy::extended_textual_headers_handler),
        )
        .route(
            &config.route("segy/binaryHeader"),
            get(segy::binary_header_handler),
        )
        .route(
            &config.route("segy/rawTraceHeaders"),
            get(segy::raw_trace_headers_handler),
        )
        .route(
            &config.route("segy/scaledTraceHeaders"),
            get(segy::scaled_trace_headers_handler),
        )
        .fallback(handlers::not_found_handler)
        .layer(Extension(state))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static(CONTENT_SECURITY_POLICY),
        ))
        .layer(
            CorsLayer::permissive().expose_headers([header::CONTENT_SECURITY_POLICY]),
        )
        .layer(TraceLayer::new_for_http())
}
