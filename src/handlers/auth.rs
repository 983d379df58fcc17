//! Caller credential extraction.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{HeaderMap, AUTHORIZATION};
use axum::http::request::Parts;

use super::ApiError;
use crate::dispatch::RequestAuth;
use crate::error::MetadataError;

/// Header carrying the seismic store application key
pub const APP_KEY_HEADER: &str = "appkey";

fn required_header(headers: &HeaderMap, name: &str) -> Result<String, MetadataError> {
    let value = headers
        .get(name)
        .ok_or_else(|| MetadataError::Authorization(format!("missing {} header", name)))?
        .to_str()
        .map_err(|_| MetadataError::Authorization(format!("{} header is not valid text", name)))?
        .trim();

    if value.is_empty() {
        return Err(MetadataError::Authorization(format!("empty {} header", name)));
    }
    Ok(value.to_string())
}

/// Extract the bearer token and app key. The `Authorization` value is
/// forwarded as sent; validating it is left to the seismic store.
pub fn extract_request_auth(headers: &HeaderMap) -> Result<RequestAuth, MetadataError> {
    Ok(RequestAuth {
        bearer: required_header(headers, AUTHORIZATION.as_str())?,
        app_key: required_header(headers, APP_KEY_HEADER)?,
    })
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestAuth
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        extract_request_auth(&parts.headers).map_err(ApiError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_request_auth() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        headers.insert(APP_KEY_HEADER, HeaderValue::from_static(" key-1 "));

        let auth = extract_request_auth(&headers).unwrap();
        assert_eq!(auth.bearer, "Bearer abc.def");
        assert_eq!(auth.app_key, "key-1");
    }

    #[test]
    fn test_missing_headers_are_authorization_errors() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        let err = extract_request_auth(&headers).unwrap_err();
        assert_eq!(err.classify().status, 401);

        headers.insert(APP_KEY_HEADER, HeaderValue::from_static("   "));
        assert!(matches!(
            extract_request_auth(&headers),
            Err(MetadataError::Authorization(_))
        ));
    }
}
